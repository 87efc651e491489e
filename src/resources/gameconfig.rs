//! Simulation configuration resource.
//!
//! Numeric tunables loaded from an INI configuration file. Provides defaults
//! for a safe startup; scenes read these values only while they are being
//! created.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 800
//! height = 600
//! gravity = 9.8
//! max_velocity = 400
//!
//! [physics]
//! speed = 120
//! elasticity = 0.6
//! friction = 0.98
//! density = 1.0
//!
//! [camera]
//! width = 320
//! height = 240
//! tween = 0.2
//!
//! [scene]
//! chasers = 12
//! wave_segments = 40
//!
//! [window]
//! target_fps = 60
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::error::EngineError;

/// Default safe values for startup
const DEFAULT_WORLD_WIDTH: f32 = 800.0;
const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
const DEFAULT_GRAVITY: f32 = 9.8;
const DEFAULT_MAX_VELOCITY: f32 = 400.0;
const DEFAULT_SPEED: f32 = 120.0;
const DEFAULT_ELASTICITY: f32 = 0.6;
const DEFAULT_FRICTION: f32 = 0.98;
const DEFAULT_DENSITY: f32 = 1.0;
const DEFAULT_CAMERA_WIDTH: f32 = 320.0;
const DEFAULT_CAMERA_HEIGHT: f32 = 240.0;
const DEFAULT_CAMERA_TWEEN: f32 = 0.2;
const DEFAULT_CHASERS: u32 = 12;
const DEFAULT_WAVE_SEGMENTS: u32 = 40;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// World bounds width in world units.
    pub world_width: f32,
    /// World bounds height in world units.
    pub world_height: f32,
    /// Gravity acceleration along +Y.
    pub gravity: f32,
    /// Per-component velocity clamp.
    pub max_velocity: f32,
    /// Default movement speed for controllers and steering behaviors.
    pub speed: f32,
    /// Default elasticity of spawned entities.
    pub elasticity: f32,
    /// Default kinetic friction of spawned entities.
    pub friction: f32,
    /// Default density of spawned entities.
    pub density: f32,
    /// Camera viewport width.
    pub camera_width: f32,
    /// Camera viewport height.
    pub camera_height: f32,
    /// Camera tween factor in [0, 1].
    pub camera_tween: f32,
    /// Number of batch-generated chaser entities.
    pub chasers: u32,
    /// Number of segments of the wave simulator.
    pub wave_segments: u32,
    /// Frame rate the driver aims for.
    pub target_fps: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a float, treating absent keys as "keep the default" and unparsable
/// values as a configuration error.
fn read_float(ini: &Ini, section: &str, key: &str) -> Result<Option<f32>, EngineError> {
    ini.getfloat(section, key)
        .map(|v| v.map(|v| v as f32))
        .map_err(|e| EngineError::config(format!("[{section}] {key}: {e}")))
}

fn read_uint(ini: &Ini, section: &str, key: &str) -> Result<Option<u32>, EngineError> {
    let value = ini
        .getuint(section, key)
        .map_err(|e| EngineError::config(format!("[{section}] {key}: {e}")))?;
    value
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| EngineError::config(format!("[{section}] {key}: {v} is out of range")))
        })
        .transpose()
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            max_velocity: DEFAULT_MAX_VELOCITY,
            speed: DEFAULT_SPEED,
            elasticity: DEFAULT_ELASTICITY,
            friction: DEFAULT_FRICTION,
            density: DEFAULT_DENSITY,
            camera_width: DEFAULT_CAMERA_WIDTH,
            camera_height: DEFAULT_CAMERA_HEIGHT,
            camera_tween: DEFAULT_CAMERA_TWEEN,
            chasers: DEFAULT_CHASERS,
            wave_segments: DEFAULT_WAVE_SEGMENTS,
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// A missing file keeps the defaults. Missing keys retain their current
    /// values; malformed values or out-of-range settings are errors.
    pub fn load_from_file(&mut self) -> Result<(), EngineError> {
        if !Path::new(&self.config_path).exists() {
            info!(
                "No config file at {:?}, using default tunables",
                self.config_path
            );
            return self.validate();
        }
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| EngineError::config(format!("failed to load config file: {e}")))?;
        self.apply(&ini)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), EngineError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|e| EngineError::config(format!("failed to parse config: {e}")))?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), EngineError> {
        // [world] section
        if let Some(v) = read_float(ini, "world", "width")? {
            self.world_width = v;
        }
        if let Some(v) = read_float(ini, "world", "height")? {
            self.world_height = v;
        }
        if let Some(v) = read_float(ini, "world", "gravity")? {
            self.gravity = v;
        }
        if let Some(v) = read_float(ini, "world", "max_velocity")? {
            self.max_velocity = v;
        }

        // [physics] section
        if let Some(v) = read_float(ini, "physics", "speed")? {
            self.speed = v;
        }
        if let Some(v) = read_float(ini, "physics", "elasticity")? {
            self.elasticity = v;
        }
        if let Some(v) = read_float(ini, "physics", "friction")? {
            self.friction = v;
        }
        if let Some(v) = read_float(ini, "physics", "density")? {
            self.density = v;
        }

        // [camera] section
        if let Some(v) = read_float(ini, "camera", "width")? {
            self.camera_width = v;
        }
        if let Some(v) = read_float(ini, "camera", "height")? {
            self.camera_height = v;
        }
        if let Some(v) = read_float(ini, "camera", "tween")? {
            self.camera_tween = v;
        }

        // [scene] section
        if let Some(v) = read_uint(ini, "scene", "chasers")? {
            self.chasers = v;
        }
        if let Some(v) = read_uint(ini, "scene", "wave_segments")? {
            self.wave_segments = v;
        }

        // [window] section
        if let Some(v) = read_uint(ini, "window", "target_fps")? {
            self.target_fps = v;
        }

        self.validate()?;
        info!(
            "Config: world {}x{}, gravity={}, max_velocity={}, camera {}x{} tween={}, chasers={}, wave_segments={}",
            self.world_width,
            self.world_height,
            self.gravity,
            self.max_velocity,
            self.camera_width,
            self.camera_height,
            self.camera_tween,
            self.chasers,
            self.wave_segments
        );
        Ok(())
    }

    /// Check that every tunable is usable by the simulation.
    pub fn validate(&self) -> Result<(), EngineError> {
        let floats = [
            ("world.width", self.world_width),
            ("world.height", self.world_height),
            ("world.gravity", self.gravity),
            ("world.max_velocity", self.max_velocity),
            ("physics.speed", self.speed),
            ("physics.elasticity", self.elasticity),
            ("physics.friction", self.friction),
            ("physics.density", self.density),
            ("camera.width", self.camera_width),
            ("camera.height", self.camera_height),
            ("camera.tween", self.camera_tween),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::config(format!("{name} is not finite ({value})")));
        }
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(EngineError::config(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if self.camera_width <= 0.0 || self.camera_height <= 0.0 {
            return Err(EngineError::config(format!(
                "camera size must be positive, got {}x{}",
                self.camera_width, self.camera_height
            )));
        }
        if !(0.0..=1.0).contains(&self.camera_tween) {
            return Err(EngineError::config(format!(
                "camera.tween must be within [0, 1], got {}",
                self.camera_tween
            )));
        }
        if self.max_velocity <= 0.0 {
            return Err(EngineError::config("world.max_velocity must be positive"));
        }
        if self.target_fps == 0 {
            return Err(EngineError::config("window.target_fps must be positive"));
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), EngineError> {
        let mut ini = Ini::new();

        ini.set("world", "width", Some(self.world_width.to_string()));
        ini.set("world", "height", Some(self.world_height.to_string()));
        ini.set("world", "gravity", Some(self.gravity.to_string()));
        ini.set("world", "max_velocity", Some(self.max_velocity.to_string()));

        ini.set("physics", "speed", Some(self.speed.to_string()));
        ini.set("physics", "elasticity", Some(self.elasticity.to_string()));
        ini.set("physics", "friction", Some(self.friction.to_string()));
        ini.set("physics", "density", Some(self.density.to_string()));

        ini.set("camera", "width", Some(self.camera_width.to_string()));
        ini.set("camera", "height", Some(self.camera_height.to_string()));
        ini.set("camera", "tween", Some(self.camera_tween.to_string()));

        ini.set("scene", "chasers", Some(self.chasers.to_string()));
        ini.set("scene", "wave_segments", Some(self.wave_segments.to_string()));

        ini.set("window", "target_fps", Some(self.target_fps.to_string()));

        ini.write(&self.config_path)
            .map_err(|e| EngineError::config(format!("failed to save config file: {e}")))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
