//! Scene registry with one active scene.
//!
//! [`SceneManager`] owns every registered [`Scene`] by name. Switching
//! disposes the outgoing scene (firing `end`), then creates the incoming one
//! (firing `start`). The asset cache is handed from scene to scene so assets
//! are loaded once per run.

use glam::Vec2;
use log::{error, info, warn};
use rustc_hash::FxHashMap;

use super::Scene;
use crate::error::EngineError;
use crate::render::Canvas;
use crate::resources::assetstore::AssetStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

pub struct SceneManager {
    scenes: FxHashMap<String, Scene>,
    active: Option<String>,
    config: GameConfig,
    assets: Option<AssetStore>,
}

impl SceneManager {
    pub fn new(config: GameConfig) -> Self {
        Self::with_assets(config, AssetStore::default())
    }

    pub fn with_assets(config: GameConfig, assets: AssetStore) -> Self {
        Self {
            scenes: FxHashMap::default(),
            active: None,
            config,
            assets: Some(assets),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the tunables used by the next `switch_to`/`reset_active`.
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    /// Add a scene. A scene registered under an existing name replaces it.
    pub fn register(&mut self, scene: Scene) {
        let name = scene.name().to_string();
        if self.active.as_deref() == Some(name.as_str()) {
            self.dispose();
        }
        if self.scenes.insert(name.clone(), scene).is_some() {
            warn!("Scene '{}' registered twice; keeping the newest", name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Scene> {
        self.scenes.get(self.active.as_deref()?)
    }

    pub fn active_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.get_mut(self.active.as_deref()?)
    }

    /// Dispose the active scene and activate `name`.
    ///
    /// An unknown name fails before anything is disposed. If the incoming
    /// scene fails to build, no scene is left active.
    pub fn switch_to(&mut self, name: &str) -> Result<(), EngineError> {
        if !self.scenes.contains_key(name) {
            return Err(EngineError::lookup(name));
        }
        self.dispose();

        let assets = self.assets.take().unwrap_or_default();
        let config = self.config.clone();
        let Some(scene) = self.scenes.get_mut(name) else {
            return Err(EngineError::lookup(name));
        };
        scene.provide_assets(assets);
        if let Err(err) = scene.create(&config) {
            error!("Switch to scene '{}' aborted: {}", name, err);
            self.assets = scene.take_assets();
            return Err(err);
        }

        info!("Switched to scene '{}'", name);
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Rebuild the active scene from scratch.
    pub fn reset_active(&mut self) -> Result<(), EngineError> {
        let name = self
            .active
            .clone()
            .ok_or_else(|| EngineError::config("no active scene to reset"))?;
        self.switch_to(&name)
    }

    /// Tick the active scene. Returns false when no scene is active.
    pub fn tick(&mut self, dt: f32, input: &InputState, canvas: &mut dyn Canvas) -> bool {
        match self.active_mut() {
            Some(scene) => {
                scene.tick(dt, input, canvas);
                true
            }
            None => false,
        }
    }

    /// Dispose the active scene, if any. The asset cache is kept.
    pub fn dispose(&mut self) {
        let Some(name) = self.active.take() else {
            return;
        };
        if let Some(scene) = self.scenes.get_mut(&name) {
            scene.dispose();
            if let Some(assets) = scene.take_assets() {
                self.assets = Some(assets);
            }
        }
    }

    /// Position of a named entity in the active scene.
    pub fn position(&self, name: &str) -> Option<Vec2> {
        self.active()?.position(name)
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        self.dispose();
    }
}
