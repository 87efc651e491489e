//! Demo scenes driven by the `pondengine` binary.
//!
//! - `pond` – a keyboard-driven duck on a wavy pond, chased by a shoal of
//!   fish, with a camera-attached readout of the duck's position.
//! - `bounce` – crates loaded from a JSON layout bouncing around a walled
//!   box with a patch of mud that slows them down.
//!
//! Both read their tunables from [`GameConfig`] at creation time only.

use glam::Vec2;

use crate::behaviors::hud::TrackerHud;
use crate::behaviors::keyboard::KeyboardThrust;
use crate::behaviors::pursuit::Pursuit;
use crate::behaviors::wave::WaveSimulator;
use crate::components::material::Material;
use crate::components::physickind::PhysicKind;
use crate::components::shape::Shape;
use crate::error::EngineError;
use crate::render::Color;
use crate::resources::gameconfig::GameConfig;
use crate::resources::physicsworld::{Area, Rect};
use crate::scene::{EntityBuilder, Scene, SceneManager};

pub const POND: &str = "pond";
pub const BOUNCE: &str = "bounce";

/// Name of the entity the camera follows in each demo.
pub const PLAYER: &str = "duck";
pub const BALL: &str = "ball";

const WATER_BLUE: Color = Color::rgba(0, 90, 200, 160);
const MUD_BROWN: Color = Color::rgb(110, 80, 40);

const BOUNCE_LAYOUT: &str = r#"{
    "areas": [
        { "name": "mud", "position": [300, 380], "size": [200, 220], "force": [0, 0],
          "material": { "density": 1.0, "kinetic_friction": 0.85, "elasticity": 1.0 } }
    ],
    "entities": [
        { "name": "crate_a", "position": [60, 40], "size": [30, 30], "velocity": [140, 0],
          "kind": "dynamic", "mass": 2.0,
          "material": { "density": 1.0, "kinetic_friction": 0.95, "elasticity": 0.7 },
          "shape": { "type": "rect", "color": { "r": 180, "g": 120, "b": 60, "a": 255 }, "filled": true } },
        { "name": "crate_b", "position": [600, 80], "size": [40, 40], "velocity": [-90, 30],
          "kind": "dynamic", "mass": 3.0,
          "material": { "density": 1.0, "kinetic_friction": 0.95, "elasticity": 0.5 },
          "shape": { "type": "rect", "color": { "r": 150, "g": 100, "b": 50, "a": 255 }, "filled": true } },
        { "name": "pillar", "position": [390, 200], "size": [20, 180], "kind": "static",
          "shape": { "type": "rect", "color": { "r": 90, "g": 90, "b": 90, "a": 255 }, "filled": true } }
    ]
}"#;

/// Register every demo scene.
pub fn register_scenes(manager: &mut SceneManager) {
    manager.register(Scene::from_fn(POND, build_pond));
    manager.register(Scene::from_fn(BOUNCE, build_bounce));
}

fn hud(scene: &mut Scene, target: &str) -> Result<(), EngineError> {
    scene.spawn(
        EntityBuilder::new("hud")
            .at(8.0, 8.0)
            .camera_attached()
            .priority(100)
            .shape(Shape::text("", "assets/fonts/mono.ttf", 12.0, Color::WHITE))
            .behavior(TrackerHud::new(target)),
    )?;
    Ok(())
}

pub fn build_pond(scene: &mut Scene, config: &GameConfig) -> Result<(), EngineError> {
    let (width, height) = (config.world_width, config.world_height);
    let surface = height * 2.0 / 3.0;
    let body_material = Material::new(config.density, config.friction, config.elasticity);

    scene.add_area(Area::new(
        "water",
        Rect::from_xywh(0.0, surface, width, height - surface),
        Vec2::new(0.0, -2.0 * config.gravity),
        Material::new(1.0, 0.9, 1.0),
    ))?;

    scene.spawn(
        EntityBuilder::new("water")
            .at(0.0, surface)
            .size(width, height - surface)
            .kind(PhysicKind::Static)
            .priority(-1)
            .shape(Shape::rect(WATER_BLUE))
            .behavior(WaveSimulator::new(config.wave_segments as usize)),
    )?;

    scene.spawn(
        EntityBuilder::new(PLAYER)
            .at(width / 2.0, surface - 40.0)
            .size(24.0, 16.0)
            .dynamic()
            .material(body_material)
            .max_speed(config.speed)
            .priority(2)
            .shape(Shape::ellipse(Color::YELLOW))
            .behavior(KeyboardThrust::new(config.speed)),
    )?;
    scene.spawn(
        EntityBuilder::new("duck_beak")
            .size(6.0, 4.0)
            .priority(3)
            .shape(Shape::rect(Color::RED))
            .child_of(PLAYER, Vec2::new(24.0, 4.0)),
    )?;

    let shoal = config.chasers as usize;
    let spacing = width / (shoal as f32 + 1.0);
    let depth = surface + (height - surface) * 0.6;
    scene.spawn_batch(shoal, |i| {
        EntityBuilder::new(format!("fish{i}"))
            .at(spacing * (i as f32 + 1.0), depth)
            .size(10.0, 6.0)
            .dynamic()
            .material(body_material)
            .max_speed(config.speed * 0.8)
            .priority(1)
            .shape(Shape::rect(Color::GREEN))
            .behavior(Pursuit::new(PLAYER, config.speed * 0.5))
    })?;

    hud(scene, PLAYER)?;
    scene.follow(
        PLAYER,
        Vec2::new(config.camera_width, config.camera_height),
        config.camera_tween,
    )
}

pub fn build_bounce(scene: &mut Scene, config: &GameConfig) -> Result<(), EngineError> {
    scene.spawn_layout(BOUNCE_LAYOUT)?;
    scene.spawn(
        EntityBuilder::new("mud")
            .at(300.0, 380.0)
            .size(200.0, 220.0)
            .priority(-1)
            .shape(Shape::rect(MUD_BROWN)),
    )?;
    scene.spawn(
        EntityBuilder::new(BALL)
            .at(config.world_width * 0.25, config.world_height * 0.25)
            .size(16.0, 16.0)
            .velocity(config.speed, -config.speed)
            .dynamic()
            .material(Material::new(config.density, config.friction, config.elasticity))
            .priority(1)
            .shape(Shape::ellipse(Color::RED)),
    )?;
    hud(scene, BALL)?;
    scene.follow(
        BALL,
        Vec2::new(config.camera_width, config.camera_height),
        config.camera_tween,
    )
}
