//! Scene-level tests: full tick phase order, behaviors, camera and the
//! scene manager lifecycle.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityWorldMut;
use glam::Vec2;

use pondengine::behaviors::hud::TrackerHud;
use pondengine::behaviors::pursuit::Pursuit;
use pondengine::behaviors::wave::WaveSimulator;
use pondengine::behaviors::{Behavior, BehaviorResult, Behaviors};
use pondengine::components::flags::EntityFlags;
use pondengine::components::identity::EntityName;
use pondengine::components::material::Material;
use pondengine::components::rigidbody::RigidBody;
use pondengine::components::shape::Shape;
use pondengine::error::EngineError;
use pondengine::render::{Color, DrawCommand, RecordingCanvas};
use pondengine::resources::gameconfig::GameConfig;
use pondengine::resources::input::InputState;
use pondengine::scene::{EntityBuilder, Scene, SceneManager, SceneSetup, SceneState};

const EPSILON: f32 = 1e-4;

type Log = Arc<Mutex<Vec<String>>>;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn calm_config() -> GameConfig {
    GameConfig {
        gravity: 0.0,
        ..GameConfig::default()
    }
}

fn active_scene(build: impl Fn(&mut Scene) -> Result<(), EngineError> + Send + Sync + 'static) -> Scene {
    let mut scene = Scene::from_fn("test", move |scene, _| build(scene));
    scene.create(&calm_config()).unwrap();
    scene
}

fn no_input() -> InputState {
    InputState::default()
}

/// Records `self -> other` for every collision it receives.
struct CollisionLog(Log);

impl Behavior for CollisionLog {
    fn on_collision(&mut self, entity: &mut EntityWorldMut<'_>, other: Entity) -> BehaviorResult {
        let me = entity.get::<EntityName>().map(|n| n.0.clone()).unwrap_or_default();
        let them = entity
            .world()
            .get::<EntityName>(other)
            .map(|n| n.0.clone())
            .unwrap_or_default();
        self.0.lock().unwrap().push(format!("{me}->{them}"));
        Ok(())
    }
}

/// Records lifecycle hooks as `hook:tag`.
struct Hooks {
    tag: &'static str,
    log: Log,
}

impl Behavior for Hooks {
    fn start(&mut self, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        self.log.lock().unwrap().push(format!("start:{}", self.tag));
        Ok(())
    }

    fn input(&mut self, _input: &InputState, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        self.log.lock().unwrap().push(format!("input:{}", self.tag));
        Ok(())
    }

    fn update(&mut self, _entity: &mut EntityWorldMut<'_>, _dt: f32) -> BehaviorResult {
        self.log.lock().unwrap().push(format!("update:{}", self.tag));
        Ok(())
    }

    fn end(&mut self, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        self.log.lock().unwrap().push(format!("end:{}", self.tag));
        Ok(())
    }
}

/// Scene setup that spawns two hooked entities and logs its own input phase.
struct ScriptedScene {
    log: Log,
    fail_input: bool,
}

impl SceneSetup for ScriptedScene {
    fn build(&self, scene: &mut Scene, _config: &GameConfig) -> Result<(), EngineError> {
        scene.spawn(EntityBuilder::new("x").behavior(Hooks {
            tag: "x",
            log: self.log.clone(),
        }))?;
        scene.spawn(EntityBuilder::new("y").priority(-1).behavior(Hooks {
            tag: "y",
            log: self.log.clone(),
        }))?;
        Ok(())
    }

    fn input(&self, _world: &mut World, _input: &InputState) -> Result<(), EngineError> {
        self.log.lock().unwrap().push("input:scene".to_string());
        if self.fail_input {
            return Err(EngineError::config("scripted input failure"));
        }
        Ok(())
    }
}

fn scripted_scene(log: &Log, fail_input: bool) -> Scene {
    let mut scene = Scene::new(
        "scripted",
        ScriptedScene {
            log: log.clone(),
            fail_input,
        },
    );
    scene.create(&calm_config()).unwrap();
    scene
}

struct Exploding;

impl Behavior for Exploding {
    fn update(&mut self, _entity: &mut EntityWorldMut<'_>, _dt: f32) -> BehaviorResult {
        Err(EngineError::behavior("Exploding", "boom"))
    }
}

// ==================== COLLISION DISPATCH ====================

#[test]
fn test_collision_dispatched_once_each_way() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let setup_log = log.clone();
    let mut scene = active_scene(move |scene| {
        scene.spawn(
            EntityBuilder::new("a")
                .at(10.0, 10.0)
                .size(20.0, 20.0)
                .behavior(CollisionLog(setup_log.clone())),
        )?;
        scene.spawn(
            EntityBuilder::new("b")
                .at(20.0, 20.0)
                .size(20.0, 20.0)
                .behavior(CollisionLog(setup_log.clone())),
        )?;
        scene.spawn(
            EntityBuilder::new("c")
                .at(400.0, 400.0)
                .size(20.0, 20.0)
                .behavior(CollisionLog(setup_log.clone())),
        )?;
        Ok(())
    });

    scene.step(0.016, &no_input());

    assert_eq!(scene.collisions().unwrap().len(), 1);
    let mut calls = log.lock().unwrap().clone();
    calls.sort();
    assert_eq!(calls, vec!["a->b", "b->a"]);

    log.lock().unwrap().clear();
    scene.step(0.016, &no_input());
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn test_camera_attached_entities_never_collide() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let setup_log = log.clone();
    let mut scene = active_scene(move |scene| {
        scene.spawn(
            EntityBuilder::new("world_thing")
                .at(0.0, 0.0)
                .size(50.0, 50.0)
                .behavior(CollisionLog(setup_log.clone())),
        )?;
        scene.spawn(
            EntityBuilder::new("hud")
                .at(0.0, 0.0)
                .size(50.0, 50.0)
                .camera_attached()
                .behavior(CollisionLog(setup_log.clone())),
        )?;
        Ok(())
    });

    scene.step(0.016, &no_input());
    assert!(log.lock().unwrap().is_empty());
}

// ==================== CAMERA ====================

#[test]
fn test_hard_locked_camera_recenters_every_tick() {
    let mut scene = active_scene(|scene| {
        scene.spawn(
            EntityBuilder::new("runner")
                .at(100.0, 100.0)
                .size(20.0, 10.0)
                .velocity(50.0, 20.0)
                .dynamic(),
        )?;
        scene.follow("runner", Vec2::new(200.0, 100.0), 1.0)
    });

    for _ in 0..30 {
        scene.step(0.1, &no_input());
        let target = scene.position("runner").unwrap();
        let camera = scene.camera().unwrap();
        let expected = target - (Vec2::new(200.0, 100.0) - Vec2::new(20.0, 10.0)) / 2.0;
        assert!(approx_eq(camera.pos.x, expected.x));
        assert!(approx_eq(camera.pos.y, expected.y));
    }
}

#[test]
fn test_tweened_camera_lags_behind() {
    let mut scene = active_scene(|scene| {
        scene.spawn(
            EntityBuilder::new("runner")
                .at(100.0, 100.0)
                .size(20.0, 20.0)
                .velocity(400.0, 0.0)
                .dynamic(),
        )?;
        scene.follow("runner", Vec2::new(200.0, 100.0), 0.25)
    });

    let start = scene.camera().unwrap().pos;
    scene.step(0.1, &no_input());
    let target = scene.position("runner").unwrap();
    let goal_x = target.x - 90.0;
    let camera_x = scene.camera().unwrap().pos.x;
    assert!(camera_x > start.x && camera_x < goal_x);
    assert!(approx_eq(camera_x, start.x + (goal_x - start.x) * 0.25));
}

#[test]
fn test_camera_on_unknown_target_aborts_creation() {
    let mut scene = Scene::from_fn("lost", |scene, config| {
        scene.spawn(EntityBuilder::new("player"))?;
        scene.follow(
            "plaeyr",
            Vec2::new(config.camera_width, config.camera_height),
            config.camera_tween,
        )
    });
    assert_eq!(
        scene.create(&GameConfig::default()),
        Err(EngineError::lookup("plaeyr"))
    );
    assert_eq!(scene.state(), SceneState::Unloaded);
}

#[test]
fn test_hud_is_drawn_in_camera_space() {
    let mut scene = active_scene(|scene| {
        scene.spawn(
            EntityBuilder::new("duck")
                .at(500.0, 400.0)
                .size(20.0, 20.0)
                .shape(Shape::rect(Color::YELLOW)),
        )?;
        scene.spawn(
            EntityBuilder::new("hud")
                .at(8.0, 8.0)
                .camera_attached()
                .priority(10)
                .shape(Shape::text("", "mono", 10.0, Color::WHITE))
                .behavior(TrackerHud::new("duck").with_label("duck")),
        )?;
        scene.follow("duck", Vec2::new(100.0, 100.0), 1.0)
    });

    let mut canvas = RecordingCanvas::default();
    scene.tick(0.016, &no_input(), &mut canvas);

    assert_eq!(
        canvas.commands[0],
        DrawCommand::Rect {
            pos: Vec2::new(40.0, 40.0),
            size: Vec2::new(20.0, 20.0),
            color: Color::YELLOW,
            filled: true,
        }
    );
    match &canvas.commands[1] {
        DrawCommand::Text { pos, text, .. } => {
            assert_eq!(*pos, Vec2::new(8.0, 8.0));
            assert_eq!(text, "duck: 500, 400");
        }
        other => panic!("unexpected command {other:?}"),
    }
}

// ==================== BEHAVIORS ====================

#[test]
fn test_hook_order_within_tick() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut scene = scripted_scene(&log, false);

    scene.step(0.016, &no_input());
    scene.dispose();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "start:y",
            "start:x",
            "input:scene",
            "input:y",
            "input:x",
            "update:y",
            "update:x",
            "end:y",
            "end:x"
        ]
    );
}

#[test]
fn test_failing_scene_input_is_skipped() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut scene = scripted_scene(&log, true);

    scene.step(0.016, &no_input());
    scene.step(0.016, &no_input());

    let calls = log.lock().unwrap().clone();
    assert_eq!(calls.iter().filter(|c| *c == "input:scene").count(), 2);
    assert_eq!(calls.iter().filter(|c| *c == "update:x").count(), 2);
    assert_eq!(scene.frame_count(), 2);
}

#[test]
fn test_failing_behavior_does_not_stall_tick() {
    let mut scene = active_scene(|scene| {
        scene.spawn(
            EntityBuilder::new("broken")
                .at(50.0, 50.0)
                .velocity(10.0, 0.0)
                .dynamic()
                .behavior(Exploding),
        )?;
        scene.spawn(
            EntityBuilder::new("fine")
                .at(200.0, 50.0)
                .velocity(10.0, 0.0)
                .dynamic(),
        )?;
        Ok(())
    });

    scene.step(0.5, &no_input());

    assert!(approx_eq(scene.position("broken").unwrap().x, 55.0));
    assert!(approx_eq(scene.position("fine").unwrap().x, 205.0));
    assert_eq!(scene.frame_count(), 1);
}

#[test]
fn test_pursuit_never_exceeds_max_speed() {
    let mut scene = active_scene(|scene| {
        scene.spawn(EntityBuilder::new("duck").at(400.0, 300.0).size(20.0, 20.0))?;
        scene.spawn_batch(8, |i| {
            EntityBuilder::new(format!("fish{i}"))
                .at(50.0 + i as f32 * 30.0, 500.0)
                .size(8.0, 8.0)
                .dynamic()
                .max_speed(40.0)
                .behavior(Pursuit::new("duck", 500.0).with_seed(i as u64 + 1))
        })?;
        Ok(())
    });

    let duck = Vec2::new(410.0, 310.0);
    let start_distance = (scene.position("fish0").unwrap() + Vec2::splat(4.0)).distance(duck);
    for _ in 0..100 {
        scene.step(0.05, &no_input());
        for i in 0..8 {
            let speed = scene.velocity(&format!("fish{i}")).unwrap().length();
            assert!(speed <= 40.0 + EPSILON, "fish{i} too fast: {speed}");
        }
    }
    let end_distance = (scene.position("fish0").unwrap() + Vec2::splat(4.0)).distance(duck);
    assert!(end_distance < start_distance);
}

#[test]
fn test_pursuit_of_unknown_target_aborts_creation() {
    let mut scene = Scene::from_fn("hunt", |scene, _| {
        scene.spawn(EntityBuilder::new("fish").behavior(Pursuit::new("nobody", 10.0)))?;
        Ok(())
    });
    assert_eq!(
        scene.create(&GameConfig::default()),
        Err(EngineError::lookup("nobody"))
    );
}

#[test]
fn test_wave_disturbed_by_collision_then_settles() {
    let mut scene = active_scene(|scene| {
        scene.spawn(
            EntityBuilder::new("water")
                .at(0.0, 400.0)
                .size(800.0, 200.0)
                .behavior(WaveSimulator::new(40)),
        )?;
        scene.spawn(
            EntityBuilder::new("stone")
                .at(390.0, 395.0)
                .size(10.0, 10.0)
                .velocity(0.0, 200.0)
                .dynamic(),
        )?;
        Ok(())
    });

    scene.step(0.016, &no_input());

    let water = scene.lookup("water").unwrap();
    let displacement = |scene: &Scene| {
        scene
            .world()
            .get::<Behaviors>(water)
            .and_then(|b| b.get::<WaveSimulator>())
            .map(|w| w.max_displacement())
            .unwrap()
    };
    let stone = scene.lookup("stone").unwrap();
    scene.world_mut().get_mut::<EntityFlags>(stone).unwrap().active = false;
    for _ in 0..5 {
        scene.step(0.016, &no_input());
    }
    assert!(displacement(&scene) > 0.0);

    for _ in 0..3000 {
        scene.step(0.016, &no_input());
    }
    assert!(displacement(&scene) < 1e-3);
}

#[test]
fn test_spawn_rejects_degenerate_entities() {
    let mut scene = Scene::from_fn("bad", |scene, _| {
        scene.spawn(
            EntityBuilder::new("ghost")
                .material(Material::new(1.0, f32::NAN, 1.0))
                .dynamic(),
        )?;
        Ok(())
    });
    let err = scene.create(&GameConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::NumericDegeneracy { ref name, .. } if name == "ghost"));
}

#[test]
fn test_forces_do_not_persist_between_ticks() {
    let mut scene = active_scene(|scene| {
        scene.spawn(EntityBuilder::new("puck").at(400.0, 300.0).dynamic())?;
        Ok(())
    });
    let puck = scene.lookup("puck").unwrap();
    scene
        .world_mut()
        .get_mut::<RigidBody>(puck)
        .unwrap()
        .add_force(Vec2::new(100.0, 0.0));

    scene.step(0.1, &no_input());
    let after_push = scene.velocity("puck").unwrap();
    assert!(after_push.x > 0.0);
    scene.step(0.1, &no_input());
    assert_eq!(scene.velocity("puck").unwrap(), after_push);
}

// ==================== SCENE MANAGER ====================

fn hooked_scene(name: &'static str, log: Log) -> Scene {
    Scene::from_fn(name, move |scene, _| {
        scene.spawn(EntityBuilder::new("actor").behavior(Hooks {
            tag: name,
            log: log.clone(),
        }))?;
        Ok(())
    })
}

#[test]
fn test_switch_fires_end_then_start() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut manager = SceneManager::new(calm_config());
    manager.register(hooked_scene("menu", log.clone()));
    manager.register(hooked_scene("level", log.clone()));

    manager.switch_to("menu").unwrap();
    manager.switch_to("level").unwrap();
    manager.reset_active().unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["start:menu", "end:menu", "start:level", "end:level", "start:level"]
    );
    assert_eq!(manager.active_name(), Some("level"));
    assert!(manager.active().unwrap().lookup("actor").is_some());
}

#[test]
fn test_bad_config_aborts_switch() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut manager = SceneManager::new(calm_config());
    manager.register(hooked_scene("menu", log.clone()));
    manager.register(hooked_scene("level", log.clone()));
    manager.switch_to("menu").unwrap();

    manager.set_config(GameConfig {
        camera_tween: 3.0,
        ..calm_config()
    });
    let err = manager.switch_to("level").unwrap_err();

    assert!(matches!(err, EngineError::Configuration(_)));
    assert!(manager.active().is_none());
    assert_eq!(*log.lock().unwrap(), vec!["start:menu", "end:menu"]);
    let mut canvas = RecordingCanvas::default();
    assert!(!manager.tick(0.016, &no_input(), &mut canvas));
}

#[test]
fn test_unknown_scene_is_lookup_error() {
    let mut manager = SceneManager::new(calm_config());
    assert_eq!(manager.switch_to("credits"), Err(EngineError::lookup("credits")));
}

#[test]
fn test_assets_shared_across_scenes() {
    let mut manager = SceneManager::new(calm_config());
    let hud_scene = |name: &'static str| {
        Scene::from_fn(name, |scene, _| {
            scene.spawn(EntityBuilder::new("duck"))?;
            scene.spawn(
                EntityBuilder::new("hud")
                    .camera_attached()
                    .behavior(TrackerHud::new("duck").with_font("fonts/big.ttf", 20.0)),
            )?;
            Ok(())
        })
    };
    manager.register(hud_scene("one"));
    manager.register(hud_scene("two"));

    let handle_in = |manager: &SceneManager| {
        let scene = manager.active().unwrap();
        let hud = scene.lookup("hud").unwrap();
        scene
            .world()
            .get::<Behaviors>(hud)
            .and_then(|b| b.get::<TrackerHud>())
            .and_then(|h| h.font_handle())
            .unwrap()
    };

    manager.switch_to("one").unwrap();
    let first = handle_in(&manager);
    manager.switch_to("two").unwrap();
    let second = handle_in(&manager);
    assert_eq!(first, second);
}
