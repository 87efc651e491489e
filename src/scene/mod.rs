//! Scenes and their lifecycle.
//!
//! A [`Scene`] owns one ECS [`World`] holding its entities, the
//! [`PhysicsWorld`], the optional [`Camera2D`] and the name index. Its
//! content comes from a [`SceneSetup`] that runs on every `create`, so a
//! scene can be torn down and rebuilt from scratch at any time.
//!
//! State machine: `Unloaded -> create() -> Active -> dispose() -> Unloaded`,
//! with `reset()` as dispose + create. Every tick runs these phases in order:
//!
//! 1. advance [`WorldTime`], then the scene's own [`SceneSetup::input`]
//! 2. behavior `input`
//! 3. integrate dynamic bodies
//! 4. behavior `update` (all active entities)
//! 5. place children, move the camera
//! 6. detect collisions, then dispatch `on_collision` both ways
//! 7. render through the [`Canvas`]
//! 8. drop the forces consumed this tick
//!
//! Submodules overview:
//! - [`builder`] – by-value [`EntityBuilder`]
//! - [`layout`] – JSON scene layouts
//! - [`manager`] – name-keyed registry with one active scene

pub mod builder;
pub mod layout;
pub mod manager;

use std::sync::Arc;

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error, info, warn};

use crate::components::boxcollider::BoxCollider;
use crate::components::cameraattached::CameraAttached;
use crate::components::flags::EntityFlags;
use crate::components::identity::{EntityId, EntityName};
use crate::components::localoffset::LocalOffset;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;
use crate::error::EngineError;
use crate::events::collision::CollisionEvents;
use crate::render::{Canvas, NullCanvas, render_scene};
use crate::resources::assetstore::AssetStore;
use crate::resources::camera2d::Camera2D;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::physicsworld::{Area, PhysicsWorld};
use crate::resources::sceneindex::SceneIndex;
use crate::resources::worldtime::WorldTime;
use crate::systems::behaviors::{
    dispatch_collisions, run_behavior_end, run_behavior_input, run_behavior_start,
    run_behavior_update, with_behaviors,
};
use crate::systems::camera::follow_camera;
use crate::systems::collision::detect_collisions;
use crate::systems::hierarchy::propagate_children;
use crate::systems::physics::{clear_pending_forces, integrate_bodies};
use crate::systems::time::update_world_time;

pub use builder::EntityBuilder;
pub use layout::SceneLayout;
pub use manager::SceneManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    Unloaded,
    Active,
}

/// Populates a scene. Runs on every `create`/`reset`.
pub trait SceneSetup: Send + Sync {
    fn build(&self, scene: &mut Scene, config: &GameConfig) -> Result<(), EngineError>;

    /// Scene-wide input handling, run before any behavior sees the input.
    fn input(&self, _world: &mut World, _input: &InputState) -> Result<(), EngineError> {
        Ok(())
    }
}

impl<F> SceneSetup for F
where
    F: Fn(&mut Scene, &GameConfig) -> Result<(), EngineError> + Send + Sync,
{
    fn build(&self, scene: &mut Scene, config: &GameConfig) -> Result<(), EngineError> {
        self(scene, config)
    }
}

/// Per-world schedules. Systems bind to the world they first run on, so a
/// new set is built for every fresh world.
struct SceneSchedules {
    physics: Schedule,
    late: Schedule,
    collisions: Schedule,
    post: Schedule,
}

impl SceneSchedules {
    fn new() -> Self {
        let mut physics = Schedule::default();
        physics.add_systems(integrate_bodies);

        let mut late = Schedule::default();
        late.add_systems((propagate_children, follow_camera).chain());

        let mut collisions = Schedule::default();
        collisions.add_systems(detect_collisions);

        let mut post = Schedule::default();
        post.add_systems(clear_pending_forces);

        Self {
            physics,
            late,
            collisions,
            post,
        }
    }
}

pub struct Scene {
    name: String,
    state: SceneState,
    world: World,
    schedules: SceneSchedules,
    setup: Arc<dyn SceneSetup>,
    config: GameConfig,
    next_id: u64,
}

impl Scene {
    pub fn new(name: impl Into<String>, setup: impl SceneSetup + 'static) -> Self {
        Self {
            name: name.into(),
            state: SceneState::Unloaded,
            world: World::new(),
            schedules: SceneSchedules::new(),
            setup: Arc::new(setup),
            config: GameConfig::default(),
            next_id: 0,
        }
    }

    /// Scene built by a plain function or closure.
    pub fn from_fn<F>(name: impl Into<String>, setup: F) -> Self
    where
        F: Fn(&mut Scene, &GameConfig) -> Result<(), EngineError> + Send + Sync + 'static,
    {
        Self::new(name, setup)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SceneState::Active
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Install the asset cache to use from the next `create` on.
    pub fn provide_assets(&mut self, assets: AssetStore) {
        self.world.insert_resource(assets);
    }

    /// Take the asset cache out of the scene.
    pub fn take_assets(&mut self) -> Option<AssetStore> {
        self.world.remove_resource::<AssetStore>()
    }

    /// Build the scene from its setup and fire `start` on every behavior.
    ///
    /// A failing setup or `start` hook aborts activation: the scene stays
    /// unloaded and the error is returned.
    pub fn create(&mut self, config: &GameConfig) -> Result<(), EngineError> {
        if self.is_active() {
            self.dispose();
        }
        config.validate()?;
        self.config = config.clone();
        self.install_resources(config);

        let setup = Arc::clone(&self.setup);
        let built = setup
            .build(self, config)
            .and_then(|()| run_behavior_start(&mut self.world));
        if let Err(err) = built {
            error!("Scene '{}' failed to activate: {}", self.name, err);
            self.clear_world();
            return Err(err);
        }

        self.state = SceneState::Active;
        info!(
            "Scene '{}' active with {} entities",
            self.name,
            self.entity_count()
        );
        Ok(())
    }

    /// Fire `end` on every behavior and drop all scene content.
    ///
    /// The asset cache survives so the next `create` can reuse it.
    pub fn dispose(&mut self) {
        if !self.is_active() {
            return;
        }
        run_behavior_end(&mut self.world);
        self.clear_world();
        self.state = SceneState::Unloaded;
        info!("Scene '{}' disposed", self.name);
    }

    /// Dispose and create again with the configuration of the last `create`.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        let config = self.config.clone();
        self.dispose();
        self.create(&config)
    }

    fn install_resources(&mut self, config: &GameConfig) {
        let assets = self.take_assets().unwrap_or_default();
        self.world = World::new();
        self.schedules = SceneSchedules::new();
        self.world.insert_resource(assets);
        self.world.insert_resource(
            PhysicsWorld::new(config.world_width, config.world_height, config.gravity)
                .with_max_velocity(config.max_velocity),
        );
        self.world.insert_resource(WorldTime::default());
        self.world.insert_resource(SceneIndex::starting_at(self.next_id));
        self.world.insert_resource(CollisionEvents::default());
        self.world.insert_resource(config.clone());
    }

    fn clear_world(&mut self) {
        if let Some(index) = self.world.get_resource::<SceneIndex>() {
            self.next_id = index.next_id();
        }
        let assets = self.take_assets();
        self.world = World::new();
        self.schedules = SceneSchedules::new();
        if let Some(assets) = assets {
            self.world.insert_resource(assets);
        }
    }

    fn index(&self) -> Result<&SceneIndex, EngineError> {
        self.world
            .get_resource::<SceneIndex>()
            .ok_or_else(|| EngineError::config(format!("scene '{}' is not loaded", self.name)))
    }

    /// Validate and insert an entity.
    ///
    /// A name already in use replaces the previous entity: its children are
    /// re-parented to the new one and a camera following it keeps following
    /// the replacement. World-space entities larger than the world are
    /// rejected. Entities spawned into an active scene get their `start`
    /// hooks right away.
    pub fn spawn(&mut self, builder: EntityBuilder) -> Result<Entity, EngineError> {
        builder.validate()?;
        let index = self.index()?;
        let previous = index.get(&builder.name);
        let parent = match &builder.parent {
            Some((parent_name, offset)) => {
                if *parent_name == builder.name {
                    return Err(EngineError::config(format!(
                        "entity '{}' cannot be its own parent",
                        builder.name
                    )));
                }
                let parent = index.require(parent_name)?;
                if previous.is_some_and(|old| is_descendant(&self.world, parent, old)) {
                    return Err(EngineError::config(format!(
                        "entity '{}' cannot replace an ancestor of its parent '{}'",
                        builder.name, parent_name
                    )));
                }
                Some((parent, *offset))
            }
            None => None,
        };
        if !builder.camera_attached {
            self.check_fits_world(&builder)?;
        }

        let EntityBuilder {
            name,
            position,
            size,
            velocity,
            mass,
            material,
            kind,
            priority,
            shape,
            max_speed,
            camera_attached,
            active,
            behaviors,
            ..
        } = builder;

        let id = self.world.resource_mut::<SceneIndex>().allocate_id();
        let mut body = RigidBody::with_mass(mass);
        body.velocity = velocity;
        body.max_speed = max_speed;

        let entity = {
            let mut entity_mut = self.world.spawn((
                EntityName(name.clone()),
                EntityId(id),
                MapPosition::from_vec(position),
                BoxCollider { size },
                body,
                material,
                kind,
                EntityFlags {
                    active,
                    contact: false,
                },
                ZIndex(priority),
                behaviors,
            ));
            if let Some(shape) = shape {
                entity_mut.insert(shape);
            }
            if camera_attached {
                entity_mut.insert(CameraAttached);
            }
            entity_mut.id()
        };

        if let Some((parent, offset)) = parent {
            if let Err(err) = self.link_child(parent, entity, offset) {
                self.world.despawn(entity);
                return Err(err);
            }
        }

        let replaced = self.world.resource_mut::<SceneIndex>().insert(name.clone(), entity);
        if let Some(old) = replaced {
            warn!("Entity name '{}' reused in scene '{}'; replacing {:?}", name, self.name, old);
            self.replace_entity(old, entity);
        }

        debug!("Spawned '{}' as {:?} (id {})", name, entity, id);

        if self.is_active() {
            with_behaviors(&mut self.world, entity, "start", |behavior, entity_mut| {
                behavior.start(entity_mut)
            });
        }
        Ok(entity)
    }

    /// Reject world-space entities that cannot fit inside the world bounds.
    fn check_fits_world(&self, builder: &EntityBuilder) -> Result<(), EngineError> {
        let Some(physics) = self.physics() else {
            return Ok(());
        };
        let world_size = physics.bounds.size;
        if builder.size.x > world_size.x || builder.size.y > world_size.y {
            return Err(EngineError::degenerate(
                &builder.name,
                format!("size {} exceeds the world size {}", builder.size, world_size),
            ));
        }
        Ok(())
    }

    /// Hand the children and the camera of `old` over to `new`, then despawn `old`.
    fn replace_entity(&mut self, old: Entity, new: Entity) {
        let children: Vec<Entity> = self
            .world
            .get::<Children>(old)
            .map(|children| children.iter().collect())
            .unwrap_or_default();
        for child in children {
            if let Ok(mut child_mut) = self.world.get_entity_mut(child) {
                child_mut.insert(ChildOf(new));
            }
        }
        if let Some(mut camera) = self.world.get_resource_mut::<Camera2D>() {
            if camera.target == old {
                camera.target = new;
            }
        }
        self.world.despawn(old);
    }

    /// Spawn `count` entities produced by `make(i)`.
    pub fn spawn_batch<F>(&mut self, count: usize, mut make: F) -> Result<Vec<Entity>, EngineError>
    where
        F: FnMut(usize) -> EntityBuilder,
    {
        let mut spawned = Vec::with_capacity(count);
        for i in 0..count {
            spawned.push(self.spawn(make(i))?);
        }
        Ok(spawned)
    }

    /// Parse a JSON [`SceneLayout`] and add its areas and entities.
    pub fn spawn_layout(&mut self, json: &str) -> Result<Vec<Entity>, EngineError> {
        let layout = SceneLayout::from_json(json)?;
        self.apply_layout(&layout)
    }

    pub fn apply_layout(&mut self, layout: &SceneLayout) -> Result<Vec<Entity>, EngineError> {
        for area in layout.areas.iter() {
            self.add_area(area.to_area()?)?;
        }
        layout
            .entities
            .iter()
            .map(|descriptor| self.spawn(descriptor.to_builder()))
            .collect()
    }

    pub fn add_area(&mut self, area: Area) -> Result<(), EngineError> {
        let mut physics = self
            .world
            .get_resource_mut::<PhysicsWorld>()
            .ok_or_else(|| EngineError::config(format!("scene '{}' is not loaded", self.name)))?;
        physics.add_area(area);
        Ok(())
    }

    pub fn physics(&self) -> Option<&PhysicsWorld> {
        self.world.get_resource::<PhysicsWorld>()
    }

    pub fn physics_mut(&mut self) -> Option<Mut<'_, PhysicsWorld>> {
        self.world.get_resource_mut::<PhysicsWorld>()
    }

    /// Install the camera, centered on `target` from the start.
    pub fn follow(&mut self, target: &str, viewport: Vec2, tween: f32) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&tween) {
            return Err(EngineError::config(format!(
                "camera tween must be within [0, 1], got {tween}"
            )));
        }
        if !viewport.is_finite() || viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Err(EngineError::config(format!(
                "camera viewport must be positive, got {viewport}"
            )));
        }
        let entity = self.index()?.require(target)?;
        let mut camera = Camera2D::new(entity, viewport, tween);
        if let Some(pos) = self.world.get::<MapPosition>(entity) {
            let size = self
                .world
                .get::<BoxCollider>(entity)
                .map(|c| c.size)
                .unwrap_or(Vec2::ZERO);
            camera.pos = camera.centered_on(pos.pos, size);
        }
        self.world.insert_resource(camera);
        Ok(())
    }

    pub fn camera(&self) -> Option<&Camera2D> {
        self.world.get_resource::<Camera2D>()
    }

    /// Make `child` follow `parent` at `offset`.
    pub fn attach_child(&mut self, parent: &str, child: &str, offset: Vec2) -> Result<(), EngineError> {
        let index = self.index()?;
        let parent_entity = index.require(parent)?;
        let child_entity = index.require(child)?;
        if is_descendant(&self.world, parent_entity, child_entity) {
            return Err(EngineError::config(format!(
                "attaching '{child}' to '{parent}' would create a cycle"
            )));
        }
        self.link_child(parent_entity, child_entity, offset)
    }

    fn link_child(&mut self, parent: Entity, child: Entity, offset: Vec2) -> Result<(), EngineError> {
        let parent_pos = self
            .world
            .get::<MapPosition>(parent)
            .map(|p| p.pos)
            .ok_or_else(|| EngineError::lookup(format!("{parent:?}")))?;
        let mut child_mut = self
            .world
            .get_entity_mut(child)
            .map_err(|_| EngineError::lookup(format!("{child:?}")))?;
        child_mut.insert((
            ChildOf(parent),
            LocalOffset(offset),
            MapPosition::from_vec(parent_pos + offset),
        ));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Entity> {
        self.world.get_resource::<SceneIndex>()?.get(name)
    }

    pub fn position(&self, name: &str) -> Option<Vec2> {
        let entity = self.lookup(name)?;
        self.world.get::<MapPosition>(entity).map(|p| p.pos)
    }

    pub fn velocity(&self, name: &str) -> Option<Vec2> {
        let entity = self.lookup(name)?;
        self.world.get::<RigidBody>(entity).map(|rb| rb.velocity)
    }

    pub fn is_contact(&self, name: &str) -> Option<bool> {
        let entity = self.lookup(name)?;
        self.world.get::<EntityFlags>(entity).map(|f| f.contact)
    }

    pub fn entity_count(&self) -> usize {
        self.world
            .get_resource::<SceneIndex>()
            .map(|index| index.len())
            .unwrap_or(0)
    }

    pub fn frame_count(&self) -> u64 {
        self.world
            .get_resource::<WorldTime>()
            .map(|time| time.frame_count)
            .unwrap_or(0)
    }

    /// Collision pairs found during the last tick.
    pub fn collisions(&self) -> Option<&CollisionEvents> {
        self.world.get_resource::<CollisionEvents>()
    }

    /// Run one full tick. Does nothing while unloaded.
    pub fn tick(&mut self, dt: f32, input: &InputState, canvas: &mut dyn Canvas) {
        if !self.is_active() {
            debug!("Tick on unloaded scene '{}' ignored", self.name);
            return;
        }
        let world = &mut self.world;
        update_world_time(world, dt);
        if let Err(err) = self.setup.input(world, input) {
            error!("Scene '{}' input failed: {}", self.name, err);
        }
        run_behavior_input(world, input);
        self.schedules.physics.run(world);
        run_behavior_update(world);
        self.schedules.late.run(world);
        self.schedules.collisions.run(world);
        dispatch_collisions(world);
        render_scene(world, canvas);
        self.schedules.post.run(world);
    }

    /// [`Scene::tick`] without rendering.
    pub fn step(&mut self, dt: f32, input: &InputState) {
        self.tick(dt, input, &mut NullCanvas);
    }
}

/// True when `entity` is `ancestor` or sits somewhere below it.
fn is_descendant(world: &World, entity: Entity, ancestor: Entity) -> bool {
    let mut current = entity;
    loop {
        if current == ancestor {
            return true;
        }
        match world.get::<ChildOf>(current) {
            Some(child_of) => current = child_of.parent(),
            None => return false,
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("entities", &self.entity_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::{Behavior, BehaviorResult};
    use crate::components::physickind::PhysicKind;
    use bevy_ecs::world::EntityWorldMut;
    use std::sync::Mutex;

    fn empty_scene() -> Scene {
        Scene::from_fn("empty", |_, _| Ok(()))
    }

    fn loaded_scene() -> Scene {
        let mut scene = empty_scene();
        scene.create(&GameConfig::default()).unwrap();
        scene
    }

    // ==================== SPAWN TESTS ====================

    #[test]
    fn test_spawn_assigns_monotonic_ids() {
        let mut scene = loaded_scene();
        let a = scene.spawn(EntityBuilder::new("a")).unwrap();
        let b = scene.spawn(EntityBuilder::new("b")).unwrap();
        let id_a = scene.world().get::<EntityId>(a).unwrap().0;
        let id_b = scene.world().get::<EntityId>(b).unwrap().0;
        assert!(id_b > id_a);
        assert_eq!(scene.entity_count(), 2);
    }

    #[test]
    fn test_duplicate_name_replaces_entity() {
        let mut scene = loaded_scene();
        let first = scene.spawn(EntityBuilder::new("duck").at(1.0, 1.0)).unwrap();
        let second = scene.spawn(EntityBuilder::new("duck").at(9.0, 9.0)).unwrap();
        assert_eq!(scene.lookup("duck"), Some(second));
        assert!(scene.world().get_entity(first).is_err());
        assert_eq!(scene.position("duck"), Some(Vec2::new(9.0, 9.0)));
        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn test_spawn_rejects_degenerate_mass() {
        let mut scene = loaded_scene();
        let err = scene.spawn(EntityBuilder::new("bad").mass(0.0)).unwrap_err();
        assert!(matches!(err, EngineError::NumericDegeneracy { .. }));
        assert!(scene.lookup("bad").is_none());
    }

    #[test]
    fn test_spawn_before_create_fails() {
        let mut scene = empty_scene();
        assert!(scene.spawn(EntityBuilder::new("early")).is_err());
    }

    #[test]
    fn test_spawn_batch() {
        let mut scene = loaded_scene();
        let spawned = scene
            .spawn_batch(5, |i| EntityBuilder::new(format!("pebble{i}")).at(i as f32 * 10.0, 0.0))
            .unwrap();
        assert_eq!(spawned.len(), 5);
        assert_eq!(scene.position("pebble3"), Some(Vec2::new(30.0, 0.0)));
    }

    #[test]
    fn test_child_follows_parent_position() {
        let mut scene = loaded_scene();
        scene
            .spawn(
                EntityBuilder::new("boat")
                    .at(100.0, 100.0)
                    .size(10.0, 10.0)
                    .velocity(60.0, 0.0)
                    .dynamic(),
            )
            .unwrap();
        scene
            .spawn(EntityBuilder::new("mast").child_of("boat", Vec2::new(4.0, -8.0)))
            .unwrap();
        assert_eq!(scene.position("mast"), Some(Vec2::new(104.0, 92.0)));

        scene.physics_mut().unwrap().gravity = 0.0;
        scene.step(0.5, &InputState::default());
        let boat = scene.position("boat").unwrap();
        assert_eq!(scene.position("mast"), Some(boat + Vec2::new(4.0, -8.0)));
    }

    #[test]
    fn test_unknown_parent_is_lookup_error() {
        let mut scene = loaded_scene();
        let err = scene
            .spawn(EntityBuilder::new("mast").child_of("boat", Vec2::ZERO))
            .unwrap_err();
        assert_eq!(err, EngineError::lookup("boat"));
    }

    #[test]
    fn test_replacing_parent_keeps_children() {
        let mut scene = loaded_scene();
        scene.spawn(EntityBuilder::new("boat").at(100.0, 100.0)).unwrap();
        scene
            .spawn(EntityBuilder::new("mast").child_of("boat", Vec2::new(4.0, -8.0)))
            .unwrap();
        let boat = scene.spawn(EntityBuilder::new("boat").at(300.0, 200.0)).unwrap();

        let mast = scene.lookup("mast").unwrap();
        assert!(scene.world().get_entity(mast).is_ok());
        assert_eq!(scene.world().get::<ChildOf>(mast).map(|c| c.parent()), Some(boat));
        assert_eq!(scene.entity_count(), 2);

        scene.step(0.016, &InputState::default());
        assert_eq!(scene.position("mast"), Some(Vec2::new(304.0, 192.0)));
        assert!(scene.attach_child("boat", "mast", Vec2::new(1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_self_named_parent_is_rejected() {
        let mut scene = loaded_scene();
        let x = scene.spawn(EntityBuilder::new("x")).unwrap();
        let err = scene
            .spawn(EntityBuilder::new("x").child_of("x", Vec2::ZERO))
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert_eq!(scene.lookup("x"), Some(x));
        assert!(scene.world().get_entity(x).is_ok());
        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn test_replacing_ancestor_of_parent_is_rejected() {
        let mut scene = loaded_scene();
        let boat = scene.spawn(EntityBuilder::new("boat")).unwrap();
        scene
            .spawn(EntityBuilder::new("mast").child_of("boat", Vec2::ZERO))
            .unwrap();
        assert!(
            scene
                .spawn(EntityBuilder::new("boat").child_of("mast", Vec2::ZERO))
                .is_err()
        );
        assert_eq!(scene.lookup("boat"), Some(boat));
        assert_eq!(scene.entity_count(), 2);
    }

    #[test]
    fn test_attach_child_rejects_cycles() {
        let mut scene = loaded_scene();
        scene.spawn(EntityBuilder::new("boat")).unwrap();
        scene
            .spawn(EntityBuilder::new("mast").child_of("boat", Vec2::ZERO))
            .unwrap();
        assert!(matches!(
            scene.attach_child("mast", "boat", Vec2::ZERO),
            Err(EngineError::Configuration(_))
        ));
        assert!(scene.attach_child("boat", "boat", Vec2::ZERO).is_err());
        assert_eq!(
            scene.attach_child("boat", "sail", Vec2::ZERO),
            Err(EngineError::lookup("sail"))
        );
    }

    #[test]
    fn test_entity_larger_than_world_is_rejected() {
        let mut scene = loaded_scene();
        let err = scene
            .spawn(EntityBuilder::new("whale").size(900.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, EngineError::NumericDegeneracy { ref name, .. } if name == "whale"));
        assert!(scene.lookup("whale").is_none());
        // camera space is not bounded by the world
        assert!(
            scene
                .spawn(EntityBuilder::new("banner").size(900.0, 10.0).camera_attached())
                .is_ok()
        );
    }

    // ==================== CAMERA TESTS ====================

    #[test]
    fn test_camera_follows_replaced_target() {
        let mut scene = loaded_scene();
        scene
            .spawn(EntityBuilder::new("player").at(400.0, 300.0).size(20.0, 20.0))
            .unwrap();
        scene.follow("player", Vec2::new(320.0, 240.0), 1.0).unwrap();
        let player = scene
            .spawn(EntityBuilder::new("player").at(100.0, 100.0).size(20.0, 20.0))
            .unwrap();
        assert_eq!(scene.camera().unwrap().target, player);

        scene.step(0.016, &InputState::default());
        assert_eq!(scene.camera().unwrap().pos, Vec2::new(-50.0, -10.0));
    }

    #[test]
    fn test_follow_validates_target_and_tween() {
        let mut scene = loaded_scene();
        scene
            .spawn(EntityBuilder::new("player").at(400.0, 300.0).size(20.0, 20.0))
            .unwrap();
        assert_eq!(
            scene.follow("ghost", Vec2::new(320.0, 240.0), 1.0),
            Err(EngineError::lookup("ghost"))
        );
        assert!(matches!(
            scene.follow("player", Vec2::new(320.0, 240.0), 1.5),
            Err(EngineError::Configuration(_))
        ));
        scene.follow("player", Vec2::new(320.0, 240.0), 1.0).unwrap();
        assert_eq!(scene.camera().unwrap().pos, Vec2::new(250.0, 190.0));
    }

    // ==================== LIFECYCLE TESTS ====================

    struct Lifecycle(Arc<Mutex<Vec<&'static str>>>);

    impl Behavior for Lifecycle {
        fn start(&mut self, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
            self.0.lock().unwrap().push("start");
            Ok(())
        }

        fn end(&mut self, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
            self.0.lock().unwrap().push("end");
            Ok(())
        }
    }

    #[test]
    fn test_create_dispose_reset_fire_hooks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let setup_log = log.clone();
        let mut scene = Scene::from_fn("life", move |scene, _| {
            scene.spawn(EntityBuilder::new("thing").behavior(Lifecycle(setup_log.clone())))?;
            Ok(())
        });

        scene.create(&GameConfig::default()).unwrap();
        assert!(scene.is_active());
        scene.reset().unwrap();
        scene.dispose();
        assert_eq!(scene.state(), SceneState::Unloaded);
        assert_eq!(scene.entity_count(), 0);
        assert_eq!(*log.lock().unwrap(), vec!["start", "end", "start", "end"]);
    }

    #[test]
    fn test_failed_setup_leaves_scene_unloaded() {
        let mut scene = Scene::from_fn("broken", |scene, _| {
            scene.spawn(EntityBuilder::new("player"))?;
            scene.follow("nobody", Vec2::new(100.0, 100.0), 1.0)
        });
        let err = scene.create(&GameConfig::default()).unwrap_err();
        assert_eq!(err, EngineError::lookup("nobody"));
        assert_eq!(scene.state(), SceneState::Unloaded);
        assert!(scene.lookup("player").is_none());
    }

    #[test]
    fn test_ids_stay_monotonic_across_reset() {
        let mut scene = Scene::from_fn("ids", |scene, _| {
            scene.spawn(EntityBuilder::new("a"))?;
            Ok(())
        });
        scene.create(&GameConfig::default()).unwrap();
        let before = scene.world().get::<EntityId>(scene.lookup("a").unwrap()).unwrap().0;
        scene.reset().unwrap();
        let after = scene.world().get::<EntityId>(scene.lookup("a").unwrap()).unwrap().0;
        assert!(after > before);
    }

    #[test]
    fn test_assets_survive_reset() {
        let mut scene = loaded_scene();
        scene
            .world_mut()
            .resource_mut::<AssetStore>()
            .get("fonts/mono.ttf")
            .unwrap();
        scene.reset().unwrap();
        assert!(scene.world().resource::<AssetStore>().cached("fonts/mono.ttf").is_some());
    }

    #[test]
    fn test_layout_spawns_areas_and_entities() {
        let mut scene = loaded_scene();
        let spawned = scene
            .spawn_layout(
                r#"{
                    "areas": [ { "name": "mud", "position": [0, 0], "size": [50, 50] } ],
                    "entities": [ { "name": "rock", "position": [5, 5], "size": [4, 4], "kind": "static" } ]
                }"#,
            )
            .unwrap();
        assert_eq!(spawned.len(), 1);
        assert_eq!(scene.physics().unwrap().areas.len(), 1);
        let rock = scene.lookup("rock").unwrap();
        assert_eq!(scene.world().get::<PhysicKind>(rock), Some(&PhysicKind::Static));
        assert!(matches!(
            scene.spawn_layout("not json"),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_tick_on_unloaded_scene_is_noop() {
        let mut scene = empty_scene();
        scene.step(0.016, &InputState::default());
        assert_eq!(scene.frame_count(), 0);
    }
}
