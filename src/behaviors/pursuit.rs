//! Pursuit steering behavior.
//!
//! Each tick the follower points its velocity at the center of a named
//! target. The speed is `base_speed` scaled by a random factor in
//! `[MIN_FACTOR, MAX_FACTOR]`, then capped by the follower's own
//! [`RigidBody::max_speed`], which gives swarms a jittery, organic look.

use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityWorldMut;
use fastrand::Rng;
use glam::Vec2;

use super::{Behavior, BehaviorResult};
use crate::components::boxcollider::BoxCollider;
use crate::components::identity::EntityName;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::error::EngineError;
use crate::resources::sceneindex::SceneIndex;

pub const MIN_FACTOR: f32 = 0.5;
pub const MAX_FACTOR: f32 = 1.6;

#[derive(Debug, Clone)]
pub struct Pursuit {
    /// Name of the entity to chase; resolved on `start`.
    pub target_name: String,
    pub base_speed: f32,
    target: Option<Entity>,
    rng: Rng,
}

fn center_of(world: &World, entity: Entity) -> Option<Vec2> {
    let position = world.get::<MapPosition>(entity)?;
    let size = world
        .get::<BoxCollider>(entity)
        .map(|c| c.size)
        .unwrap_or(Vec2::ZERO);
    Some(position.pos + size * 0.5)
}

impl Pursuit {
    pub fn new(target_name: impl Into<String>, base_speed: f32) -> Self {
        Self {
            target_name: target_name.into(),
            base_speed,
            target: None,
            rng: Rng::new(),
        }
    }

    /// Use a fixed random seed (deterministic runs).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    fn next_factor(&mut self) -> f32 {
        MIN_FACTOR + self.rng.f32() * (MAX_FACTOR - MIN_FACTOR)
    }

    /// Velocity pointing from `from` to `to` with a randomized magnitude.
    fn steer(&mut self, from: Vec2, to: Vec2, max_speed: Option<f32>) -> Vec2 {
        let direction = (to - from).normalize_or_zero();
        let mut speed = self.base_speed * self.next_factor();
        if let Some(max_speed) = max_speed {
            speed = speed.min(max_speed);
        }
        direction * speed
    }
}

impl Behavior for Pursuit {
    fn start(&mut self, entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        let target = entity
            .world()
            .get_resource::<SceneIndex>()
            .and_then(|index| index.get(&self.target_name))
            .ok_or_else(|| EngineError::lookup(&self.target_name))?;
        if target == entity.id() {
            let name = entity
                .get::<EntityName>()
                .map(|n| n.0.clone())
                .unwrap_or_default();
            return Err(EngineError::behavior(
                self.label(),
                format!("'{name}' cannot pursue itself"),
            ));
        }
        self.target = Some(target);
        Ok(())
    }

    fn update(&mut self, entity: &mut EntityWorldMut<'_>, _dt: f32) -> BehaviorResult {
        let Some(target) = self.target else {
            return Ok(());
        };
        let Some(goal) = center_of(entity.world(), target) else {
            return Err(EngineError::lookup(&self.target_name));
        };
        let Some(here) = center_of(entity.world(), entity.id()) else {
            return Ok(());
        };
        let max_speed = entity.get::<RigidBody>().and_then(|rb| rb.max_speed);
        let velocity = self.steer(here, goal, max_speed);
        if let Some(mut body) = entity.get_mut::<RigidBody>() {
            body.velocity = velocity;
        }
        Ok(())
    }
}
