//! Per-entity behaviors.
//!
//! A [`Behavior`] is a bundle of optional hooks attached to an entity. Every
//! hook defaults to a no-op, so a behavior only implements what it needs.
//! Entities keep their behaviors in the [`Behaviors`] component; hooks run in
//! attachment order and a failing hook never stops the ones after it.
//!
//! Hook timing within a tick:
//! - `start` – once, when the scene becomes active
//! - `input` – once per tick, before physics
//! - `update` – once per tick, after the entity has been integrated
//! - `draw` – once per rendered frame
//! - `on_collision` – once per overlapping peer per tick
//! - `end` – once, when the scene is torn down
//!
//! Submodules overview:
//! - [`hud`] – camera-attached text reporting a peer's position
//! - [`keyboard`] – turns held keys into forces
//! - [`pursuit`] – steers toward a named target with randomized speed
//! - [`wave`] – 1-D damped mass-spring water surface

pub mod hud;
pub mod keyboard;
pub mod pursuit;
pub mod wave;

use std::any::Any;

use bevy_ecs::prelude::*;
use bevy_ecs::world::{EntityRef, EntityWorldMut};
use glam::Vec2;

use crate::error::EngineError;
use crate::render::Canvas;
use crate::resources::input::InputState;

pub type BehaviorResult = Result<(), EngineError>;

/// Downcasting support for behaviors stored as trait objects.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Custom logic attached to an entity.
///
/// Hooks receive the owning entity as an [`EntityWorldMut`], so they can
/// mutate its components and read the rest of the world through
/// [`EntityWorldMut::world`].
pub trait Behavior: AsAny + Send + Sync + 'static {
    /// Short name used in logs.
    fn label(&self) -> &'static str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("behavior")
    }

    fn start(&mut self, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        Ok(())
    }

    fn input(&mut self, _input: &InputState, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        Ok(())
    }

    fn update(&mut self, _entity: &mut EntityWorldMut<'_>, _dt: f32) -> BehaviorResult {
        Ok(())
    }

    /// `origin` is the entity's top-left corner in screen space.
    fn draw(&self, _canvas: &mut dyn Canvas, _entity: EntityRef<'_>, _origin: Vec2) -> BehaviorResult {
        Ok(())
    }

    fn on_collision(&mut self, _entity: &mut EntityWorldMut<'_>, _other: Entity) -> BehaviorResult {
        Ok(())
    }

    fn end(&mut self, _entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        Ok(())
    }
}

/// Ordered list of behaviors attached to one entity.
#[derive(Component, Default)]
pub struct Behaviors(pub Vec<Box<dyn Behavior>>);

impl Behaviors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, behavior: impl Behavior) -> Self {
        self.push(behavior);
        self
    }

    pub fn push(&mut self, behavior: impl Behavior) {
        self.0.push(Box::new(behavior));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First attached behavior of type `T`.
    pub fn get<T: Behavior>(&self) -> Option<&T> {
        self.0
            .iter()
            .find_map(|behavior| (**behavior).as_any().downcast_ref::<T>())
    }

    /// First attached behavior of type `T`, mutably.
    pub fn get_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        self.0
            .iter_mut()
            .find_map(|behavior| (**behavior).as_any_mut().downcast_mut::<T>())
    }
}

impl std::fmt::Debug for Behaviors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|behavior| behavior.label()))
            .finish()
    }
}
