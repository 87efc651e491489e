//! Scene camera resource.
//!
//! The camera has no physics of its own: its position is derived every tick
//! from the entity it follows by
//! [`follow_camera`](crate::systems::camera::follow_camera). Render passes
//! subtract [`Camera2D::pos`] from world positions, except for
//! [`CameraAttached`](crate::components::cameraattached::CameraAttached)
//! entities which are already in camera space.

use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec2;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    /// Top-left corner of the viewport in world units.
    pub pos: Vec2,
    /// Viewport size in world units.
    pub size: Vec2,
    /// Followed entity (non-owning).
    pub target: Entity,
    /// 1.0 = hard lock, smaller values close the gap gradually.
    pub tween: f32,
}

impl Camera2D {
    pub fn new(target: Entity, size: Vec2, tween: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            target,
            tween,
        }
    }

    /// Camera position that centers a target of `target_size` at `target_pos`.
    pub fn centered_on(&self, target_pos: Vec2, target_size: Vec2) -> Vec2 {
        target_pos - (self.size - target_size) * 0.5
    }

    /// Convert a world position into camera-local coordinates.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }
}
