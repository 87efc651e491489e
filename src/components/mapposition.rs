//! World-space position component.
//!
//! The [`MapPosition`] component stores the top-left corner of an entity's
//! bounding box in world units. Together with
//! [`BoxCollider`](super::boxcollider::BoxCollider) it defines the entity's
//! AABB. Y grows downwards.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position (top-left corner) of an entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    /// Create a MapPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    /// Create a MapPosition from an existing vector.
    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }
}
