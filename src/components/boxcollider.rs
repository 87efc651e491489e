use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::resources::physicsworld::Rect;

/// Extent of an entity in world units.
///
/// The entity's AABB spans from its [`MapPosition`](super::mapposition::MapPosition)
/// to `pos + size`. A zero size makes the entity a point, which never overlaps
/// anything but can still be contained by areas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Component)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// The collider AABB for a given entity position.
    pub fn aabb(&self, position: Vec2) -> Rect {
        Rect::new(position, self.size)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.aabb(position).overlaps(&other.aabb(other_position))
    }
}
