//! Collision event types.
//!
//! The collision detector records one [`CollisionEvent`] per overlapping
//! unordered pair into the [`CollisionEvents`] resource. The dispatcher then
//! notifies the behaviors of both participants, `a` first. The buffer is
//! rebuilt from scratch every tick; nothing is remembered between ticks.

use bevy_ecs::prelude::*;

/// Two entities whose AABBs overlap this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

impl CollisionEvent {
    /// True when the pair is (x, y) in either order.
    pub fn involves(&self, x: Entity, y: Entity) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Pairs found by the last collision pass.
#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionEvents {
    pub pairs: Vec<CollisionEvent>,
}

impl CollisionEvents {
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True when the given entities collided during the last pass.
    pub fn contains(&self, x: Entity, y: Entity) -> bool {
        self.pairs.iter().any(|pair| pair.involves(x, y))
    }
}
