//! Pairwise collision detection.
//!
//! [`detect_collisions`] tests every unordered pair of active, world-space
//! entities for AABB overlap and records the hits into
//! [`CollisionEvents`]. It runs after integration so it always sees the
//! positions of the whole tick. Dispatch to behaviors happens in
//! [`dispatch_collisions`](crate::systems::behaviors::dispatch_collisions).
//!
//! The test is O(n²) per tick; nothing is cached between ticks.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::cameraattached::CameraAttached;
use crate::components::flags::EntityFlags;
use crate::components::mapposition::MapPosition;
use crate::events::collision::{CollisionEvent, CollisionEvents};

pub fn detect_collisions(
    query: Query<(Entity, &MapPosition, &BoxCollider, &EntityFlags), Without<CameraAttached>>,
    mut events: ResMut<CollisionEvents>,
) {
    events.clear();

    for [
        (entity_a, position_a, collider_a, flags_a),
        (entity_b, position_b, collider_b, flags_b),
    ] in query.iter_combinations()
    {
        if !flags_a.active || !flags_b.active {
            continue;
        }
        if collider_a.overlaps(position_a.pos, collider_b, position_b.pos) {
            events.pairs.push(CollisionEvent {
                a: entity_a,
                b: entity_b,
            });
        }
    }

    if !events.is_empty() {
        log::debug!("{} collision pair(s) this tick", events.len());
    }
}
