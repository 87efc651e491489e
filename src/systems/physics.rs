//! Physics integrator.
//!
//! Advances every active [`PhysicKind::Dynamic`] entity by one tick:
//!
//! 1. reset the acceleration accumulator
//! 2. for each touching [`Area`](crate::resources::physicsworld::Area): queue
//!    its force, multiply velocity by its friction, mark contact
//! 3. queue gravity as `gravity * mass` so that it cancels out in step 4
//! 4. `a = ΣF / mass`
//! 5. `v += 0.5 * a * dt²`
//! 6. `pos += v * dt`
//! 7. on contact, `v *= material.kinetic_friction`
//! 8. clamp each velocity component to `±max_velocity`
//! 9. keep the entity inside the world, bouncing with `-elasticity`
//!
//! Forces queued during the tick are dropped by [`clear_pending_forces`]
//! after rendering, so they never carry over.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::components::flags::EntityFlags;
use crate::components::mapposition::MapPosition;
use crate::components::material::Material;
use crate::components::physickind::PhysicKind;
use crate::components::rigidbody::RigidBody;
use crate::resources::physicsworld::{PhysicsWorld, Rect};
use crate::resources::worldtime::WorldTime;

/// Clamp an entity of `size` at `pos` into `bounds`.
///
/// Every offending velocity component is replaced by `-elasticity * v`.
/// Returns true when any side was hit.
pub fn resolve_bounds(
    pos: &mut Vec2,
    velocity: &mut Vec2,
    size: Vec2,
    bounds: &Rect,
    elasticity: f32,
) -> bool {
    let min = bounds.min();
    let max = bounds.max() - size;
    let mut hit = false;

    if pos.x < min.x {
        pos.x = min.x;
        velocity.x = -velocity.x * elasticity;
        hit = true;
    } else if pos.x > max.x {
        pos.x = max.x;
        velocity.x = -velocity.x * elasticity;
        hit = true;
    }

    if pos.y < min.y {
        pos.y = min.y;
        velocity.y = -velocity.y * elasticity;
        hit = true;
    } else if pos.y > max.y {
        pos.y = max.y;
        velocity.y = -velocity.y * elasticity;
        hit = true;
    }

    hit
}

/// Integrate forces, velocity and position of all dynamic bodies.
///
/// Also recomputes `contact` from scratch for every entity, dynamic or not.
pub fn integrate_bodies(
    mut query: Query<(
        &mut MapPosition,
        &mut RigidBody,
        &mut EntityFlags,
        &BoxCollider,
        &Material,
        &PhysicKind,
    )>,
    physics: Res<PhysicsWorld>,
    time: Res<WorldTime>,
) {
    let dt = time.delta;

    for (mut position, mut body, mut flags, collider, material, kind) in query.iter_mut() {
        flags.contact = false;
        if !flags.active || !kind.is_dynamic() {
            continue;
        }

        body.acceleration = Vec2::ZERO;

        let bounds = collider.aabb(position.pos);
        for area in physics.areas.iter() {
            if area.touches(&bounds) {
                body.add_force(area.force);
                body.velocity *= area.material.kinetic_friction;
                flags.contact = true;
            }
        }

        let mass = body.mass;
        body.add_force(Vec2::new(0.0, physics.gravity * mass));
        body.acceleration = body.total_force() / mass;

        let acceleration = body.acceleration;
        body.velocity += 0.5 * acceleration * dt * dt;
        position.pos += body.velocity * dt;

        if flags.contact {
            body.velocity *= material.kinetic_friction;
        }

        let limit = Vec2::splat(physics.max_velocity);
        body.velocity = body.velocity.clamp(-limit, limit);

        if resolve_bounds(
            &mut position.pos,
            &mut body.velocity,
            collider.size,
            &physics.bounds,
            material.elasticity,
        ) {
            flags.contact = true;
        }
    }
}

/// Drop the forces consumed this tick.
pub fn clear_pending_forces(mut query: Query<&mut RigidBody>) {
    for mut body in query.iter_mut() {
        if !body.forces.is_empty() {
            body.clear_forces();
        }
    }
}
