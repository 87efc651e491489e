//! Dynamic body component with a per-tick pending-force list.
//!
//! The [`RigidBody`] component stores velocity, mass and the forces queued
//! for the current tick. Areas, gravity and behaviors push forces with
//! [`RigidBody::add_force`]; the integrator sums them into
//! [`RigidBody::acceleration`] (`a = ΣF / mass`) and the post-process pass
//! clears the list so nothing carries over into the next tick.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use smallvec::SmallVec;

/// Body state consumed by the physics integrator.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `acceleration` - Accumulator rebuilt by the integrator every tick
/// - `forces` - Forces queued for this tick (cleared in post-process)
/// - `mass` - Always > 0; validated when the entity is spawned
/// - `max_speed` - Optional per-entity speed cap read by steering behaviors
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_mass(2.0);
/// rb.add_force(Vec2::new(0.0, -10.0));
/// rb.add_force(Vec2::new(4.0, 0.0));
/// assert_eq!(rb.total_force(), Vec2::new(4.0, -10.0));
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub forces: SmallVec<[Vec2; 4]>,
    pub mass: f32,
    pub max_speed: Option<f32>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with unit mass, zero velocity and no forces.
    pub fn new() -> Self {
        Self::with_mass(1.0)
    }

    /// Create a RigidBody with the given mass.
    pub fn with_mass(mass: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            forces: SmallVec::new(),
            mass,
            max_speed: None,
        }
    }

    /// Queue a force for the current tick.
    pub fn add_force(&mut self, force: Vec2) {
        self.forces.push(force);
    }

    /// Sum of all queued forces.
    pub fn total_force(&self) -> Vec2 {
        self.forces.iter().copied().sum()
    }

    /// Drop every queued force.
    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

}
