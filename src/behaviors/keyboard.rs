//! Keyboard-driven thrust.
//!
//! Held direction keys queue a force on the entity's [`RigidBody`] during the
//! input phase, so the integrator picks it up the same tick. Diagonal input
//! is normalized to keep a consistent magnitude.

use bevy_ecs::world::EntityWorldMut;
use glam::Vec2;

use super::{Behavior, BehaviorResult};
use crate::components::rigidbody::RigidBody;
use crate::resources::input::{InputSource, InputState, Key};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardThrust {
    /// Force magnitude along one axis.
    pub thrust: f32,
}

impl KeyboardThrust {
    pub fn new(thrust: f32) -> Self {
        Self { thrust }
    }

    /// Force for the keys currently held.
    pub fn force_for(&self, input: &dyn InputSource) -> Vec2 {
        let up = input.is_key_pressed(Key::Up);
        let down = input.is_key_pressed(Key::Down);
        let left = input.is_key_pressed(Key::Left);
        let right = input.is_key_pressed(Key::Right);

        let mut force = Vec2::ZERO;
        if up {
            force.y -= self.thrust;
        }
        if down {
            force.y += self.thrust;
        }
        if left {
            force.x -= self.thrust;
        }
        if right {
            force.x += self.thrust;
        }

        if (up || down) && (left || right) {
            force *= 0.7071; // 1/sqrt(2)
        }
        force
    }
}

impl Behavior for KeyboardThrust {
    fn input(&mut self, input: &InputState, entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        let force = self.force_for(input);
        if force != Vec2::ZERO {
            if let Some(mut body) = entity.get_mut::<RigidBody>() {
                body.add_force(force);
            }
        }
        Ok(())
    }
}
