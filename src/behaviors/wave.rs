//! Water surface simulation.
//!
//! [`WaveSimulator`] models the surface as a 1-D chain of springs: each
//! segment has a height offset and a vertical velocity. Every tick a segment
//! is pulled by its direct neighbors (tension), smoothed against its second
//! neighbors (viscosity), pulled back toward the baseline (stiffness) and
//! slowed by a damping multiplier. Bodies hitting the water inject a velocity
//! impulse into the segment under their center.
//!
//! The chain advances one step per tick regardless of `dt`; the coefficients
//! are tuned per step.

use bevy_ecs::prelude::*;
use bevy_ecs::world::{EntityRef, EntityWorldMut};
use glam::Vec2;

use super::{Behavior, BehaviorResult};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::render::{Canvas, Color};

#[derive(Debug, Clone)]
pub struct WaveSimulator {
    heights: Vec<f32>,
    velocities: Vec<f32>,
    scratch: Vec<f32>,
    /// Rest height of every segment.
    pub baseline: f32,
    /// Coupling to the direct neighbors.
    pub tension: f32,
    /// Smoothing against the second neighbors.
    pub viscosity: f32,
    /// Pull back toward the baseline.
    pub stiffness: f32,
    /// Velocity multiplier applied every step, in (0, 1].
    pub damping: f32,
    /// Fraction of a colliding body's vertical speed injected on impact.
    pub impulse_scale: f32,
    pub color: Color,
}

impl WaveSimulator {
    pub fn new(segments: usize) -> Self {
        Self {
            heights: vec![0.0; segments],
            velocities: vec![0.0; segments],
            scratch: vec![0.0; segments],
            baseline: 0.0,
            tension: 0.025,
            viscosity: 0.01,
            stiffness: 0.025,
            damping: 0.98,
            impulse_scale: 0.05,
            color: Color::BLUE,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn segments(&self) -> usize {
        self.heights.len()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// Add `speed` to the vertical velocity of segment `index`.
    ///
    /// Returns false when `index` is out of range.
    pub fn disturb(&mut self, index: usize, speed: f32) -> bool {
        match self.velocities.get_mut(index) {
            Some(v) => {
                *v += speed;
                true
            }
            None => false,
        }
    }

    /// Segment closest to world `x`, for a surface spanning `left..left + width`.
    pub fn segment_at(&self, x: f32, left: f32, width: f32) -> usize {
        let n = self.segments();
        if n <= 1 || width <= 0.0 {
            return 0;
        }
        let t = ((x - left) / width).clamp(0.0, 1.0);
        ((t * (n - 1) as f32).round() as usize).min(n - 1)
    }

    /// Largest distance of any segment from the baseline.
    pub fn max_displacement(&self) -> f32 {
        self.heights
            .iter()
            .map(|h| (h - self.baseline).abs())
            .fold(0.0, f32::max)
    }

    /// Advance the chain by one step.
    pub fn step(&mut self) {
        let n = self.heights.len();
        if n == 0 {
            return;
        }
        let h = &self.heights;
        for i in 0..n {
            // Missing neighbors contribute nothing (free ends).
            let left = if i > 0 { h[i - 1] } else { h[i] };
            let right = if i + 1 < n { h[i + 1] } else { h[i] };
            let left2 = if i > 1 { h[i - 2] } else { h[i] };
            let right2 = if i + 2 < n { h[i + 2] } else { h[i] };
            self.scratch[i] = self.tension * (left + right - 2.0 * h[i])
                + self.viscosity * (left2 + right2 - 2.0 * h[i])
                + self.stiffness * (self.baseline - h[i]);
        }
        for i in 0..n {
            self.velocities[i] = (self.velocities[i] + self.scratch[i]) * self.damping;
            self.heights[i] += self.velocities[i];
        }
    }

    /// Surface points relative to the entity's top-left corner.
    pub fn surface_points(&self, width: f32) -> Vec<Vec2> {
        let n = self.segments();
        let dx = if n > 1 { width / (n - 1) as f32 } else { 0.0 };
        self.heights
            .iter()
            .enumerate()
            .map(|(i, h)| Vec2::new(i as f32 * dx, *h))
            .collect()
    }
}

impl Behavior for WaveSimulator {
    fn update(&mut self, _entity: &mut EntityWorldMut<'_>, _dt: f32) -> BehaviorResult {
        self.step();
        Ok(())
    }

    fn on_collision(&mut self, entity: &mut EntityWorldMut<'_>, other: Entity) -> BehaviorResult {
        let (Some(position), Some(collider)) =
            (entity.get::<MapPosition>(), entity.get::<BoxCollider>())
        else {
            return Ok(());
        };
        let (left, width) = (position.pos.x, collider.size.x);

        let world = entity.world();
        let Some(other_pos) = world.get::<MapPosition>(other) else {
            return Ok(());
        };
        let other_size = world
            .get::<BoxCollider>(other)
            .map(|c| c.size)
            .unwrap_or(Vec2::ZERO);
        let Some(speed) = world.get::<RigidBody>(other).map(|rb| rb.velocity.y) else {
            return Ok(());
        };

        let center_x = other_pos.pos.x + other_size.x * 0.5;
        let index = self.segment_at(center_x, left, width);
        self.disturb(index, speed * self.impulse_scale);
        Ok(())
    }

    fn draw(&self, canvas: &mut dyn Canvas, entity: EntityRef<'_>, origin: Vec2) -> BehaviorResult {
        let width = entity
            .get::<BoxCollider>()
            .map(|c| c.size.x)
            .unwrap_or(0.0);
        let points = self.surface_points(width);
        for pair in points.windows(2) {
            canvas.line(origin + pair[0], origin + pair[1], self.color);
        }
        Ok(())
    }
}
