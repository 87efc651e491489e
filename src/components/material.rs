//! Physical coefficients attached to entities and areas.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Physical coefficients of an entity or area.
///
/// - `density` - informational, used by layouts to derive mass
/// - `kinetic_friction` - velocity multiplier applied on contact (1.0 = no loss)
/// - `elasticity` - fraction of velocity kept (sign inverted) after a bounce
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub density: f32,
    pub kinetic_friction: f32,
    pub elasticity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            kinetic_friction: 1.0,
            elasticity: 1.0,
        }
    }
}

impl Material {
    pub fn new(density: f32, kinetic_friction: f32, elasticity: f32) -> Self {
        Self {
            density,
            kinetic_friction,
            elasticity,
        }
    }

    /// True when every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        self.density.is_finite() && self.kinetic_friction.is_finite() && self.elasticity.is_finite()
    }
}
