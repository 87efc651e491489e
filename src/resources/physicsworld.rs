//! Bounded simulation space and its force zones.
//!
//! [`PhysicsWorld`] holds the world bounds, the gravity scalar, the velocity
//! clamp and the list of [`Area`]s. Areas never move; the integrator reads
//! them to add forces and friction to any dynamic entity that overlaps them.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::material::Material;

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (min_a, max_a) = (self.min(), self.max());
        let (min_b, max_b) = (other.min(), other.max());
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// True when `other` lies completely inside this rectangle (edges included).
    pub fn contains(&self, other: &Rect) -> bool {
        let (min_a, max_a) = (self.min(), self.max());
        let (min_b, max_b) = (other.min(), other.max());
        min_b.x >= min_a.x && min_b.y >= min_a.y && max_b.x <= max_a.x && max_b.y <= max_a.y
    }
}

/// A static zone that pushes and slows whatever it touches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    pub bounds: Rect,
    /// Constant force appended to every touching entity each tick.
    pub force: Vec2,
    /// `kinetic_friction` multiplies the velocity of touching entities.
    pub material: Material,
}

impl Area {
    pub fn new(name: impl Into<String>, bounds: Rect, force: Vec2, material: Material) -> Self {
        Self {
            name: name.into(),
            bounds,
            force,
            material,
        }
    }

    /// True when the entity AABB intersects or is contained in the area.
    pub fn touches(&self, entity: &Rect) -> bool {
        self.bounds.overlaps(entity) || self.bounds.contains(entity)
    }
}

/// The bounded simulation space of a scene.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PhysicsWorld {
    pub bounds: Rect,
    /// Gravity expressed as an acceleration along +Y.
    pub gravity: f32,
    /// Per-component velocity clamp.
    pub max_velocity: f32,
    pub areas: Vec<Area>,
}

impl PhysicsWorld {
    pub fn new(width: f32, height: f32, gravity: f32) -> Self {
        Self {
            bounds: Rect::from_xywh(0.0, 0.0, width, height),
            gravity,
            max_velocity: f32::INFINITY,
            areas: Vec::new(),
        }
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn add_area(&mut self, area: Area) {
        self.areas.push(area);
    }

    /// True when the rectangle lies inside the world (edges included).
    pub fn contains(&self, rect: &Rect) -> bool {
        self.bounds.contains(rect)
    }
}
