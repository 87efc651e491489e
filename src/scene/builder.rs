//! By-value entity builder.
//!
//! [`EntityBuilder`] collects everything an entity needs before it exists.
//! Each setter consumes and returns the builder, so a description reads as a
//! single chain:
//!
//! ```ignore
//! scene.spawn(
//!     EntityBuilder::new("ball")
//!         .at(100.0, 50.0)
//!         .size(16.0, 16.0)
//!         .mass(2.0)
//!         .kind(PhysicKind::Dynamic)
//!         .shape(Shape::ellipse(Color::RED)),
//! )?;
//! ```
//!
//! [`EntityBuilder::validate`] rejects degenerate numbers before the entity
//! reaches the integrator; [`Scene::spawn`](super::Scene::spawn) calls it.

use glam::Vec2;

use crate::behaviors::{Behavior, Behaviors};
use crate::components::material::Material;
use crate::components::physickind::PhysicKind;
use crate::components::shape::Shape;
use crate::error::EngineError;

#[derive(Debug)]
pub struct EntityBuilder {
    pub name: String,
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    pub material: Material,
    pub kind: PhysicKind,
    pub priority: i32,
    pub shape: Option<Shape>,
    pub max_speed: Option<f32>,
    pub camera_attached: bool,
    pub active: bool,
    /// Parent name and offset from the parent's position.
    pub parent: Option<(String, Vec2)>,
    pub behaviors: Behaviors,
}

impl EntityBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            material: Material::default(),
            kind: PhysicKind::default(),
            priority: 0,
            shape: None,
            max_speed: None,
            camera_attached: false,
            active: true,
            parent: None,
            behaviors: Behaviors::new(),
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    pub fn mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn kind(mut self, kind: PhysicKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for `.kind(PhysicKind::Dynamic)`.
    pub fn dynamic(self) -> Self {
        self.kind(PhysicKind::Dynamic)
    }

    /// Draw priority; higher values are drawn later.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Position is in camera space instead of world space.
    pub fn camera_attached(mut self) -> Self {
        self.camera_attached = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Attach to a previously spawned entity; position follows the parent.
    pub fn child_of(mut self, parent: impl Into<String>, offset: Vec2) -> Self {
        self.parent = Some((parent.into(), offset));
        self
    }

    pub fn behavior(mut self, behavior: impl Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Reject values that would poison the integrator.
    pub fn validate(&self) -> Result<(), EngineError> {
        let fail = |reason: &str| Err(EngineError::degenerate(&self.name, reason));

        if !self.mass.is_finite() || self.mass <= 0.0 {
            return fail(&format!("mass must be finite and > 0, got {}", self.mass));
        }
        if !self.material.is_finite() {
            return fail("material coefficients must be finite");
        }
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return fail("position and velocity must be finite");
        }
        if !self.size.is_finite() || self.size.x < 0.0 || self.size.y < 0.0 {
            return fail("size must be finite and non-negative");
        }
        if self
            .max_speed
            .is_some_and(|max_speed| !max_speed.is_finite() || max_speed < 0.0)
        {
            return fail("max_speed must be finite and non-negative");
        }
        Ok(())
    }
}
