//! Data-driven scene layouts.
//!
//! A [`SceneLayout`] is a JSON document listing entities and areas:
//!
//! ```json
//! {
//!   "areas": [
//!     { "name": "water", "position": [0, 400], "size": [800, 200],
//!       "force": [0, -30], "material": { "density": 1, "kinetic_friction": 0.9, "elasticity": 1 } }
//!   ],
//!   "entities": [
//!     { "name": "crate", "position": [100, 50], "size": [20, 20], "kind": "dynamic",
//!       "shape": { "type": "rect", "color": { "r": 200, "g": 120, "b": 40, "a": 255 }, "filled": true } }
//!   ]
//! }
//! ```
//!
//! Vectors are `[x, y]` arrays. Omitted fields take the [`EntityBuilder`]
//! defaults, except `mass`, which falls back to the material density.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::builder::EntityBuilder;
use crate::components::material::Material;
use crate::components::physickind::PhysicKind;
use crate::components::shape::Shape;
use crate::error::EngineError;
use crate::resources::physicsworld::{Area, Rect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub size: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub mass: Option<f32>,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub kind: PhysicKind,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub shape: Option<Shape>,
    #[serde(default)]
    pub max_speed: Option<f32>,
    #[serde(default)]
    pub camera_attached: bool,
    /// Name of an entity declared earlier in the layout.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub offset: Vec2,
}

impl EntityDescriptor {
    pub fn to_builder(&self) -> EntityBuilder {
        let mut builder = EntityBuilder::new(&self.name)
            .at(self.position.x, self.position.y)
            .size(self.size.x, self.size.y)
            .velocity(self.velocity.x, self.velocity.y)
            .mass(self.mass.unwrap_or(self.material.density))
            .material(self.material)
            .kind(self.kind)
            .priority(self.priority);
        builder.shape = self.shape.clone();
        builder.max_speed = self.max_speed;
        builder.camera_attached = self.camera_attached;
        if let Some(parent) = &self.parent {
            builder = builder.child_of(parent.clone(), self.offset);
        }
        builder
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaDescriptor {
    pub name: String,
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub force: Vec2,
    #[serde(default)]
    pub material: Material,
}

impl AreaDescriptor {
    pub fn to_area(&self) -> Result<Area, EngineError> {
        if !self.position.is_finite()
            || !self.size.is_finite()
            || !self.force.is_finite()
            || !self.material.is_finite()
        {
            return Err(EngineError::degenerate(&self.name, "area values must be finite"));
        }
        if self.size.x < 0.0 || self.size.y < 0.0 {
            return Err(EngineError::degenerate(&self.name, "area size must be non-negative"));
        }
        Ok(Area::new(
            &self.name,
            Rect::new(self.position, self.size),
            self.force,
            self.material,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    #[serde(default)]
    pub areas: Vec<AreaDescriptor>,
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,
}

impl SceneLayout {
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text).map_err(|e| EngineError::config(format!("invalid scene layout: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    const LAYOUT: &str = r#"{
        "areas": [
            { "name": "water", "position": [0, 400], "size": [800, 200], "force": [0, -30],
              "material": { "density": 1.0, "kinetic_friction": 0.9, "elasticity": 1.0 } }
        ],
        "entities": [
            { "name": "crate", "position": [100, 50], "size": [20, 20], "kind": "dynamic",
              "material": { "density": 2.5, "kinetic_friction": 1.0, "elasticity": 0.5 },
              "shape": { "type": "rect", "color": { "r": 200, "g": 120, "b": 40, "a": 255 }, "filled": true } },
            { "name": "flag", "parent": "crate", "offset": [0, -10] }
        ]
    }"#;

    #[test]
    fn test_parse_layout() {
        let layout = SceneLayout::from_json(LAYOUT).unwrap();
        assert_eq!(layout.areas.len(), 1);
        assert_eq!(layout.entities.len(), 2);

        let area = layout.areas[0].to_area().unwrap();
        assert_eq!(area.force, Vec2::new(0.0, -30.0));
        assert_eq!(area.bounds.max(), Vec2::new(800.0, 600.0));

        let crate_builder = layout.entities[0].to_builder();
        assert_eq!(crate_builder.kind, PhysicKind::Dynamic);
        assert_eq!(crate_builder.mass, 2.5);
        assert_eq!(crate_builder.shape, Some(Shape::rect(Color::rgb(200, 120, 40))));

        let flag = layout.entities[1].to_builder();
        assert_eq!(flag.parent, Some(("crate".to_string(), Vec2::new(0.0, -10.0))));
        assert_eq!(flag.kind, PhysicKind::None);
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let err = SceneLayout::from_json("{ \"entities\": [ { \"position\": 3 } ] }").unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_negative_area_rejected() {
        let area = AreaDescriptor {
            name: "hole".into(),
            position: Vec2::ZERO,
            size: Vec2::new(-5.0, 5.0),
            force: Vec2::ZERO,
            material: Material::default(),
        };
        assert!(area.to_area().is_err());
    }
}
