//! Drawable shape component.
//!
//! [`Shape`] is the tagged variant the render pass dispatches on. Shapes are
//! sized by the entity's [`BoxCollider`](super::boxcollider::BoxCollider) and
//! drawn at its (camera-adjusted) position.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::render::Color;

#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Rectangle covering the entity bounds.
    Rect { color: Color, filled: bool },
    /// Ellipse inscribed in the entity bounds.
    Ellipse { color: Color, filled: bool },
    /// Text anchored at the entity's top-left corner.
    Text {
        content: String,
        font: String,
        size: f32,
        color: Color,
    },
}

impl Shape {
    pub fn rect(color: Color) -> Self {
        Shape::Rect {
            color,
            filled: true,
        }
    }

    pub fn ellipse(color: Color) -> Self {
        Shape::Ellipse {
            color,
            filled: true,
        }
    }

    pub fn text(content: impl Into<String>, font: impl Into<String>, size: f32, color: Color) -> Self {
        Shape::Text {
            content: content.into(),
            font: font.into(),
            size,
            color,
        }
    }

    /// Updates the text content. No-op on non-text shapes.
    pub fn set_content(&mut self, new_content: impl Into<String>) {
        if let Shape::Text { content, .. } = self {
            *content = new_content.into();
        }
    }
}
