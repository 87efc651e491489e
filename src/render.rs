//! Render collaborator interface and the scene render pass.
//!
//! The engine never touches pixels. [`render_scene`] works out what to draw
//! and where (camera offset, draw order, shape kind) and forwards primitive
//! calls to a [`Canvas`] supplied by the platform layer.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::error;
use serde::{Deserialize, Serialize};

use crate::behaviors::Behaviors;
use crate::components::boxcollider::BoxCollider;
use crate::components::cameraattached::CameraAttached;
use crate::components::flags::EntityFlags;
use crate::components::identity::EntityId;
use crate::components::mapposition::MapPosition;
use crate::components::shape::Shape;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2D;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Primitive draw calls provided by the platform.
pub trait Canvas {
    fn rect(&mut self, pos: Vec2, size: Vec2, color: Color, filled: bool);
    fn ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, filled: bool);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn text(&mut self, pos: Vec2, text: &str, font: &str, size: f32, color: Color);
}

/// Canvas that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn rect(&mut self, _pos: Vec2, _size: Vec2, _color: Color, _filled: bool) {}
    fn ellipse(&mut self, _center: Vec2, _radii: Vec2, _color: Color, _filled: bool) {}
    fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}
    fn text(&mut self, _pos: Vec2, _text: &str, _font: &str, _size: f32, _color: Color) {}
}

/// A recorded primitive call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        filled: bool,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
        filled: bool,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        font: String,
        size: f32,
        color: Color,
    },
}

/// Canvas that stores every call, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded text strings, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn rect(&mut self, pos: Vec2, size: Vec2, color: Color, filled: bool) {
        self.commands.push(DrawCommand::Rect {
            pos,
            size,
            color,
            filled,
        });
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, filled: bool) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radii,
            color,
            filled,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn text(&mut self, pos: Vec2, text: &str, font: &str, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            font: font.to_string(),
            size,
            color,
        });
    }
}

/// Draw a shape whose bounds start at `origin`.
fn draw_shape(canvas: &mut dyn Canvas, shape: &Shape, origin: Vec2, size: Vec2) {
    match shape {
        Shape::Rect { color, filled } => canvas.rect(origin, size, *color, *filled),
        Shape::Ellipse { color, filled } => {
            let radii = size * 0.5;
            canvas.ellipse(origin + radii, radii, *color, *filled);
        }
        Shape::Text {
            content,
            font,
            size: font_size,
            color,
        } => canvas.text(origin, content, font, *font_size, *color),
    }
}

/// Draw every active entity onto `canvas`.
///
/// Entities are drawn in ascending [`ZIndex`], ties broken by [`EntityId`].
/// For each entity its [`Shape`] (if any) is drawn first, then the `draw`
/// hook of every attached behavior. World entities are shifted by the
/// camera position; [`CameraAttached`] entities are drawn as-is.
pub fn render_scene(world: &mut World, canvas: &mut dyn Canvas) {
    let camera = world.get_resource::<Camera2D>().copied();

    let mut to_draw: Vec<(ZIndex, EntityId, Entity, Vec2)> = {
        let mut query = world.query::<(
            Entity,
            &MapPosition,
            &EntityFlags,
            Option<&ZIndex>,
            Option<&EntityId>,
            Has<CameraAttached>,
        )>();
        query
            .iter(world)
            .filter(|(_, _, flags, ..)| flags.active)
            .map(|(entity, position, _, z, id, attached)| {
                let origin = match camera {
                    Some(camera) if !attached => camera.world_to_screen(position.pos),
                    _ => position.pos,
                };
                (
                    z.copied().unwrap_or_default(),
                    id.copied().unwrap_or(EntityId(u64::MAX)),
                    entity,
                    origin,
                )
            })
            .collect()
    };
    to_draw.sort_by_key(|(z, id, ..)| (*z, *id));

    for (_, _, entity, origin) in to_draw {
        let size = world
            .get::<BoxCollider>(entity)
            .map(|collider| collider.size)
            .unwrap_or(Vec2::ZERO);
        if let Some(shape) = world.get::<Shape>(entity) {
            draw_shape(canvas, shape, origin, size);
        }
        if let Some(behaviors) = world.get::<Behaviors>(entity) {
            let entity_ref = world.entity(entity);
            for behavior in behaviors.0.iter() {
                if let Err(err) = behavior.draw(canvas, entity_ref, origin) {
                    error!(
                        "Behavior '{}' failed to draw {:?}: {}",
                        behavior.label(),
                        entity,
                        err
                    );
                }
            }
        }
    }
}
