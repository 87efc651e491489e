//! Camera-attached position readout.
//!
//! [`TrackerHud`] lives on a text entity (usually [`CameraAttached`]) and
//! rewrites its [`Shape::Text`] content every tick with the position of a
//! named peer. Without a text shape it draws the readout itself.
//!
//! [`CameraAttached`]: crate::components::cameraattached::CameraAttached

use bevy_ecs::prelude::*;
use bevy_ecs::world::{EntityRef, EntityWorldMut};
use glam::Vec2;

use super::{Behavior, BehaviorResult};
use crate::components::mapposition::MapPosition;
use crate::components::shape::Shape;
use crate::error::EngineError;
use crate::render::{Canvas, Color};
use crate::resources::assetstore::{AssetHandle, AssetStore};
use crate::resources::sceneindex::SceneIndex;

#[derive(Debug, Clone)]
pub struct TrackerHud {
    pub target_name: String,
    pub label: String,
    pub font: String,
    pub font_size: f32,
    pub color: Color,
    target: Option<Entity>,
    font_handle: Option<AssetHandle>,
    readout: String,
}

impl TrackerHud {
    pub fn new(target_name: impl Into<String>) -> Self {
        let target_name = target_name.into();
        Self {
            label: target_name.clone(),
            target_name,
            font: "assets/fonts/mono.ttf".to_string(),
            font_size: 12.0,
            color: Color::WHITE,
            target: None,
            font_handle: None,
            readout: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_font(mut self, font: impl Into<String>, size: f32) -> Self {
        self.font = font.into();
        self.font_size = size;
        self
    }

    /// Last text produced by `update`.
    pub fn readout(&self) -> &str {
        &self.readout
    }

    pub fn font_handle(&self) -> Option<AssetHandle> {
        self.font_handle
    }

    pub fn format_position(&self, pos: Vec2) -> String {
        format!("{}: {:.0}, {:.0}", self.label, pos.x, pos.y)
    }
}

impl Behavior for TrackerHud {
    fn start(&mut self, entity: &mut EntityWorldMut<'_>) -> BehaviorResult {
        let target = entity
            .world()
            .get_resource::<SceneIndex>()
            .ok_or_else(|| EngineError::lookup(&self.target_name))?
            .require(&self.target_name)?;
        self.target = Some(target);

        let font = self.font.clone();
        self.font_handle = entity.world_scope(|world| {
            world
                .get_resource_mut::<AssetStore>()
                .map(|mut store| store.get(&font))
                .transpose()
        })?;
        Ok(())
    }

    fn update(&mut self, entity: &mut EntityWorldMut<'_>, _dt: f32) -> BehaviorResult {
        let Some(target) = self.target else {
            return Ok(());
        };
        let pos = entity
            .world()
            .get::<MapPosition>(target)
            .map(|p| p.pos)
            .ok_or_else(|| EngineError::lookup(&self.target_name))?;
        self.readout = self.format_position(pos);
        if let Some(mut shape) = entity.get_mut::<Shape>() {
            shape.set_content(self.readout.clone());
        }
        Ok(())
    }

    fn draw(&self, canvas: &mut dyn Canvas, entity: EntityRef<'_>, origin: Vec2) -> BehaviorResult {
        if entity.contains::<Shape>() || self.readout.is_empty() {
            return Ok(());
        }
        canvas.text(origin, &self.readout, &self.font, self.font_size, self.color);
        Ok(())
    }
}
