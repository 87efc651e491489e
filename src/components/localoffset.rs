//! Offset of a child entity relative to its parent.
//!
//! When an entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, the
//! [`propagate_children`](crate::systems::hierarchy::propagate_children)
//! system rewrites its [`MapPosition`](super::mapposition::MapPosition) as
//! `parent.pos + offset` every tick.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalOffset(pub Vec2);
