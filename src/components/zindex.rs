//! Z-index component for draw/update ordering.
//!
//! The [`ZIndex`] component controls the drawing order of entities. Entities
//! with higher values are drawn on top of those with lower values; ties are
//! broken by [`EntityId`](super::identity::EntityId).

use bevy_ecs::prelude::Component;

/// Priority hint for 2D drawing. Higher values are drawn later (on top).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
