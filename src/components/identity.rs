//! Identity components: unique name and monotonic id.
//!
//! Names are the lookup key inside a scene (see
//! [`SceneIndex`](crate::resources::sceneindex::SceneIndex)); ids are handed
//! out in creation order and break draw-order ties.

use bevy_ecs::prelude::Component;

/// Unique name of an entity within its scene.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityName(pub String);

impl EntityName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Monotonic creation id of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);
