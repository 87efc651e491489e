use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// How the integrator treats an entity.
///
/// Only [`PhysicKind::Dynamic`] entities are displaced. `Static` and `None`
/// entities still collide and run their behaviors.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicKind {
    Static,
    Dynamic,
    #[default]
    None,
}

impl PhysicKind {
    pub fn is_dynamic(self) -> bool {
        matches!(self, PhysicKind::Dynamic)
    }
}
