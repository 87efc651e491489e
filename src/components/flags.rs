use bevy_ecs::prelude::Component;

/// Per-entity simulation flags.
///
/// `contact` is rebuilt from scratch every tick by the integrator: it is set
/// when the entity touched an area or the world boundary during that tick.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityFlags {
    pub active: bool,
    pub contact: bool,
}

impl Default for EntityFlags {
    fn default() -> Self {
        Self {
            active: true,
            contact: false,
        }
    }
}
