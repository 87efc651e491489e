//! Behavior hook dispatch.
//!
//! Hooks need mutable access to their own entity and read access to the
//! rest of the world, so dispatch runs as exclusive systems. For each entity
//! the [`Behaviors`] component is taken out, every behavior is called in
//! attachment order, and the component is put back. A hook that returns an
//! error is logged and skipped; the remaining hooks and entities still run.

use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityWorldMut;
use log::error;

use crate::behaviors::{Behavior, BehaviorResult, Behaviors};
use crate::components::flags::EntityFlags;
use crate::components::identity::EntityId;
use crate::components::zindex::ZIndex;
use crate::error::EngineError;
use crate::events::collision::CollisionEvents;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Entities that carry behaviors, in (`ZIndex`, `EntityId`) order.
///
/// With `active_only`, inactive entities are left out.
pub fn behavior_order(world: &mut World, active_only: bool) -> Vec<Entity> {
    let mut query = world.query_filtered::<(
        Entity,
        Option<&EntityFlags>,
        Option<&ZIndex>,
        Option<&EntityId>,
    ), With<Behaviors>>();
    let mut list: Vec<(ZIndex, EntityId, Entity)> = query
        .iter(world)
        .filter(|(_, flags, ..)| !active_only || flags.is_none_or(|f| f.active))
        .map(|(entity, _, z, id)| {
            (
                z.copied().unwrap_or_default(),
                id.copied().unwrap_or(EntityId(u64::MAX)),
                entity,
            )
        })
        .collect();
    list.sort_by_key(|(z, id, _)| (*z, *id));
    list.into_iter().map(|(_, _, entity)| entity).collect()
}

/// Run `hook` for every behavior of `entity`, isolating failures.
///
/// Every failure is logged; the first one is returned.
pub fn with_behaviors<F>(
    world: &mut World,
    entity: Entity,
    phase: &str,
    mut hook: F,
) -> Option<EngineError>
where
    F: FnMut(&mut Box<dyn Behavior>, &mut EntityWorldMut<'_>) -> BehaviorResult,
{
    let mut entity_mut = world.get_entity_mut(entity).ok()?;
    let mut behaviors = entity_mut.take::<Behaviors>()?;
    let mut first_failure = None;
    for behavior in behaviors.0.iter_mut() {
        if let Err(err) = hook(behavior, &mut entity_mut) {
            error!(
                "Behavior '{}' failed in {} on {:?}: {}",
                behavior.label(),
                phase,
                entity,
                err
            );
            if first_failure.is_none() {
                first_failure = Some(err);
            }
        }
    }
    entity_mut.insert(behaviors);
    first_failure
}

/// Fire `start` on every entity's behaviors (scene activation).
///
/// All hooks run; the first failure is returned so activation can abort.
pub fn run_behavior_start(world: &mut World) -> Result<(), EngineError> {
    let mut first_failure = None;
    for entity in behavior_order(world, false) {
        let failure = with_behaviors(world, entity, "start", |behavior, entity_mut| {
            behavior.start(entity_mut)
        });
        if first_failure.is_none() {
            first_failure = failure;
        }
    }
    first_failure.map_or(Ok(()), Err)
}

/// Fire `input` on every active entity's behaviors.
pub fn run_behavior_input(world: &mut World, input: &InputState) {
    for entity in behavior_order(world, true) {
        with_behaviors(world, entity, "input", |behavior, entity_mut| {
            behavior.input(input, entity_mut)
        });
    }
}

/// Fire `update` on every active entity's behaviors, dynamic or not.
pub fn run_behavior_update(world: &mut World) {
    let dt = world.resource::<WorldTime>().delta;
    for entity in behavior_order(world, true) {
        with_behaviors(world, entity, "update", |behavior, entity_mut| {
            behavior.update(entity_mut, dt)
        });
    }
}

/// Deliver this tick's collision pairs to both participants.
///
/// For a pair `(a, b)` every behavior of `a` receives `on_collision(b)`,
/// then every behavior of `b` receives `on_collision(a)`.
pub fn dispatch_collisions(world: &mut World) {
    let pairs = world.resource::<CollisionEvents>().pairs.clone();
    for pair in pairs {
        with_behaviors(world, pair.a, "on_collision", |behavior, entity_mut| {
            behavior.on_collision(entity_mut, pair.b)
        });
        with_behaviors(world, pair.b, "on_collision", |behavior, entity_mut| {
            behavior.on_collision(entity_mut, pair.a)
        });
    }
}

/// Fire `end` on every entity's behaviors (scene teardown).
pub fn run_behavior_end(world: &mut World) {
    for entity in behavior_order(world, false) {
        with_behaviors(world, entity, "end", |behavior, entity_mut| {
            behavior.end(entity_mut)
        });
    }
}
