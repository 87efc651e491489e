//! Name-keyed entity registry of a scene.
//!
//! Maps each [`EntityName`](crate::components::identity::EntityName) to its
//! ECS entity and hands out monotonic [`EntityId`](crate::components::identity::EntityId)s.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

use crate::error::EngineError;

#[derive(Resource, Debug, Default)]
pub struct SceneIndex {
    map: FxHashMap<String, Entity>,
    next_id: u64,
}

impl SceneIndex {
    /// Create an empty index whose first id will be `first_id`.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            map: FxHashMap::default(),
            next_id: first_id,
        }
    }

    /// Hand out the next creation id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The id that the next spawned entity will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Register `entity` under `name`, returning the entity it replaced.
    pub fn insert(&mut self, name: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.map.insert(name.into(), entity)
    }

    /// Retrieve an entity by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<Entity> {
        self.map.get(name.as_ref()).copied()
    }

    /// Retrieve an entity by name or fail with a lookup error.
    pub fn require(&self, name: impl AsRef<str>) -> Result<Entity, EngineError> {
        self.get(name.as_ref())
            .ok_or_else(|| EngineError::lookup(name.as_ref()))
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.map.contains_key(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}
