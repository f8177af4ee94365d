// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Entity store
//!
//! The store owns every entity and every component. Creation and
//! destruction are deferred: new entities wait in a pending queue and dead
//! ones keep their data until the next [`EntityStore::update`], so a system
//! iterating a snapshot never sees the entity set change under it.

use crate::ecs::component::{Component, ComponentStorage};
use crate::ecs::components::ComponentSet;
use crate::ecs::entity::EntityRecord;
use crate::ecs::Entity;
use crate::error::{SimError, SimResult};
use std::collections::HashMap;

/// Owner of all entities and their components
///
/// # Examples
///
/// ```
/// use tilequest::ecs::EntityStore;
///
/// let mut store = EntityStore::new();
/// let tile = store.add_entity("tile");
/// assert!(store.entities().is_empty());
///
/// store.update();
/// assert_eq!(store.entities_with_tag("tile"), vec![tile]);
/// ```
#[derive(Debug, Default)]
pub struct EntityStore {
    next_entity_id: u64,
    records: HashMap<Entity, EntityRecord>,
    /// Live entities in ascending identity order
    live: Vec<Entity>,
    /// Live entities per tag, ascending identity order
    by_tag: HashMap<String, Vec<Entity>>,
    pending: Vec<Entity>,
    components: ComponentSet,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a new entity with the given tag
    ///
    /// The entity accepts components right away but is not returned by
    /// [`entities`](Self::entities) until the next [`update`](Self::update).
    pub fn add_entity(&mut self, tag: &str) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.records.insert(entity, EntityRecord::new(tag));
        self.pending.push(entity);
        entity
    }

    /// Flag an entity for removal at the next update
    ///
    /// Returns false if the entity is unknown or already flagged.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        match self.records.get_mut(&entity) {
            Some(record) if record.alive => {
                record.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Check whether an entity exists and is not flagged for removal
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.records.get(&entity).is_some_and(|r| r.alive)
    }

    /// Check whether the store still holds data for an entity
    ///
    /// True for live, pending and flagged-but-not-yet-swept entities.
    pub fn contains(&self, entity: Entity) -> bool {
        self.records.contains_key(&entity)
    }

    /// Tag of an entity
    pub fn tag(&self, entity: Entity) -> Option<&str> {
        self.records.get(&entity).map(|r| r.tag.as_str())
    }

    /// Sweep dead entities, then make pending ones visible
    pub fn update(&mut self) {
        self.sweep_dead();
        self.flush_pending();
    }

    fn sweep_dead(&mut self) {
        let records = &self.records;
        let mut dead = Vec::new();
        self.live.retain(|entity| {
            let alive = records.get(entity).is_some_and(|r| r.alive);
            if !alive {
                dead.push(*entity);
            }
            alive
        });
        if dead.is_empty() {
            return;
        }

        for entities in self.by_tag.values_mut() {
            entities.retain(|entity| records.get(entity).is_some_and(|r| r.alive));
        }
        self.by_tag.retain(|_, entities| !entities.is_empty());

        for entity in dead {
            self.records.remove(&entity);
            self.components.remove_all(entity);
        }
    }

    fn flush_pending(&mut self) {
        for entity in std::mem::take(&mut self.pending) {
            let Some(record) = self.records.get(&entity) else {
                continue;
            };
            if !record.alive {
                // destroyed before it ever became visible
                self.records.remove(&entity);
                self.components.remove_all(entity);
                continue;
            }
            self.by_tag
                .entry(record.tag.clone())
                .or_default()
                .push(entity);
            self.live.push(entity);
        }
    }

    /// Snapshot of all live entities, ascending identity order
    ///
    /// Entities flagged since the last update are still included.
    pub fn entities(&self) -> Vec<Entity> {
        self.live.clone()
    }

    /// Snapshot of live entities with `tag`, ascending identity order
    pub fn entities_with_tag(&self, tag: &str) -> Vec<Entity> {
        self.by_tag.get(tag).cloned().unwrap_or_default()
    }

    /// Number of visible entities
    pub fn entity_count(&self) -> usize {
        self.live.len()
    }

    /// Number of entities waiting for the next update
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Count visible entities with `tag`
    pub fn count_with_tag(&self, tag: &str) -> usize {
        self.by_tag.get(tag).map_or(0, Vec::len)
    }

    /// Remove everything, pending entities included
    ///
    /// Identities keep counting up so old handles stay dead.
    pub fn clear(&mut self) {
        self.records.clear();
        self.live.clear();
        self.by_tag.clear();
        self.pending.clear();
        self.components.clear();
    }

    /// Attach a component, replacing one of the same type
    ///
    /// Returns false (and attaches nothing) if the entity is unknown.
    pub fn insert<C: Component>(&mut self, entity: Entity, component: C) -> bool {
        if !self.records.contains_key(&entity) {
            return false;
        }
        C::storage_mut(&mut self.components).insert(entity, component);
        true
    }

    /// Detach a component
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        C::storage_mut(&mut self.components).remove(entity)
    }

    /// Check whether an entity carries component `C`
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        C::storage(&self.components).contains(entity)
    }

    /// Get a component if attached
    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        C::storage(&self.components).get(entity)
    }

    /// Get a mutable component if attached
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        C::storage_mut(&mut self.components).get_mut(entity)
    }

    /// Get a component that the caller requires to be attached
    ///
    /// # Errors
    ///
    /// [`SimError::MissingComponent`] if it is not.
    pub fn component<C: Component>(&self, entity: Entity) -> SimResult<&C> {
        self.get(entity).ok_or_else(|| SimError::missing::<C>(entity))
    }

    /// Mutable variant of [`component`](Self::component)
    pub fn component_mut<C: Component>(&mut self, entity: Entity) -> SimResult<&mut C> {
        self.get_mut(entity)
            .ok_or_else(|| SimError::missing::<C>(entity))
    }
}
