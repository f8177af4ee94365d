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
//! Component storage and management
//!
//! Components are data containers that can be attached to entities.
//! Each component type lives in its own dense storage, keyed by entity, so
//! systems that walk one component type touch one contiguous array.

use crate::ecs::components::ComponentSet;
use crate::ecs::Entity;
use std::collections::HashMap;

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior. The trait
/// maps each component type to its storage inside a [`ComponentSet`], which
/// is what makes `store.get::<Transform>(entity)` statically typed without
/// any runtime type lookup.
pub trait Component: Sized + 'static {
    /// Borrow the storage holding this component type
    fn storage(set: &ComponentSet) -> &DenseStorage<Self>;

    /// Mutably borrow the storage holding this component type
    fn storage_mut(set: &mut ComponentSet) -> &mut DenseStorage<Self>;
}

/// Storage interface for components
pub trait ComponentStorage {
    /// The component type this storage manages
    type Component;

    /// Insert a component for the given entity, replacing any previous one
    fn insert(&mut self, entity: Entity, component: Self::Component);

    /// Remove a component for the given entity
    fn remove(&mut self, entity: Entity) -> Option<Self::Component>;

    /// Get a reference to a component for the given entity
    fn get(&self, entity: Entity) -> Option<&Self::Component>;

    /// Get a mutable reference to a component for the given entity
    fn get_mut(&mut self, entity: Entity) -> Option<&mut Self::Component>;

    /// Check if an entity has this component
    fn contains(&self, entity: Entity) -> bool;

    /// Clear all components
    fn clear(&mut self);
}

/// Dense component storage
///
/// Components are packed contiguously in a `Vec`, with a sparse map from
/// entity to slot. Removal swaps the last element into the hole so the
/// array never has gaps.
///
/// # Example
///
/// ```
/// use tilequest::ecs::{ComponentStorage, DenseStorage, Entity};
/// use tilequest::ecs::components::LifeSpan;
///
/// let mut storage = DenseStorage::<LifeSpan>::new();
/// let entity = Entity::new(1);
///
/// storage.insert(entity, LifeSpan::new(150, 0));
/// assert!(storage.contains(entity));
/// assert_eq!(storage.get(entity).unwrap().lifespan_ms, 150);
/// ```
#[derive(Debug)]
pub struct DenseStorage<T> {
    /// Mapping from Entity to dense array index
    entity_to_index: HashMap<Entity, usize>,
    /// Mapping from dense array index back to Entity (for swap_remove)
    index_to_entity: Vec<Entity>,
    components: Vec<T>,
}

impl<T> DenseStorage<T> {
    /// Create a new empty storage
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new storage with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        DenseStorage {
            entity_to_index: HashMap::with_capacity(capacity),
            index_to_entity: Vec::with_capacity(capacity),
            components: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of components stored
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the storage is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get all entities that have components in this storage
    ///
    /// Order is storage order, not identity order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.index_to_entity.iter().copied()
    }

    /// Get the dense component array
    pub fn components(&self) -> &[T] {
        &self.components
    }
}

impl<T> Default for DenseStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentStorage for DenseStorage<T> {
    type Component = T;

    fn insert(&mut self, entity: Entity, component: T) {
        if let Some(&index) = self.entity_to_index.get(&entity) {
            self.components[index] = component;
        } else {
            let new_index = self.components.len();
            self.components.push(component);
            self.entity_to_index.insert(entity, new_index);
            self.index_to_entity.push(entity);

            debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
            debug_assert_eq!(self.entity_to_index.len(), self.components.len());
        }
    }

    fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.entity_to_index.remove(&entity)?;

        let last_index = self.components.len() - 1;
        if index != last_index {
            let swapped_entity = self.index_to_entity[last_index];
            self.entity_to_index.insert(swapped_entity, index);
        }
        self.index_to_entity.swap_remove(index);
        let component = self.components.swap_remove(index);

        debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
        debug_assert_eq!(self.entity_to_index.len(), self.components.len());

        Some(component)
    }

    fn get(&self, entity: Entity) -> Option<&T> {
        let index = self.entity_to_index.get(&entity)?;
        Some(&self.components[*index])
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = self.entity_to_index.get(&entity)?;
        Some(&mut self.components[*index])
    }

    fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    fn clear(&mut self) {
        self.entity_to_index.clear();
        self.index_to_entity.clear();
        self.components.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Marker {
        label: String,
    }

    fn marker(label: &str) -> Marker {
        Marker {
            label: label.to_string(),
        }
    }

    #[test]
    fn test_dense_storage_basic() {
        let mut storage = DenseStorage::<Marker>::new();
        let entity = Entity::new(1);

        storage.insert(entity, marker("a"));
        assert!(storage.contains(entity));
        assert_eq!(storage.get(entity).unwrap().label, "a");

        let removed = storage.remove(entity);
        assert_eq!(removed, Some(marker("a")));
        assert!(!storage.contains(entity));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_dense_storage_remove_middle_keeps_mapping() {
        let mut storage = DenseStorage::<Marker>::new();
        let e1 = Entity::new(1);
        let e2 = Entity::new(2);
        let e3 = Entity::new(3);

        storage.insert(e1, marker("one"));
        storage.insert(e2, marker("two"));
        storage.insert(e3, marker("three"));

        storage.remove(e2);
        assert_eq!(storage.len(), 2);
        assert!(!storage.contains(e2));
        // e3 was swapped into e2's slot and must still resolve
        assert_eq!(storage.get(e3).unwrap().label, "three");
        assert_eq!(storage.get(e1).unwrap().label, "one");
    }

    #[test]
    fn test_dense_storage_update_in_place() {
        let mut storage = DenseStorage::<Marker>::new();
        let entity = Entity::new(1);

        storage.insert(entity, marker("old"));
        storage.insert(entity, marker("new"));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(entity).unwrap().label, "new");
    }

    #[test]
    fn test_dense_storage_get_mut() {
        let mut storage = DenseStorage::<Marker>::new();
        let entity = Entity::new(7);
        storage.insert(entity, marker("x"));

        if let Some(m) = storage.get_mut(entity) {
            m.label.push('y');
        }
        assert_eq!(storage.get(entity).unwrap().label, "xy");
    }

    #[test]
    fn test_dense_storage_missing_is_none() {
        let mut storage = DenseStorage::<Marker>::new();
        assert!(storage.get(Entity::new(9)).is_none());
        assert!(storage.get_mut(Entity::new(9)).is_none());
        assert!(storage.remove(Entity::new(9)).is_none());
    }

    #[test]
    fn test_dense_storage_churn() {
        let mut storage = DenseStorage::<Marker>::with_capacity(100);
        for i in 0..100 {
            storage.insert(Entity::new(i), marker(&i.to_string()));
        }
        for i in (1..100).step_by(2) {
            storage.remove(Entity::new(i));
        }
        assert_eq!(storage.len(), 50);
        for i in (0..100).step_by(2) {
            assert_eq!(storage.get(Entity::new(i)).unwrap().label, i.to_string());
        }

        storage.clear();
        assert!(storage.is_empty());
        assert_eq!(storage.entities().count(), 0);
    }
}
