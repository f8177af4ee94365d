//! Entity Component System (ECS) core implementation
//!
//! This module provides the foundational ECS architecture including:
//! - Entity handles with never-reused identities
//! - Dense per-type component storage
//! - The deferred-mutation entity store
//! - System trait and staged scheduler

mod component;
/// Game component records
pub mod components;
mod entity;
/// Staged system scheduler
pub mod scheduler;
mod store;
mod system;

pub use component::{Component, ComponentStorage, DenseStorage};
pub use entity::Entity;
pub use store::EntityStore;
pub use system::System;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{InputState, Transform};
    use crate::math::Vec2;

    #[test]
    fn test_store_creation() {
        let store = EntityStore::new();
        assert_eq!(store.entity_count(), 0);
    }

    #[test]
    fn test_entity_creation() {
        let mut store = EntityStore::new();
        let entity = store.add_entity("player");
        store.update();
        assert_eq!(store.entity_count(), 1);
        assert!(store.is_alive(entity));
    }

    #[test]
    fn test_components_are_independent() {
        let mut store = EntityStore::new();
        let entity = store.add_entity("player");
        store.insert(entity, Transform::new(Vec2::zero()));
        store.insert(entity, InputState::default());

        store.remove::<InputState>(entity);
        assert!(store.has::<Transform>(entity));
        assert!(!store.has::<InputState>(entity));
    }
}
