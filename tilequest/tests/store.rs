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
//! Entity store and geometry properties

use tilequest::ecs::components::{LifeSpan, Transform};
use tilequest::ecs::EntityStore;
use tilequest::geometry::{overlap, overlap_at, segment_intersect};
use tilequest::math::Vec2;
use tilequest::SimError;

#[test]
fn test_dead_entities_leave_every_index() {
    let mut store = EntityStore::new();
    let a = store.add_entity("npc");
    let b = store.add_entity("npc");
    store.insert(a, LifeSpan::new(10, 0));
    store.update();

    store.destroy(a);
    // still listed until the next update
    assert_eq!(store.entities_with_tag("npc"), vec![a, b]);

    store.update();
    assert_eq!(store.entities(), vec![b]);
    assert_eq!(store.entities_with_tag("npc"), vec![b]);
    assert!(!store.contains(a));
    assert!(store.get::<LifeSpan>(a).is_none());
}

#[test]
fn test_adds_appear_once_in_enqueue_order() {
    let mut store = EntityStore::new();
    let tile = store.add_entity("tile");
    let npc = store.add_entity("npc");
    let tile2 = store.add_entity("tile");
    assert!(store.entities().is_empty());

    store.update();
    assert_eq!(store.entities(), vec![tile, npc, tile2]);
    assert_eq!(store.entities_with_tag("tile"), vec![tile, tile2]);

    store.update();
    assert_eq!(store.entity_count(), 3);
}

#[test]
fn test_destroyed_while_pending_never_appears() {
    let mut store = EntityStore::new();
    let ghost = store.add_entity("explosions");
    store.insert(ghost, Transform::new(Vec2::zero()));
    store.destroy(ghost);

    store.update();
    assert!(store.entities().is_empty());
    assert_eq!(store.count_with_tag("explosions"), 0);
    assert!(!store.contains(ghost));
}

#[test]
fn test_identities_never_reused() {
    let mut store = EntityStore::new();
    let first = store.add_entity("npc");
    store.update();
    store.destroy(first);
    store.update();
    store.clear();

    let second = store.add_entity("npc");
    assert!(second > first);
    assert!(!store.is_alive(first));
}

#[test]
fn test_missing_component_is_reported() {
    let mut store = EntityStore::new();
    let entity = store.add_entity("tile");
    let err = store.component::<Transform>(entity).unwrap_err();
    assert!(matches!(err, SimError::MissingComponent { entity: e, .. } if e == entity));
}

#[test]
fn test_overlap_is_symmetric() {
    let cases = [
        (Vec2::new(0.0, 0.0), Vec2::new(16.0, 16.0), Vec2::new(20.0, 5.0), Vec2::new(12.0, 12.0)),
        (Vec2::new(-40.0, 7.5), Vec2::new(4.0, 30.0), Vec2::new(3.0, -2.0), Vec2::new(10.0, 1.0)),
        (Vec2::new(100.0, 100.0), Vec2::new(32.0, 32.0), Vec2::new(500.0, 100.0), Vec2::new(8.0, 8.0)),
    ];
    for (pos_a, half_a, pos_b, half_b) in cases {
        assert_eq!(
            overlap_at(pos_a, half_a, pos_b, half_b),
            overlap_at(pos_b, half_b, pos_a, half_a)
        );
    }
}

#[test]
fn test_entity_overlap_is_symmetric() {
    use tilequest::ecs::components::BoundingBox;

    let mut store = EntityStore::new();
    let a = store.add_entity("tile");
    store.insert(a, Transform::new(Vec2::new(10.0, 10.0)));
    store.insert(a, BoundingBox::new(Vec2::new(32.0, 32.0), true, true));
    let b = store.add_entity("npc");
    store.insert(b, Transform::new(Vec2::new(30.0, 0.0)));
    store.insert(b, BoundingBox::new(Vec2::new(24.0, 24.0), true, false));

    let ab = overlap(&store, a, b).unwrap();
    assert_eq!(ab, overlap(&store, b, a).unwrap());
    assert_eq!(ab, Vec2::new(8.0, 18.0));
}

#[test]
fn test_parallel_segments_never_intersect() {
    let hit = segment_intersect(
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(5.0, 0.0),
    );
    assert_eq!(hit, None);
}
