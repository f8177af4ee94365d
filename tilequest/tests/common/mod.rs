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
//! Shared fixtures for the scenario tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use tilequest::animation::{names, AnimationClip, AnimationLibrary};
use tilequest::ecs::components::{BoundingBox, Transform};
use tilequest::ecs::Entity;
use tilequest::level::PlayerConfig;
use tilequest::math::Vec2;
use tilequest::world::{SimSettings, World};

/// Every clip the simulation needs plus a few level clips
pub fn library() -> AnimationLibrary {
    let mut library = AnimationLibrary::new();
    for name in names::REQUIRED {
        let size = match name {
            names::SWORD_RIGHT => Vec2::new(48.0, 16.0),
            names::SWORD_UP => Vec2::new(16.0, 48.0),
            _ => Vec2::new(64.0, 64.0),
        };
        library.insert(AnimationClip::new(name, 2, 4, size));
    }
    for name in ["Wall", "Bush", "Tektite", "Octorok"] {
        library.insert(AnimationClip::new(name, 1, 1, Vec2::new(64.0, 64.0)));
    }
    library
}

/// A world whose player stands at `spawn` with a 12x12 half box
pub fn world_at(spawn: Vec2) -> World {
    let player = PlayerConfig {
        spawn,
        half_size: Vec2::new(12.0, 12.0),
        speed: 5.0,
    };
    World::new(player, Arc::new(library()), SimSettings::default()).unwrap()
}

/// Enqueue an entity with a transform and a box
pub fn spawn_box(
    world: &mut World,
    tag: &str,
    pos: Vec2,
    size: Vec2,
    blocks_movement: bool,
    blocks_vision: bool,
) -> Entity {
    let entity = world.store.add_entity(tag);
    world.store.insert(entity, Transform::new(pos));
    world
        .store
        .insert(entity, BoundingBox::new(size, blocks_movement, blocks_vision));
    entity
}

/// Path of a bundled asset file
pub fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}
