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
//! # Tile Quest
//!
//! Simulation core for a 2D tile-based action game, built on a small
//! entity component system.
//!
//! ## Features
//!
//! - **Entity store**: dense per-type component storage with deferred
//!   creation and destruction
//! - **Frame pipeline**: movement, NPC AI, lifespans, collision and
//!   animation in a fixed order
//! - **Geometry**: axis-aligned overlap depths and segment tests for
//!   collision resolution and line of sight
//! - **Scenes**: level select menu and gameplay driven by logical actions
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tilequest::animation::{names, AnimationClip, AnimationLibrary};
//! use tilequest::config::GameConfig;
//! use tilequest::ecs::components::InputState;
//! use tilequest::level::LevelDescription;
//! use tilequest::math::Vec2;
//! use tilequest::simulation::Simulation;
//!
//! let mut library = AnimationLibrary::new();
//! for name in names::REQUIRED {
//!     library.insert(AnimationClip::new(name, 1, 1, Vec2::new(64.0, 64.0)));
//! }
//! let level = LevelDescription::parse("Player 640 384 24 24 5").unwrap();
//! let mut sim = Simulation::create_level(&level, Arc::new(library), &GameConfig::new()).unwrap();
//!
//! let input = InputState { right: true, ..InputState::default() };
//! sim.advance_frame(&input, false).unwrap();
//! assert_eq!(sim.world().player_transform().unwrap().pos, Vec2::new(645.0, 384.0));
//! ```

#![warn(missing_docs)]

/// Animation clips and the clip library
pub mod animation;

/// INI game configuration
pub mod config;

/// Entity Component System implementation
pub mod ecs;

/// Error types
pub mod error;

/// Overlap and line-of-sight geometry
pub mod geometry;

/// Level description parsing and world building
pub mod level;

/// 2D vector math
pub mod math;

/// Render queries
pub mod render;

/// Menu and gameplay scenes
pub mod scene;

/// Frame driver
pub mod simulation;

/// Per-frame systems
pub mod systems;

/// World resources around the entity store
pub mod world;

pub use ecs::{Entity, EntityStore};
pub use error::{SimError, SimResult};
pub use simulation::Simulation;
pub use world::World;
