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
//! System trait
//!
//! Systems contain the logic that operates on entities and components.
//! They receive exclusive access to the [`World`] for the duration of their
//! run, so two systems can never touch the store at the same time.

use crate::error::SimResult;
use crate::world::World;

/// Trait for systems that operate on the world
///
/// Systems should keep no per-entity state of their own; everything they
/// need lives in components or world resources.
pub trait System: Send + Sync {
    /// Execute the system on the world
    ///
    /// # Errors
    ///
    /// Propagates component-contract violations such as
    /// [`SimError::MissingComponent`](crate::error::SimError::MissingComponent).
    fn run(&mut self, world: &mut World) -> SimResult<()>;

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
