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
//! Entity management
//!
//! Entities are unique identifiers in the ECS that represent game objects.
//! They are lightweight handles that tie together components; the
//! [`EntityStore`](crate::ecs::EntityStore) owns everything behind them.

use std::fmt;

/// Handle to an entity in the store
///
/// Identities are allocated monotonically and never reused, so a handle to
/// a swept entity can never alias a newer one. Holding a handle does not
/// keep anything alive: it has to be re-resolved through the store, where a
/// stale handle simply fails its presence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

impl Entity {
    /// Create an entity handle from a raw identity
    pub fn new(id: u64) -> Self {
        Entity(id)
    }

    /// Get the raw identity
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Per-entity bookkeeping kept by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntityRecord {
    pub(crate) tag: String,
    pub(crate) alive: bool,
}

impl EntityRecord {
    pub(crate) fn new(tag: &str) -> Self {
        EntityRecord {
            tag: tag.to_string(),
            alive: true,
        }
    }
}
