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
//! Error types for the simulation core

use crate::ecs::Entity;
use thiserror::Error;

/// Errors surfaced by the simulation core
#[derive(Debug, Error)]
pub enum SimError {
    /// A component was requested from an entity that does not carry it.
    ///
    /// This is a data-contract violation: the loader attaches components in
    /// fixed combinations and systems rely on them.
    #[error("{entity} has no {component} component")]
    MissingComponent {
        /// The entity that was queried
        entity: Entity,
        /// Type name of the missing component
        component: &'static str,
    },

    /// A level description record was truncated or carried a bad field
    #[error("malformed level record `{record}`: {reason}")]
    MalformedLevel {
        /// Record keyword (`Player`, `Tile`, `NPC`, ...)
        record: String,
        /// What was wrong with it
        reason: String,
    },

    /// An animation clip name was not found in the library
    #[error("unknown animation `{0}`")]
    UnknownAnimation(String),

    /// Malformed animation asset description
    #[error("malformed animation record: {0}")]
    MalformedAsset(String),

    /// Configuration file could not be loaded
    #[error("config error: {0}")]
    Config(String),

    /// Underlying I/O failure while reading level or asset files
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Build a [`SimError::MissingComponent`] for component type `C`
    pub fn missing<C: 'static>(entity: Entity) -> Self {
        SimError::MissingComponent {
            entity,
            component: std::any::type_name::<C>(),
        }
    }

    pub(crate) fn malformed(record: &str, reason: impl Into<String>) -> Self {
        SimError::MalformedLevel {
            record: record.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate
pub type SimResult<T> = Result<T, SimError>;
