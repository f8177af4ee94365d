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
//! Staged system scheduler
//!
//! Systems are organized into stages that execute sequentially in stage
//! order; systems sharing a stage run in registration order. The frame
//! pipeline depends on this: each system consumes what the previous one
//! wrote.

use crate::ecs::System;
use crate::error::SimResult;
use crate::world::World;
use log::trace;

/// Stage identifier for grouping systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

/// Pre-defined stages of the frame pipeline
pub mod stages {
    use super::StageId;

    /// Player movement from input
    pub const MOVEMENT: StageId = StageId(0);

    /// NPC patrol and follow behaviors
    pub const AI: StageId = StageId(1);

    /// Lifespan expiry
    pub const LIFESPAN: StageId = StageId(2);

    /// Tile resolution and contact handling
    pub const COLLISION: StageId = StageId(3);

    /// Animation selection and playback
    pub const ANIMATION: StageId = StageId(4);
}

/// A system with metadata for scheduling
struct ScheduledSystem {
    system: Box<dyn System>,
    stage: StageId,
}

/// Runs systems in deterministic stage order
///
/// # Examples
///
/// ```
/// use tilequest::ecs::scheduler::{Scheduler, stages};
/// use tilequest::ecs::System;
/// use tilequest::error::SimResult;
/// use tilequest::world::World;
///
/// struct Noop;
/// impl System for Noop {
///     fn run(&mut self, _world: &mut World) -> SimResult<()> {
///         Ok(())
///     }
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_system(Noop, stages::AI);
/// assert_eq!(scheduler.system_count(), 1);
/// ```
pub struct Scheduler {
    systems: Vec<ScheduledSystem>,
    sorted: bool,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler {
            systems: Vec::new(),
            sorted: true,
        }
    }

    /// Add a system to a specific stage
    pub fn add_system<S: System + 'static>(&mut self, system: S, stage: StageId) {
        self.systems.push(ScheduledSystem {
            system: Box::new(system),
            stage,
        });
        self.sorted = false;
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Get the number of stages in use
    pub fn stage_count(&self) -> usize {
        self.systems
            .iter()
            .map(|s| s.stage.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// Names of the registered systems in execution order
    pub fn system_names(&mut self) -> Vec<String> {
        self.sort();
        self.systems
            .iter()
            .map(|s| s.system.name().to_string())
            .collect()
    }

    fn sort(&mut self) {
        if !self.sorted {
            // stable: registration order is kept within a stage
            self.systems.sort_by_key(|s| s.stage);
            self.sorted = true;
        }
    }

    /// Execute all systems in stage order
    ///
    /// Stops at the first failing system and returns its error.
    pub fn run(&mut self, world: &mut World) -> SimResult<()> {
        self.sort();
        for scheduled in &mut self.systems {
            trace!("Running {}", scheduled.system.name());
            scheduled.system.run(world)?;
        }
        Ok(())
    }

    /// Clear all systems from the scheduler
    pub fn clear(&mut self) {
        self.systems.clear();
        self.sorted = true;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_world;
    use std::sync::{Arc, Mutex};

    struct Recorder {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Self {
            Recorder {
                name: name.to_string(),
                log: Arc::clone(log),
            }
        }
    }

    impl System for Recorder {
        fn run(&mut self, _world: &mut World) -> SimResult<()> {
            self.log.lock().unwrap().push(self.name.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    struct Failing;

    impl System for Failing {
        fn run(&mut self, world: &mut World) -> SimResult<()> {
            let player = world.player();
            world.store.remove::<crate::ecs::components::Transform>(player);
            world.player_transform().map(|_| ())
        }
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler = Scheduler::new();
        assert_eq!(scheduler.system_count(), 0);
        assert_eq!(scheduler.stage_count(), 0);
    }

    #[test]
    fn test_stage_ordering() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Recorder::new("animation", &log), stages::ANIMATION);
        scheduler.add_system(Recorder::new("movement", &log), stages::MOVEMENT);
        scheduler.add_system(Recorder::new("collision", &log), stages::COLLISION);
        scheduler.add_system(Recorder::new("ai", &log), stages::AI);
        scheduler.add_system(Recorder::new("lifespan", &log), stages::LIFESPAN);

        let mut world = empty_world();
        scheduler.run(&mut world).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["movement", "ai", "lifespan", "collision", "animation"]
        );
        assert_eq!(scheduler.stage_count(), 5);
    }

    #[test]
    fn test_registration_order_within_stage() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Recorder::new("first", &log), stages::AI);
        scheduler.add_system(Recorder::new("second", &log), stages::AI);

        assert_eq!(scheduler.system_names(), vec!["first", "second"]);
    }

    #[test]
    fn test_error_stops_the_pass() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Failing, stages::MOVEMENT);
        scheduler.add_system(Recorder::new("after", &log), stages::AI);

        let mut world = empty_world();
        assert!(scheduler.run(&mut world).is_err());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clear_scheduler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Recorder::new("x", &log), stages::AI);
        scheduler.clear();
        assert_eq!(scheduler.system_count(), 0);
    }
}
