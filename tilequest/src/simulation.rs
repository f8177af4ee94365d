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
//! Frame driver
//!
//! [`Simulation`] owns a [`World`] and the scheduler that runs the frame
//! pipeline over it. One call to [`Simulation::advance_frame`] is one
//! frame: input is applied, the store is flushed, and unless paused the
//! clock ticks and every system runs once.

use crate::animation::AnimationLibrary;
use crate::config::GameConfig;
use crate::ecs::components::InputState;
use crate::ecs::scheduler::Scheduler;
use crate::error::SimResult;
use crate::level::LevelDescription;
use crate::systems::register_pipeline;
use crate::world::{SimSettings, World};
use log::{debug, info};
use std::sync::Arc;

/// A running level
pub struct Simulation {
    world: World,
    scheduler: Scheduler,
    frame: u64,
}

impl Simulation {
    /// Build a world for `description` and register the frame pipeline
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownAnimation`](crate::error::SimError::UnknownAnimation)
    /// if the library lacks a clip the simulation or the level refers to.
    pub fn create_level(
        description: &LevelDescription,
        animations: Arc<AnimationLibrary>,
        config: &GameConfig,
    ) -> SimResult<Self> {
        animations.ensure_required()?;
        let mut world = World::new(description.player, animations, SimSettings::from(config))?;
        description.build_world(&mut world)?;

        let mut scheduler = Scheduler::new();
        register_pipeline(&mut scheduler);
        info!(
            "Simulation ready with {} systems",
            scheduler.system_count()
        );

        Ok(Simulation {
            world,
            scheduler,
            frame: 0,
        })
    }

    /// Run one frame
    ///
    /// `input` is the full held state of the controls. Attack fires on the
    /// frame its flag turns on and re-arms once it is released. Input is
    /// applied and the store flushed even while paused.
    pub fn advance_frame(&mut self, input: &InputState, paused: bool) -> SimResult<()> {
        self.apply_input(input)?;
        self.world.store.update();
        self.frame += 1;

        if paused {
            return Ok(());
        }
        let frame_ms = self.world.settings().frame_ms;
        self.world.clock.advance(frame_ms);
        self.scheduler.run(&mut self.world)
    }

    fn apply_input(&mut self, input: &InputState) -> SimResult<()> {
        let fire = {
            let state = self.world.player_input_mut()?;
            state.copy_directions(input);
            if input.attack {
                let fire = state.can_attack;
                state.attack = true;
                state.can_attack = false;
                fire
            } else {
                state.attack = false;
                state.can_attack = true;
                false
            }
        };

        if fire && self.world.spawn_sword()?.is_none() {
            debug!("Attack ignored, sword already out");
        }
        Ok(())
    }

    /// The world being simulated
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Frames advanced so far, paused ones included
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
