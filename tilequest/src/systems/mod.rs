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
//! Per-frame simulation systems
//!
//! One frame runs, in order: movement, AI, lifespan, collision, animation.
//! Each reads what the one before it wrote, so the order is fixed by the
//! stage each system is registered in.

mod ai;
mod animation;
mod collision;
mod lifespan;
mod movement;

pub use ai::{follow_step, line_of_sight_blocked, patrol_step, AiSystem, ARRIVAL_DISTANCE};
pub use animation::{player_animation_key, AnimationSystem};
pub use collision::{resolve_axis, CollisionSystem, ResolveAxis};
pub use lifespan::LifespanSystem;
pub use movement::{dominant_direction, MovementSystem};

use crate::ecs::scheduler::{stages, Scheduler};

/// Register the full frame pipeline on `scheduler`
pub fn register_pipeline(scheduler: &mut Scheduler) {
    scheduler.add_system(MovementSystem, stages::MOVEMENT);
    scheduler.add_system(AiSystem, stages::AI);
    scheduler.add_system(LifespanSystem, stages::LIFESPAN);
    scheduler.add_system(CollisionSystem, stages::COLLISION);
    scheduler.add_system(AnimationSystem, stages::ANIMATION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let mut scheduler = Scheduler::new();
        register_pipeline(&mut scheduler);
        assert_eq!(
            scheduler.system_names(),
            vec!["movement", "ai", "lifespan", "collision", "animation"]
        );
    }
}
