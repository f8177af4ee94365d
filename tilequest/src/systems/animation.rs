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
//! Animation selection and playback

use crate::animation::names;
use crate::ecs::components::{Animation, Transform};
use crate::ecs::System;
use crate::error::SimResult;
use crate::world::World;
use log::trace;

/// Clip the player should show for its facing, motion and attack state
///
/// Vertical facings pick the Up/Down clips; everything else uses the Right
/// clip, mirrored through the transform scale when facing left.
pub fn player_animation_key(transform: &Transform, attacking: bool) -> &'static str {
    let facing_up = transform.facing.y < 0.0;
    let facing_down = transform.facing.y > 0.0;

    if attacking {
        if facing_up {
            names::ATTACK_UP
        } else if facing_down {
            names::ATTACK_DOWN
        } else {
            names::ATTACK_RIGHT
        }
    } else if !transform.is_moving() {
        if facing_up {
            names::STAND_UP
        } else if facing_down {
            names::STAND_DOWN
        } else {
            names::STAND_RIGHT
        }
    } else if facing_up {
        names::RUN_UP
    } else if facing_down {
        names::RUN_DOWN
    } else {
        names::RUN_RIGHT
    }
}

/// Picks the player's clip, then advances every animation by one tick
#[derive(Debug, Default)]
pub struct AnimationSystem;

impl AnimationSystem {
    fn select_player_clip(world: &mut World) -> SimResult<()> {
        let player = world.player();
        if !world.store.has::<Animation>(player) {
            return Ok(());
        }
        let attacking = world.active_sword().is_some();
        let key = player_animation_key(world.player_transform()?, attacking);
        let clip = world.animations().get(key)?.clone();
        world
            .store
            .component_mut::<Animation>(player)?
            .set_clip(&clip);
        Ok(())
    }
}

impl System for AnimationSystem {
    fn run(&mut self, world: &mut World) -> SimResult<()> {
        Self::select_player_clip(world)?;

        for entity in world.store.entities() {
            let Some(animation) = world.store.get_mut::<Animation>(entity) else {
                continue;
            };
            animation.advance();
            if !animation.repeat && animation.has_ended() {
                trace!("{} finished `{}`", entity, animation.name());
                world.store.destroy(entity);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "animation"
    }
}
