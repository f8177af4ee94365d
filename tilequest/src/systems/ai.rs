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
//! NPC behaviors
//!
//! Patrol NPCs walk their waypoint loop one axis step at a time. Follow NPCs
//! chase the player while they can see them and walk home when they cannot.

use crate::ecs::components::{BoundingBox, FollowPlayer, Patrol, Transform};
use crate::ecs::{Entity, System};
use crate::error::SimResult;
use crate::geometry::entity_blocks_segment;
use crate::math::{sign, Vec2};
use crate::world::{World, TAG_NPC};

/// Distance at which a waypoint or home counts as reached
pub const ARRIVAL_DISTANCE: f32 = 5.0;

/// Per-axis patrol step towards `target`
///
/// Each axis moves by `speed` in the direction of the target, clamped so it
/// never steps past the target on that axis.
pub fn patrol_step(pos: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let delta = target - pos;
    Vec2::new(
        sign(delta.x) * speed.min(delta.x.abs()),
        sign(delta.y) * speed.min(delta.y.abs()),
    )
}

/// Follow step along `direction`
///
/// The axis with the larger delta moves at full `speed`; the other moves at
/// `speed * |minor / major|`, so the NPC walks a straight line.
pub fn follow_step(direction: Vec2, speed: f32) -> Vec2 {
    let mut speed_x = speed;
    let mut speed_y = speed;
    if direction.x.abs() > direction.y.abs() {
        speed_y = (speed * direction.y / direction.x).abs();
    } else if direction.x.abs() < direction.y.abs() {
        speed_x = (speed * direction.x / direction.y).abs();
    }
    Vec2::new(speed_x * sign(direction.x), speed_y * sign(direction.y))
}

/// Check whether anything that blocks vision lies between `from` and `to`
///
/// `ignore` lists entities that never block (the viewer and the target).
pub fn line_of_sight_blocked(
    world: &World,
    from: Vec2,
    to: Vec2,
    ignore: &[Entity],
) -> SimResult<bool> {
    for entity in world.store.entities() {
        if ignore.contains(&entity) {
            continue;
        }
        let blocks = world
            .store
            .get::<BoundingBox>(entity)
            .is_some_and(|b| b.blocks_vision);
        if blocks && entity_blocks_segment(&world.store, from, to, entity)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Runs patrol and follow behaviors for every NPC
#[derive(Debug, Default)]
pub struct AiSystem;

impl AiSystem {
    fn patrol(world: &mut World, npc: Entity) -> SimResult<()> {
        let (target, speed) = {
            let patrol = world.store.component::<Patrol>(npc)?;
            (patrol.target(), patrol.speed)
        };

        let pos = {
            let transform = world.store.component_mut::<Transform>(npc)?;
            transform.pos += patrol_step(transform.pos, target, speed);
            transform.pos
        };

        if pos.distance(target) <= ARRIVAL_DISTANCE {
            world.store.component_mut::<Patrol>(npc)?.advance();
        }
        Ok(())
    }

    fn follow(world: &mut World, npc: Entity) -> SimResult<()> {
        let follow = *world.store.component::<FollowPlayer>(npc)?;
        let pos = world.store.component::<Transform>(npc)?.pos;
        let player = world.player();
        let player_pos = world.player_transform()?.pos;

        let blocked = line_of_sight_blocked(world, pos, player_pos, &[npc, player])?;
        let direction = if !blocked {
            player_pos - pos
        } else if pos.distance(follow.home()) > ARRIVAL_DISTANCE {
            follow.home() - pos
        } else {
            Vec2::zero()
        };

        world.store.component_mut::<Transform>(npc)?.pos += follow_step(direction, follow.speed);
        Ok(())
    }
}

impl System for AiSystem {
    fn run(&mut self, world: &mut World) -> SimResult<()> {
        for npc in world.store.entities_with_tag(TAG_NPC) {
            // once per frame, before either behavior moves it
            if let Some(transform) = world.store.get_mut::<Transform>(npc) {
                transform.capture_previous();
            }
            if world.store.has::<Patrol>(npc) {
                Self::patrol(world, npc)?;
            }
            if world.store.has::<FollowPlayer>(npc) {
                Self::follow(world, npc)?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "ai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patrol_step_is_taxicab() {
        let step = patrol_step(Vec2::zero(), Vec2::new(100.0, -50.0), 5.0);
        assert_eq!(step, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_patrol_step_never_overshoots() {
        let step = patrol_step(Vec2::zero(), Vec2::new(3.0, 0.0), 5.0);
        assert_eq!(step, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_follow_step_keeps_speed_on_major_axis() {
        let step = follow_step(Vec2::new(100.0, 50.0), 4.0);
        assert_eq!(step, Vec2::new(4.0, 2.0));

        let step = follow_step(Vec2::new(-25.0, -100.0), 4.0);
        assert_eq!(step, Vec2::new(-1.0, -4.0));
    }

    #[test]
    fn test_follow_step_zero_direction() {
        assert_eq!(follow_step(Vec2::zero(), 3.0), Vec2::zero());
    }

    #[test]
    fn test_follow_step_diagonal() {
        assert_eq!(follow_step(Vec2::new(10.0, -10.0), 2.0), Vec2::new(2.0, -2.0));
    }
}
