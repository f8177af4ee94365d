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
//! Player movement
//!
//! Turns the player's held directions into velocity, moves the player, and
//! keeps the sword pinned in front of them.

use crate::ecs::components::{BoundingBox, InputState, Transform};
use crate::ecs::System;
use crate::error::SimResult;
use crate::math::Vec2;
use crate::world::{World, TAG_SWORD};

/// Pick the single direction to move in, by priority left, right, up, down
pub fn dominant_direction(input: &InputState) -> Option<Vec2> {
    if input.left {
        Some(Vec2::new(-1.0, 0.0))
    } else if input.right {
        Some(Vec2::new(1.0, 0.0))
    } else if input.up {
        Some(Vec2::new(0.0, -1.0))
    } else if input.down {
        Some(Vec2::new(0.0, 1.0))
    } else {
        None
    }
}

/// Moves the player from input and re-pins the sword
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn run(&mut self, world: &mut World) -> SimResult<()> {
        let player = world.player();
        let speed = world.player_config().speed;
        let input = *world.store.component::<InputState>(player)?;
        let player_half = world.store.component::<BoundingBox>(player)?.half_size();

        let (player_pos, facing) = {
            let transform = world.store.component_mut::<Transform>(player)?;
            match dominant_direction(&input) {
                Some(direction) => {
                    transform.velocity = direction * speed;
                    transform.facing = direction;
                    if direction.x != 0.0 {
                        transform.scale.x = direction.x;
                    }
                }
                None => transform.velocity = Vec2::zero(),
            }
            transform.capture_previous();
            transform.pos += transform.velocity;
            (transform.pos, transform.facing)
        };

        for sword in world.store.entities_with_tag(TAG_SWORD) {
            let sword_half = world.store.component::<BoundingBox>(sword)?.half_size();
            let transform = world.store.component_mut::<Transform>(sword)?;
            transform.pos = player_pos + facing * (player_half.x + sword_half.x);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "movement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_world;

    #[test]
    fn test_priority_order() {
        let mut input = InputState {
            up: true,
            down: true,
            left: true,
            right: true,
            ..InputState::default()
        };
        assert_eq!(dominant_direction(&input), Some(Vec2::new(-1.0, 0.0)));
        input.left = false;
        assert_eq!(dominant_direction(&input), Some(Vec2::new(1.0, 0.0)));
        input.right = false;
        assert_eq!(dominant_direction(&input), Some(Vec2::new(0.0, -1.0)));
        input.up = false;
        assert_eq!(dominant_direction(&input), Some(Vec2::new(0.0, 1.0)));
        input.down = false;
        assert_eq!(dominant_direction(&input), None);
    }

    #[test]
    fn test_player_moves_one_axis() {
        let mut world = empty_world();
        let start = world.player_transform().unwrap().pos;
        {
            let input = world.player_input_mut().unwrap();
            input.up = true;
            input.right = true;
        }
        MovementSystem.run(&mut world).unwrap();

        let t = world.player_transform().unwrap();
        let speed = world.player_config().speed;
        assert_eq!(t.prev_pos, start);
        assert_eq!(t.pos, start + Vec2::new(speed, 0.0));
        assert_eq!(t.facing, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_no_input_stops() {
        let mut world = empty_world();
        world.player_input_mut().unwrap().down = true;
        MovementSystem.run(&mut world).unwrap();
        world.player_input_mut().unwrap().down = false;
        MovementSystem.run(&mut world).unwrap();

        let t = world.player_transform().unwrap();
        assert_eq!(t.velocity, Vec2::zero());
        assert_eq!(t.pos, t.prev_pos);
        // facing is kept from the last move
        assert_eq!(t.facing, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_left_mirrors_sprite() {
        let mut world = empty_world();
        world.player_input_mut().unwrap().left = true;
        MovementSystem.run(&mut world).unwrap();
        assert_eq!(world.player_transform().unwrap().scale.x, -1.0);
    }

    #[test]
    fn test_sword_follows_player() {
        let mut world = empty_world();
        let sword = world.spawn_sword().unwrap().unwrap();
        world.store.update();
        world.player_input_mut().unwrap().down = true;
        MovementSystem.run(&mut world).unwrap();

        let player = world.player();
        let player_t = *world.player_transform().unwrap();
        let player_half = world.store.get::<BoundingBox>(player).unwrap().half_size();
        let sword_half = world.store.get::<BoundingBox>(sword).unwrap().half_size();
        let sword_pos = world.store.get::<Transform>(sword).unwrap().pos;
        assert_eq!(
            sword_pos,
            player_t.pos + Vec2::new(0.0, 1.0) * (player_half.x + sword_half.x)
        );
    }
}
