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
//! Collision handling
//!
//! Two passes per frame. First every movement-blocking tile pushes the
//! player and the NPCs out of itself. Then contacts are checked: an NPC
//! touching the player respawns the player, and the sword kills any NPC it
//! touches.
//!
//! Resolution picks the axis of approach by comparing against the previous
//! frame. If the mover was already overlapping the tile on one axis before
//! it moved, the contact came along the other axis, and only that axis is
//! corrected.

use crate::ecs::components::{BoundingBox, Transform};
use crate::ecs::{Entity, System};
use crate::error::SimResult;
use crate::geometry::{is_overlapping, overlap, previous_overlap};
use crate::math::{sign, Vec2};
use crate::world::{World, TAG_NPC, TAG_SWORD, TAG_TILE};
use log::{debug, trace};

/// Axis a tile contact is resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAxis {
    /// Push along x
    X,
    /// Push along y
    Y,
}

/// Pick the axis to resolve from the previous-frame overlap
///
/// Returns `None` when both or neither axes were already overlapping.
pub fn resolve_axis(previous: Vec2) -> Option<ResolveAxis> {
    match (previous.x > 0.0, previous.y > 0.0) {
        (true, false) => Some(ResolveAxis::Y),
        (false, true) => Some(ResolveAxis::X),
        _ => None,
    }
}

/// New coordinate that puts a mover flush against a tile edge
///
/// The mover ends up on the side it came from (`prev - pos`), falling back
/// to the side its centre is on when it did not move along the axis.
fn edge_coordinate(tile: f32, mover: f32, mover_prev: f32, reach: f32) -> f32 {
    let mut side = sign(mover_prev - mover);
    if side == 0.0 {
        side = sign(mover - tile);
    }
    if side == 0.0 {
        side = -1.0;
    }
    tile + side * reach
}

/// Resolves tile contacts and applies contact consequences
#[derive(Debug, Default)]
pub struct CollisionSystem;

impl CollisionSystem {
    /// Push `mover` out of `tile` if they interpenetrate
    ///
    /// Returns the axis that was resolved.
    pub fn resolve_tile(
        world: &mut World,
        tile: Entity,
        mover: Entity,
    ) -> SimResult<Option<ResolveAxis>> {
        let current = overlap(&world.store, tile, mover)?;
        if !is_overlapping(current) {
            return Ok(None);
        }

        let previous = previous_overlap(&world.store, tile, mover)?;
        let Some(axis) = resolve_axis(previous) else {
            trace!(
                "{} overlaps {} with no single axis of approach, left as is",
                mover,
                tile
            );
            return Ok(None);
        };

        let tile_pos = world.store.component::<Transform>(tile)?.pos;
        let reach = world.store.component::<BoundingBox>(tile)?.half_size()
            + world.store.component::<BoundingBox>(mover)?.half_size();
        let transform = world.store.component_mut::<Transform>(mover)?;
        match axis {
            ResolveAxis::X => {
                transform.pos.x =
                    edge_coordinate(tile_pos.x, transform.pos.x, transform.prev_pos.x, reach.x);
            }
            ResolveAxis::Y => {
                transform.pos.y =
                    edge_coordinate(tile_pos.y, transform.pos.y, transform.prev_pos.y, reach.y);
            }
        }
        Ok(Some(axis))
    }

    fn is_collidable(world: &World, entity: Entity) -> bool {
        world.store.is_alive(entity)
            && world.store.has::<Transform>(entity)
            && world.store.has::<BoundingBox>(entity)
    }

    fn resolve_tiles(world: &mut World, npcs: &[Entity]) -> SimResult<()> {
        let player = world.player();
        for tile in world.store.entities_with_tag(TAG_TILE) {
            let blocks = world
                .store
                .get::<BoundingBox>(tile)
                .is_some_and(|b| b.blocks_movement);
            if !blocks || !world.store.has::<Transform>(tile) {
                continue;
            }

            if Self::is_collidable(world, player) {
                Self::resolve_tile(world, tile, player)?;
            }
            for &npc in npcs {
                if Self::is_collidable(world, npc) {
                    Self::resolve_tile(world, tile, npc)?;
                }
            }
        }
        Ok(())
    }

    fn player_contacts(world: &mut World, npcs: &[Entity]) -> SimResult<()> {
        let player = world.player();
        if !Self::is_collidable(world, player) {
            return Ok(());
        }
        for &npc in npcs {
            if !Self::is_collidable(world, npc) {
                continue;
            }
            if is_overlapping(overlap(&world.store, player, npc)?) {
                debug!("{} touched the player", npc);
                world.respawn_player()?;
                break;
            }
        }
        Ok(())
    }

    fn sword_contacts(world: &mut World, npcs: &[Entity]) -> SimResult<()> {
        for sword in world.store.entities_with_tag(TAG_SWORD) {
            if !Self::is_collidable(world, sword) {
                continue;
            }
            for &npc in npcs {
                if !Self::is_collidable(world, npc) {
                    continue;
                }
                if is_overlapping(overlap(&world.store, sword, npc)?) {
                    let pos = world.store.component::<Transform>(npc)?.pos;
                    world.store.destroy(npc);
                    world.spawn_explosion(pos)?;
                    debug!("{} killed by {}", npc, sword);
                }
            }
        }
        Ok(())
    }
}

impl System for CollisionSystem {
    fn run(&mut self, world: &mut World) -> SimResult<()> {
        let npcs = world.store.entities_with_tag(TAG_NPC);
        Self::resolve_tiles(world, &npcs)?;
        Self::player_contacts(world, &npcs)?;
        Self::sword_contacts(world, &npcs)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "collision"
    }
}
