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
//! Level descriptions
//!
//! A level is a stream of whitespace-separated records:
//!
//! ```text
//! Player 640 384 24 24 5
//! Tile Wall 0 0 0 0 1 1
//! NPC Tektite 0 0 5 3 1 0 Patrol 2 2 5 3 9 3
//! NPC Octorok 1 0 4 4 1 0 Follow 1.5
//! ```
//!
//! Tiles and NPCs are placed on a grid inside a room:
//! `room * room_size + grid * clip_width`, then offset by half the clip so
//! the position is the box centre. Tokens outside a known record are
//! skipped so newer level files still load.

use crate::animation::AnimationLibrary;
use crate::ecs::components::{Animation, BoundingBox, FollowPlayer, Patrol, Transform};
use crate::ecs::Entity;
use crate::error::{SimError, SimResult};
use crate::math::Vec2;
use crate::world::{World, TAG_NPC, TAG_TILE};
use log::{debug, info, warn};
use std::path::Path;
use std::str::SplitWhitespace;

/// Player constants from the `Player` record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    /// Spawn (and respawn) position
    pub spawn: Vec2,
    /// Collision half extents
    pub half_size: Vec2,
    /// Movement per frame
    pub speed: f32,
}

/// Position on the room grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPosition {
    /// Room column
    pub room_x: i32,
    /// Room row
    pub room_y: i32,
    /// Cell column inside the room
    pub grid_x: f32,
    /// Cell row inside the room
    pub grid_y: f32,
}

impl GridPosition {
    /// World position of the cell's top-left corner
    pub fn origin(&self, room_size: Vec2, cell: f32) -> Vec2 {
        room_origin(self.room_x, self.room_y, room_size) + Vec2::new(self.grid_x, self.grid_y) * cell
    }
}

fn room_origin(room_x: i32, room_y: i32, room_size: Vec2) -> Vec2 {
    Vec2::new(room_size.x * room_x as f32, room_size.y * room_y as f32)
}

/// A `Tile` record
#[derive(Debug, Clone, PartialEq)]
pub struct TileSpec {
    /// Clip name
    pub animation: String,
    /// Placement
    pub position: GridPosition,
    /// Blocks movement
    pub blocks_movement: bool,
    /// Blocks line of sight
    pub blocks_vision: bool,
}

/// NPC behaviour from an `NPC` record
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Walk between grid waypoints of the NPC's room
    Patrol {
        /// Step per frame
        speed: f32,
        /// Grid cells, room-relative
        waypoints: Vec<Vec2>,
    },
    /// Chase the player while visible
    Follow {
        /// Step per frame
        speed: f32,
    },
    /// Stand still
    Idle,
}

/// An `NPC` record
#[derive(Debug, Clone, PartialEq)]
pub struct NpcSpec {
    /// Clip name
    pub animation: String,
    /// Placement
    pub position: GridPosition,
    /// Blocks movement
    pub blocks_movement: bool,
    /// Blocks line of sight
    pub blocks_vision: bool,
    /// AI behaviour
    pub behavior: Behavior,
}

/// Parsed level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescription {
    /// Player constants
    pub player: PlayerConfig,
    /// Tiles in file order
    pub tiles: Vec<TileSpec>,
    /// NPCs in file order
    pub npcs: Vec<NpcSpec>,
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn word(&mut self, record: &str, field: &str) -> SimResult<&'a str> {
        self.inner
            .next()
            .ok_or_else(|| SimError::malformed(record, format!("missing {}", field)))
    }

    fn number<T: std::str::FromStr>(&mut self, record: &str, field: &str) -> SimResult<T> {
        let token = self.word(record, field)?;
        token
            .parse()
            .map_err(|_| SimError::malformed(record, format!("{} is not a number: `{}`", field, token)))
    }

    fn scalar(&mut self, record: &str, field: &str) -> SimResult<f32> {
        let value: f32 = self.number(record, field)?;
        if !value.is_finite() {
            return Err(SimError::malformed(record, format!("{} is not finite", field)));
        }
        Ok(value)
    }

    fn point(&mut self, record: &str, x: &str, y: &str) -> SimResult<Vec2> {
        let point = Vec2::new(self.number(record, x)?, self.number(record, y)?);
        if !point.is_finite() {
            return Err(SimError::malformed(record, format!("{}/{} is not finite", x, y)));
        }
        Ok(point)
    }

    fn flag(&mut self, record: &str, field: &str) -> SimResult<bool> {
        Ok(self.number::<i32>(record, field)? != 0)
    }

    fn grid(&mut self, record: &str) -> SimResult<GridPosition> {
        Ok(GridPosition {
            room_x: self.number(record, "room x")?,
            room_y: self.number(record, "room y")?,
            grid_x: self.scalar(record, "grid x")?,
            grid_y: self.scalar(record, "grid y")?,
        })
    }
}

impl LevelDescription {
    /// Parse level text
    ///
    /// # Errors
    ///
    /// [`SimError::MalformedLevel`] for truncated or non-numeric fields, a
    /// patrol without waypoints, or a level without a `Player` record.
    pub fn parse(text: &str) -> SimResult<Self> {
        let mut tokens = Tokens {
            inner: text.split_whitespace(),
        };
        let mut player = None;
        let mut tiles = Vec::new();
        let mut npcs = Vec::new();

        while let Some(token) = tokens.inner.next() {
            match token {
                "Player" => {
                    let config = PlayerConfig {
                        spawn: tokens.point(token, "x", "y")?,
                        half_size: tokens.point(token, "half width", "half height")?,
                        speed: tokens.scalar(token, "speed")?,
                    };
                    if player.replace(config).is_some() {
                        warn!("Level has more than one Player record, using the last one");
                    }
                }
                "Tile" => {
                    tiles.push(TileSpec {
                        animation: tokens.word(token, "animation")?.to_string(),
                        position: tokens.grid(token)?,
                        blocks_movement: tokens.flag(token, "blocks movement")?,
                        blocks_vision: tokens.flag(token, "blocks vision")?,
                    });
                }
                "NPC" => {
                    let animation = tokens.word(token, "animation")?.to_string();
                    let position = tokens.grid(token)?;
                    let blocks_movement = tokens.flag(token, "blocks movement")?;
                    let blocks_vision = tokens.flag(token, "blocks vision")?;
                    let behavior = Self::parse_behavior(&mut tokens)?;
                    npcs.push(NpcSpec {
                        animation,
                        position,
                        blocks_movement,
                        blocks_vision,
                        behavior,
                    });
                }
                other => debug!("Skipping unknown level token `{}`", other),
            }
        }

        let player = player.ok_or_else(|| SimError::malformed("Player", "level has no Player record"))?;
        Ok(LevelDescription {
            player,
            tiles,
            npcs,
        })
    }

    fn parse_behavior(tokens: &mut Tokens<'_>) -> SimResult<Behavior> {
        match tokens.word("NPC", "behavior")? {
            "Patrol" => {
                let speed = tokens.scalar("Patrol", "speed")?;
                let count: usize = tokens.number("Patrol", "waypoint count")?;
                if count == 0 {
                    return Err(SimError::malformed("Patrol", "needs at least one waypoint"));
                }
                let mut waypoints = Vec::with_capacity(count);
                for _ in 0..count {
                    waypoints.push(tokens.point("Patrol", "waypoint x", "waypoint y")?);
                }
                Ok(Behavior::Patrol { speed, waypoints })
            }
            "Follow" => Ok(Behavior::Follow {
                speed: tokens.scalar("Follow", "speed")?,
            }),
            other => {
                warn!("Unknown NPC behavior `{}`, NPC will stand still", other);
                Ok(Behavior::Idle)
            }
        }
    }

    /// Read and parse a level file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Create a world holding this level's entities
    ///
    /// Tiles and NPCs are enqueued in file order after the player, so they
    /// all become visible at the first store update.
    pub fn build_world(&self, world: &mut World) -> SimResult<()> {
        let room_size = world.settings().room_size;

        for tile in &self.tiles {
            let clip = world.animations().get(&tile.animation)?.clone();
            let bbox = BoundingBox::new(clip.size, tile.blocks_movement, tile.blocks_vision);
            let pos = tile.position.origin(room_size, clip.size.x) + bbox.half_size();

            let entity = world.store.add_entity(TAG_TILE);
            world.store.insert(entity, Animation::new(clip, true));
            world.store.insert(entity, bbox);
            world.store.insert(entity, Transform::new(pos));
        }

        for npc in &self.npcs {
            Self::spawn_npc(world, npc, room_size)?;
        }

        info!(
            "Level built: {} tiles, {} NPCs",
            self.tiles.len(),
            self.npcs.len()
        );
        Ok(())
    }

    fn spawn_npc(world: &mut World, npc: &NpcSpec, room_size: Vec2) -> SimResult<Entity> {
        let clip = world.animations().get(&npc.animation)?.clone();
        let cell = clip.size.x;
        let bbox = BoundingBox::new(clip.size, npc.blocks_movement, npc.blocks_vision);
        let half = bbox.half_size();
        let pos = npc.position.origin(room_size, cell) + half;

        let entity = world.store.add_entity(TAG_NPC);
        world.store.insert(entity, bbox);
        world.store.insert(entity, Transform::new(pos));
        world.store.insert(entity, Animation::new(clip, true));

        match &npc.behavior {
            Behavior::Patrol { speed, waypoints } => {
                let origin = room_origin(npc.position.room_x, npc.position.room_y, room_size);
                let points = waypoints
                    .iter()
                    .map(|p| origin + *p * cell + half)
                    .collect();
                let patrol = Patrol::new(points, *speed)
                    .ok_or_else(|| SimError::malformed("Patrol", "needs at least one waypoint"))?;
                world.store.insert(entity, patrol);
            }
            Behavior::Follow { speed } => {
                world.store.insert(entity, FollowPlayer::new(pos, *speed));
            }
            Behavior::Idle => {}
        }
        Ok(entity)
    }
}

/// Clip names a level refers to that `animations` does not define
pub fn missing_clips<'a>(level: &'a LevelDescription, animations: &AnimationLibrary) -> Vec<&'a str> {
    let mut missing: Vec<&str> = level
        .tiles
        .iter()
        .map(|t| t.animation.as_str())
        .chain(level.npcs.iter().map(|n| n.animation.as_str()))
        .filter(|name| !animations.contains(name))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    missing
}
