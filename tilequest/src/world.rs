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
//! The simulation world
//!
//! [`World`] bundles the entity store with the resources every system
//! needs: the current player handle, the level's player constants, the
//! animation library and the simulation clock. Systems receive it as
//! `&mut World`, which is also what serialises them.

use crate::animation::{names, AnimationLibrary};
use crate::config::GameConfig;
use crate::ecs::components::{Animation, BoundingBox, InputState, LifeSpan, Transform};
use crate::ecs::{Entity, EntityStore};
use crate::error::SimResult;
use crate::level::PlayerConfig;
use crate::math::Vec2;
use log::debug;
use std::sync::Arc;

/// Tag of the player entity
pub const TAG_PLAYER: &str = "player";
/// Tag of level tiles
pub const TAG_TILE: &str = "tile";
/// Tag of non-player characters
pub const TAG_NPC: &str = "npc";
/// Tag of the player's sword
pub const TAG_SWORD: &str = "sword";
/// Tag of explosion effects
pub const TAG_EXPLOSION: &str = "explosions";

/// Render scale applied to explosion effects
const EXPLOSION_SCALE: f32 = 0.8;

/// Deterministic simulation time in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    now_ms: u64,
}

impl SimClock {
    /// Start a clock at `now_ms`
    pub fn starting_at(now_ms: u64) -> Self {
        SimClock { now_ms }
    }

    /// Current reading
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }
}

/// Simulation constants derived from the game configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSettings {
    /// Size of one room in world units (the window size)
    pub room_size: Vec2,
    /// Simulated milliseconds per frame
    pub frame_ms: u64,
    /// How long a sword swing stays out
    pub sword_lifespan_ms: u64,
}

impl Default for SimSettings {
    fn default() -> Self {
        SimSettings::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for SimSettings {
    fn from(config: &GameConfig) -> Self {
        SimSettings {
            room_size: Vec2::new(config.window_width as f32, config.window_height as f32),
            frame_ms: config.frame_ms,
            sword_lifespan_ms: config.sword_lifespan_ms,
        }
    }
}

/// The entity store plus shared simulation resources
#[derive(Debug)]
pub struct World {
    /// All entities and components
    pub store: EntityStore,
    /// Simulation time
    pub clock: SimClock,
    player: Entity,
    sword: Option<Entity>,
    player_config: PlayerConfig,
    animations: Arc<AnimationLibrary>,
    settings: SimSettings,
}

impl World {
    /// Create a world and spawn the player
    ///
    /// # Errors
    ///
    /// Fails if the player's standing clip is missing from `animations`.
    pub fn new(
        player_config: PlayerConfig,
        animations: Arc<AnimationLibrary>,
        settings: SimSettings,
    ) -> SimResult<Self> {
        let mut store = EntityStore::new();
        let player = Self::build_player(&mut store, &player_config, &animations)?;
        Ok(World {
            store,
            clock: SimClock::default(),
            player,
            sword: None,
            player_config,
            animations,
            settings,
        })
    }

    fn build_player(
        store: &mut EntityStore,
        config: &PlayerConfig,
        animations: &AnimationLibrary,
    ) -> SimResult<Entity> {
        let clip = animations.get(names::STAND_DOWN)?;
        let player = store.add_entity(TAG_PLAYER);
        store.insert(player, Transform::new(config.spawn));
        store.insert(
            player,
            BoundingBox::from_half_size(config.half_size, false, false),
        );
        store.insert(player, Animation::new(clip.clone(), true));
        store.insert(player, InputState::default());
        Ok(player)
    }

    /// Current player handle
    ///
    /// Changes when the player is respawned.
    pub fn player(&self) -> Entity {
        self.player
    }

    /// Level constants for the player
    pub fn player_config(&self) -> &PlayerConfig {
        &self.player_config
    }

    /// Clip library
    pub fn animations(&self) -> &AnimationLibrary {
        &self.animations
    }

    /// Simulation constants
    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Player transform
    pub fn player_transform(&self) -> SimResult<&Transform> {
        self.store.component::<Transform>(self.player)
    }

    /// Player input state
    pub fn player_input_mut(&mut self) -> SimResult<&mut InputState> {
        self.store.component_mut::<InputState>(self.player)
    }

    /// Destroy the current player and spawn a fresh one at the spawn point
    ///
    /// The input state carries over so held keys keep working.
    pub fn respawn_player(&mut self) -> SimResult<Entity> {
        let input = self
            .store
            .get::<InputState>(self.player)
            .copied()
            .unwrap_or_default();
        self.store.destroy(self.player);
        let player = Self::build_player(&mut self.store, &self.player_config, &self.animations)?;
        self.store.insert(player, input);
        debug!("Respawned player as {}", player);
        self.player = player;
        Ok(player)
    }

    /// The sword currently out, if any
    pub fn active_sword(&self) -> Option<Entity> {
        self.sword.filter(|sword| self.store.is_alive(*sword))
    }

    /// Swing the sword in the player's facing direction
    ///
    /// Does nothing and returns `None` while a sword is already out.
    pub fn spawn_sword(&mut self) -> SimResult<Option<Entity>> {
        if self.active_sword().is_some() {
            return Ok(None);
        }

        let (player_pos, facing) = {
            let t = self.player_transform()?;
            (t.pos, t.facing)
        };
        let player_half = self.store.component::<BoundingBox>(self.player)?.half_size();
        let clip_name = if facing.y != 0.0 {
            names::SWORD_UP
        } else {
            names::SWORD_RIGHT
        };
        let clip = self.animations.get(clip_name)?.clone();
        let bbox = BoundingBox::new(clip.size, false, false);

        let mut transform =
            Transform::new(player_pos + facing * (player_half.x + bbox.half_size().x));
        transform.facing = facing;
        if facing.x != 0.0 {
            transform.scale.x = facing.x;
        }
        if facing.y != 0.0 {
            transform.scale.y = -facing.y;
        }

        let sword = self.store.add_entity(TAG_SWORD);
        self.store.insert(sword, Animation::new(clip, true));
        self.store.insert(sword, bbox);
        self.store.insert(sword, transform);
        self.store.insert(
            sword,
            LifeSpan::new(self.settings.sword_lifespan_ms, self.clock.now_ms()),
        );
        debug!("Sword out as {}", sword);
        self.sword = Some(sword);
        Ok(Some(sword))
    }

    /// Spawn a one-shot explosion effect at `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2) -> SimResult<Entity> {
        let clip = self.animations.get(names::EXPLOSION)?.clone();
        let explosion = self.store.add_entity(TAG_EXPLOSION);
        let mut transform = Transform::new(pos);
        transform.scale *= EXPLOSION_SCALE;
        self.store.insert(explosion, Animation::new(clip, false));
        self.store.insert(explosion, transform);
        Ok(explosion)
    }
}
