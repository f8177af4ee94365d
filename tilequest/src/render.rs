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
//! Render queries
//!
//! Drawing is done outside the simulation. This module flattens the world
//! into plain serialisable records a renderer can draw from: sprite
//! placement, the clip frame to show, and the debug geometry (boxes,
//! patrol routes, follow anchors).

use crate::config::GameConfig;
use crate::ecs::components::{Animation, BoundingBox, FollowPlayer, Patrol, Transform};
use crate::error::SimResult;
use crate::math::Vec2;
use crate::world::World;
use serde::Serialize;

/// Debug and camera switches owned by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    /// Draw sprites
    pub draw_textures: bool,
    /// Draw boxes, patrol routes and follow anchors
    pub draw_collision: bool,
    /// Centre the view on the player
    pub follow_camera: bool,
}

impl From<&GameConfig> for RenderOptions {
    fn from(config: &GameConfig) -> Self {
        RenderOptions {
            draw_textures: config.draw_textures,
            draw_collision: config.draw_collision,
            follow_camera: config.follow_camera,
        }
    }
}

/// Collision box of a drawn entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxInfo {
    /// Half extents
    pub half_size: Vec2,
    /// Blocks movement
    pub blocks_movement: bool,
    /// Blocks line of sight
    pub blocks_vision: bool,
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    /// Entity identity
    pub id: u64,
    /// Category tag
    pub tag: String,
    /// Box centre
    pub position: Vec2,
    /// Sprite scale; negative mirrors
    pub scale: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Clip name, if animated
    pub animation: Option<String>,
    /// Frame of the clip to show
    pub frame: u32,
    /// Collision box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoxInfo>,
    /// Patrol route
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<Vec2>,
    /// Follow anchor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<Vec2>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    /// Simulation clock reading
    pub time_ms: u64,
    /// Centre of the view
    pub camera: Vec2,
    /// Entities in identity order
    pub items: Vec<RenderItem>,
}

/// Centre of the room containing `pos`
pub fn room_center(pos: Vec2, room_size: Vec2) -> Vec2 {
    Vec2::new(
        (pos.x / room_size.x).floor() * room_size.x + room_size.x / 2.0,
        (pos.y / room_size.y).floor() * room_size.y + room_size.y / 2.0,
    )
}

impl World {
    /// View centre: the player when following, otherwise the player's room
    pub fn camera_center(&self, follow: bool) -> SimResult<Vec2> {
        let pos = self.player_transform()?.pos;
        if follow {
            Ok(pos)
        } else {
            Ok(room_center(pos, self.settings().room_size))
        }
    }

    /// Flatten every visible entity with a transform into render records
    pub fn render_snapshot(&self, follow: bool) -> SimResult<RenderSnapshot> {
        let mut items = Vec::new();
        for entity in self.store.entities() {
            let Some(transform) = self.store.get::<Transform>(entity) else {
                continue;
            };
            let animation = self.store.get::<Animation>(entity);
            items.push(RenderItem {
                id: entity.id(),
                tag: self.store.tag(entity).unwrap_or_default().to_string(),
                position: transform.pos,
                scale: transform.scale,
                rotation: transform.angle,
                animation: animation.map(|a| a.name().to_string()),
                frame: animation.map_or(0, Animation::frame_index),
                bounding_box: self.store.get::<BoundingBox>(entity).map(|b| BoxInfo {
                    half_size: b.half_size(),
                    blocks_movement: b.blocks_movement,
                    blocks_vision: b.blocks_vision,
                }),
                waypoints: self
                    .store
                    .get::<Patrol>(entity)
                    .map(|p| p.waypoints().to_vec())
                    .unwrap_or_default(),
                home: self.store.get::<FollowPlayer>(entity).map(FollowPlayer::home),
            });
        }

        Ok(RenderSnapshot {
            time_ms: self.clock.now_ms(),
            camera: self.camera_center(follow)?,
            items,
        })
    }
}
