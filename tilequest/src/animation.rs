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
//! Animation clips and the clip library
//!
//! Textures and sprite sheets are handled by the renderer; the simulation
//! only needs a clip's name, its frame count, how many ticks each frame
//! lasts, and the pixel size of one frame (which also sizes tiles and
//! collision boxes).
//!
//! # Asset description format
//!
//! ```text
//! Animation StandDown 1 1 64 64
//! Animation RunRight  2 8 64 64
//! ```
//!
//! `Animation <name> <frames> <speed> <width> <height>`. Other tokens are
//! skipped, so a full asset manifest with texture and font records can be
//! fed in unchanged.

use crate::error::{SimError, SimResult};
use crate::math::Vec2;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

/// Clip names the simulation refers to directly
pub mod names {
    /// Player standing, facing down
    pub const STAND_DOWN: &str = "StandDown";
    /// Player standing, facing up
    pub const STAND_UP: &str = "StandUp";
    /// Player standing, facing sideways (mirrored for left)
    pub const STAND_RIGHT: &str = "StandRight";
    /// Player walking down
    pub const RUN_DOWN: &str = "RunDown";
    /// Player walking up
    pub const RUN_UP: &str = "RunUp";
    /// Player walking sideways
    pub const RUN_RIGHT: &str = "RunRight";
    /// Player attacking down
    pub const ATTACK_DOWN: &str = "AtkDown";
    /// Player attacking up
    pub const ATTACK_UP: &str = "AtkUp";
    /// Player attacking sideways
    pub const ATTACK_RIGHT: &str = "AtkRight";
    /// Horizontal sword
    pub const SWORD_RIGHT: &str = "SwordRight";
    /// Vertical sword
    pub const SWORD_UP: &str = "SwordUp";
    /// NPC death effect
    pub const EXPLOSION: &str = "Explosion";

    /// Every clip the simulation itself needs
    pub const REQUIRED: [&str; 12] = [
        STAND_DOWN,
        STAND_UP,
        STAND_RIGHT,
        RUN_DOWN,
        RUN_UP,
        RUN_RIGHT,
        ATTACK_DOWN,
        ATTACK_UP,
        ATTACK_RIGHT,
        SWORD_RIGHT,
        SWORD_UP,
        EXPLOSION,
    ];
}

/// A named animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Clip name, also the render key
    pub name: String,
    /// Number of frames in one cycle
    pub frame_count: u32,
    /// Ticks each frame is shown for
    pub speed: u32,
    /// Pixel size of one frame
    pub size: Vec2,
}

impl AnimationClip {
    /// Create a clip. Zero frame counts and speeds are bumped to one.
    pub fn new(name: &str, frame_count: u32, speed: u32, size: Vec2) -> Self {
        AnimationClip {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            speed: speed.max(1),
            size,
        }
    }

    /// Frame shown at `tick` ticks after the clip started
    pub fn frame_at(&self, tick: u32) -> u32 {
        (tick / self.speed) % self.frame_count
    }

    /// Check whether a full cycle has played after `tick` ticks
    pub fn has_ended_at(&self, tick: u32) -> bool {
        tick / self.speed >= self.frame_count
    }
}

/// Clips addressable by name
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    clips: HashMap<String, AnimationClip>,
}

impl AnimationLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        AnimationLibrary {
            clips: HashMap::new(),
        }
    }

    /// Add a clip, replacing any clip with the same name
    pub fn insert(&mut self, clip: AnimationClip) {
        if self.clips.insert(clip.name.clone(), clip).is_some() {
            debug!("Replaced animation clip definition");
        }
    }

    /// Look up a clip
    pub fn get(&self, name: &str) -> SimResult<&AnimationClip> {
        self.clips
            .get(name)
            .ok_or_else(|| SimError::UnknownAnimation(name.to_string()))
    }

    /// Check whether a clip exists
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Check that every clip in [`names::REQUIRED`] is present
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownAnimation`] naming the first missing clip.
    pub fn ensure_required(&self) -> SimResult<()> {
        match names::REQUIRED.iter().find(|name| !self.contains(name)) {
            Some(name) => Err(SimError::UnknownAnimation(name.to_string())),
            None => Ok(()),
        }
    }

    /// Parse an asset description
    pub fn parse(text: &str) -> SimResult<Self> {
        let mut library = AnimationLibrary::new();
        let mut tokens = text.split_whitespace();

        while let Some(token) = tokens.next() {
            if token != "Animation" {
                continue;
            }
            let name = tokens
                .next()
                .ok_or_else(|| SimError::MalformedAsset("missing clip name".into()))?;
            let frame_count = next_number::<u32>(&mut tokens, name, "frame count")?;
            let speed = next_number::<u32>(&mut tokens, name, "speed")?;
            let width = next_number::<f32>(&mut tokens, name, "width")?;
            let height = next_number::<f32>(&mut tokens, name, "height")?;
            if frame_count == 0 || speed == 0 {
                warn!("Animation `{}` has zero frames or speed, clamping to 1", name);
            }
            library.insert(AnimationClip::new(
                name,
                frame_count,
                speed,
                Vec2::new(width, height),
            ));
        }

        Ok(library)
    }

    /// Read and parse an asset description file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

fn next_number<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    clip: &str,
    field: &str,
) -> SimResult<T> {
    let token = tokens
        .next()
        .ok_or_else(|| SimError::MalformedAsset(format!("`{}` is missing its {}", clip, field)))?;
    token.parse().map_err(|_| {
        SimError::MalformedAsset(format!("`{}` has a bad {}: `{}`", clip, field, token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_cycle() {
        let clip = AnimationClip::new("Run", 2, 3, Vec2::new(64.0, 64.0));
        assert_eq!(clip.frame_at(0), 0);
        assert_eq!(clip.frame_at(2), 0);
        assert_eq!(clip.frame_at(3), 1);
        assert_eq!(clip.frame_at(6), 0);
        assert!(!clip.has_ended_at(5));
        assert!(clip.has_ended_at(6));
    }

    #[test]
    fn test_zero_speed_is_clamped() {
        let clip = AnimationClip::new("Odd", 0, 0, Vec2::zero());
        assert_eq!(clip.frame_count, 1);
        assert_eq!(clip.speed, 1);
        assert_eq!(clip.frame_at(10), 0);
    }

    #[test]
    fn test_parse_skips_unknown_records() {
        let text = "Texture TexStand images/stand.png\n\
                    Animation StandDown 1 1 64 64\n\
                    Font Megaman fonts/megaman.ttf\n\
                    Animation Explosion 4 5 64 64\n";
        let library = AnimationLibrary::parse(text).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.get("Explosion").unwrap().frame_count, 4);
        assert!(library.contains("StandDown"));
    }

    #[test]
    fn test_parse_rejects_truncated_record() {
        let err = AnimationLibrary::parse("Animation Broken 2 3 64").unwrap_err();
        assert!(matches!(err, SimError::MalformedAsset(_)));
    }

    #[test]
    fn test_unknown_clip_lookup() {
        let library = AnimationLibrary::new();
        let err = library.get("Nope").unwrap_err();
        assert!(matches!(err, SimError::UnknownAnimation(name) if name == "Nope"));
    }
}
