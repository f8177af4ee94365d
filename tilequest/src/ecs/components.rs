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
//! Game components
//!
//! Plain data records attached to entities. None of them carry behavior
//! beyond small accessors; the systems in [`crate::systems`] do the work and
//! branch on which components an entity carries.

use crate::animation::AnimationClip;
use crate::ecs::component::{Component, ComponentStorage, DenseStorage};
use crate::ecs::Entity;
use crate::math::Vec2;

/// Position, motion and orientation of an entity
///
/// `prev_pos` holds the position before this frame's move. Movement and AI
/// overwrite it exactly once per frame, right before they mutate `pos`,
/// which is what lets collision work out the direction of approach.
///
/// # Examples
///
/// ```
/// use tilequest::ecs::components::Transform;
/// use tilequest::math::Vec2;
///
/// let t = Transform::new(Vec2::new(10.0, 20.0));
/// assert_eq!(t.prev_pos, t.pos);
/// assert_eq!(t.scale, Vec2::new(1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Current position (box centre)
    pub pos: Vec2,
    /// Position before this frame's move
    pub prev_pos: Vec2,
    /// Displacement applied per frame
    pub velocity: Vec2,
    /// Unit vector along one axis
    pub facing: Vec2,
    /// Non-uniform render scale; a negative axis mirrors the sprite
    pub scale: Vec2,
    /// Rotation in degrees
    pub angle: f32,
}

impl Transform {
    /// Create a stationary transform facing down
    pub fn new(pos: Vec2) -> Self {
        Transform {
            pos,
            prev_pos: pos,
            velocity: Vec2::zero(),
            facing: Vec2::new(0.0, 1.0),
            scale: Vec2::new(1.0, 1.0),
            angle: 0.0,
        }
    }

    /// Record the current position as the previous one
    pub fn capture_previous(&mut self) {
        self.prev_pos = self.pos;
    }

    /// Check whether the entity moved this frame
    pub fn is_moving(&self) -> bool {
        self.pos != self.prev_pos
    }
}

/// Axis-aligned collision box centred on the entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    size: Vec2,
    half_size: Vec2,
    /// Other entities cannot pass through this box
    pub blocks_movement: bool,
    /// This box blocks NPC line of sight
    pub blocks_vision: bool,
}

impl BoundingBox {
    /// Create a box of the given full size
    pub fn new(size: Vec2, blocks_movement: bool, blocks_vision: bool) -> Self {
        BoundingBox {
            size,
            half_size: size * 0.5,
            blocks_movement,
            blocks_vision,
        }
    }

    /// Create a box from half extents
    pub fn from_half_size(half_size: Vec2, blocks_movement: bool, blocks_vision: bool) -> Self {
        Self::new(half_size * 2.0, blocks_movement, blocks_vision)
    }

    /// Full size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Half size, cached at construction
    pub fn half_size(&self) -> Vec2 {
        self.half_size
    }
}

/// Playback state of an animation clip
///
/// The cursor counts ticks since the clip was (re)started. A clip that is
/// not repeating and has run through all its frames marks its owner for
/// destruction in the animation system.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    clip: AnimationClip,
    tick: u32,
    /// Loop the clip instead of finishing
    pub repeat: bool,
}

impl Animation {
    /// Start playing `clip` from its first frame
    pub fn new(clip: AnimationClip, repeat: bool) -> Self {
        Animation {
            clip,
            tick: 0,
            repeat,
        }
    }

    /// The clip being played
    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Name of the clip being played
    pub fn name(&self) -> &str {
        &self.clip.name
    }

    /// Ticks elapsed since the clip started
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Switch to another clip; the cursor restarts only if the clip changes
    pub fn set_clip(&mut self, clip: &AnimationClip) {
        if self.clip.name != clip.name {
            self.clip = clip.clone();
            self.tick = 0;
        }
    }

    /// Advance the cursor by one tick
    pub fn advance(&mut self) {
        self.tick = self.tick.saturating_add(1);
    }

    /// Frame to display for the current tick
    pub fn frame_index(&self) -> u32 {
        self.clip.frame_at(self.tick)
    }

    /// Check whether one full cycle has played
    pub fn has_ended(&self) -> bool {
        self.clip.has_ended_at(self.tick)
    }
}

/// Directional and action input for the player
///
/// Written by input translation, read by the movement system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    /// Up held
    pub up: bool,
    /// Down held
    pub down: bool,
    /// Left held
    pub left: bool,
    /// Right held
    pub right: bool,
    /// Attack pressed this hold
    pub attack: bool,
    /// Attack latch; cleared on press, set again on release
    pub can_attack: bool,
}

impl Default for InputState {
    fn default() -> Self {
        InputState {
            up: false,
            down: false,
            left: false,
            right: false,
            attack: false,
            can_attack: true,
        }
    }
}

impl InputState {
    /// Copy the directional flags of another input state
    pub fn copy_directions(&mut self, other: &InputState) {
        self.up = other.up;
        self.down = other.down;
        self.left = other.left;
        self.right = other.right;
    }
}

/// Cyclic waypoint walk
///
/// `index` is the waypoint most recently reached; the NPC walks towards
/// `index + 1` (wrapping).
#[derive(Debug, Clone, PartialEq)]
pub struct Patrol {
    waypoints: Vec<Vec2>,
    index: usize,
    /// Step per frame along each axis
    pub speed: f32,
}

impl Patrol {
    /// Create a patrol; returns `None` when there are no waypoints
    pub fn new(waypoints: Vec<Vec2>, speed: f32) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }
        Some(Patrol {
            waypoints,
            index: 0,
            speed,
        })
    }

    /// All waypoints in walk order
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Index of the waypoint most recently reached
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the waypoint being walked towards
    pub fn target_index(&self) -> usize {
        (self.index + 1) % self.waypoints.len()
    }

    /// Position of the waypoint being walked towards
    pub fn target(&self) -> Vec2 {
        self.waypoints[self.target_index()]
    }

    /// Mark the current target as reached
    pub fn advance(&mut self) {
        self.index = self.target_index();
    }
}

/// Chase the player while visible, otherwise go home
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowPlayer {
    home: Vec2,
    /// Step per frame along the major axis
    pub speed: f32,
}

impl FollowPlayer {
    /// Create a follow behavior anchored at `home`
    pub fn new(home: Vec2, speed: f32) -> Self {
        FollowPlayer { home, speed }
    }

    /// Anchor point; fixed for the lifetime of the component
    pub fn home(&self) -> Vec2 {
        self.home
    }
}

/// Destroy the entity after a fixed amount of simulated time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeSpan {
    /// Total lifespan in milliseconds
    pub lifespan_ms: u64,
    /// Simulation clock reading when the component was attached
    pub started_at_ms: u64,
}

impl LifeSpan {
    /// Create a lifespan starting at `now_ms`
    pub fn new(lifespan_ms: u64, now_ms: u64) -> Self {
        LifeSpan {
            lifespan_ms,
            started_at_ms: now_ms,
        }
    }

    /// Check whether the lifespan has run out at `now_ms`
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.lifespan_ms
    }
}

macro_rules! component_set {
    ($($field:ident: $ty:ty),* $(,)?) => {
        /// One dense storage per component type
        #[derive(Debug, Default)]
        pub struct ComponentSet {
            $($field: DenseStorage<$ty>,)*
        }

        impl ComponentSet {
            /// Drop every component attached to `entity`
            pub(crate) fn remove_all(&mut self, entity: Entity) {
                $(self.$field.remove(entity);)*
            }

            /// Drop every component of every entity
            pub(crate) fn clear(&mut self) {
                $(self.$field.clear();)*
            }
        }

        $(
            impl Component for $ty {
                fn storage(set: &ComponentSet) -> &DenseStorage<Self> {
                    &set.$field
                }

                fn storage_mut(set: &mut ComponentSet) -> &mut DenseStorage<Self> {
                    &mut set.$field
                }
            }
        )*
    };
}

component_set! {
    transforms: Transform,
    boxes: BoundingBox,
    animations: Animation,
    inputs: InputState,
    patrols: Patrol,
    follows: FollowPlayer,
    lifespans: LifeSpan,
}
