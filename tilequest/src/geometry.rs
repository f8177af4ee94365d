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
//! Axis-aligned overlap and segment intersection
//!
//! Collision resolution works on per-axis overlap depths rather than a
//! boolean hit test: a positive depth on both axes means the boxes
//! interpenetrate, and comparing against the previous frame's depth tells
//! which axis the contact came from. Line of sight uses segment tests
//! against box edges.

use crate::ecs::components::{BoundingBox, Transform};
use crate::ecs::{Entity, EntityStore};
use crate::error::SimResult;
use crate::math::Vec2;

/// Cross products with a magnitude below this are treated as parallel
const PARALLEL_EPSILON: f32 = 1e-6;

/// Overlap depth of two boxes at the given centres
///
/// `half_a + half_b - |pos_a - pos_b|` per axis.
pub fn overlap_at(pos_a: Vec2, half_a: Vec2, pos_b: Vec2, half_b: Vec2) -> Vec2 {
    let delta = (pos_a - pos_b).abs();
    Vec2::new(
        half_a.x + half_b.x - delta.x,
        half_a.y + half_b.y - delta.y,
    )
}

/// Check that an overlap depth is a real intersection (positive on both axes)
pub fn is_overlapping(overlap: Vec2) -> bool {
    overlap.x > 0.0 && overlap.y > 0.0
}

/// Current overlap depth between two entities
///
/// # Errors
///
/// Both entities must carry a [`Transform`] and a [`BoundingBox`].
pub fn overlap(store: &EntityStore, a: Entity, b: Entity) -> SimResult<Vec2> {
    let pos_a = store.component::<Transform>(a)?.pos;
    let pos_b = store.component::<Transform>(b)?.pos;
    let half_a = store.component::<BoundingBox>(a)?.half_size();
    let half_b = store.component::<BoundingBox>(b)?.half_size();
    Ok(overlap_at(pos_a, half_a, pos_b, half_b))
}

/// Overlap depth using `b`'s previous-frame position
///
/// A positive depth on an axis means the two were already aligned on that
/// axis before `b` moved, so the contact came along the other axis.
pub fn previous_overlap(store: &EntityStore, a: Entity, b: Entity) -> SimResult<Vec2> {
    let pos_a = store.component::<Transform>(a)?.pos;
    let prev_b = store.component::<Transform>(b)?.prev_pos;
    let half_a = store.component::<BoundingBox>(a)?.half_size();
    let half_b = store.component::<BoundingBox>(b)?.half_size();
    Ok(overlap_at(pos_a, half_a, prev_b, half_b))
}

/// Intersection of segments `a..b` and `c..d`
///
/// Returns the intersection point when both parametric coordinates fall in
/// `[0, 1]`. Parallel and zero-length segments never intersect.
///
/// ```
/// use tilequest::geometry::segment_intersect;
/// use tilequest::math::Vec2;
///
/// let hit = segment_intersect(
///     Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0),
///     Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0),
/// );
/// assert_eq!(hit, Some(Vec2::new(5.0, 5.0)));
/// ```
pub fn segment_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let r = b - a;
    let s = d - c;
    let rxs = r.cross(s);
    if rxs.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let cma = c - a;
    let t = cma.cross(s) / rxs;
    let u = cma.cross(r) / rxs;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a + r * t)
    } else {
        None
    }
}

/// Corners of a box in edge order (each corner connects to the next)
pub fn box_corners(pos: Vec2, half: Vec2) -> [Vec2; 4] {
    [
        Vec2::new(pos.x - half.x, pos.y - half.y),
        Vec2::new(pos.x + half.x, pos.y - half.y),
        Vec2::new(pos.x + half.x, pos.y + half.y),
        Vec2::new(pos.x - half.x, pos.y + half.y),
    ]
}

/// Check whether segment `a..b` crosses any edge of a box
pub fn segment_hits_box(a: Vec2, b: Vec2, pos: Vec2, half: Vec2) -> bool {
    let corners = box_corners(pos, half);
    (0..4).any(|i| segment_intersect(a, b, corners[i], corners[(i + 1) % 4]).is_some())
}

/// Check whether segment `a..b` crosses the box of `entity`
pub fn entity_blocks_segment(
    store: &EntityStore,
    a: Vec2,
    b: Vec2,
    entity: Entity,
) -> SimResult<bool> {
    let pos = store.component::<Transform>(entity)?.pos;
    let half = store.component::<BoundingBox>(entity)?.half_size();
    Ok(segment_hits_box(a, b, pos, half))
}
