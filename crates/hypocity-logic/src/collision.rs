//! Point-vs-padded-box collision against city buildings.
//!
//! Moving entities are points; the padding is baked into each building's
//! rectangle instead of doing a true circle/rectangle (Minkowski) test, so
//! points diagonally off a corner are rejected slightly early. Movement uses
//! [`slide_move`], which tests and applies X then Z independently so an
//! entity blocked on one axis still slides along the wall on the other.
//!
//! Cost is O(buildings) per query, which is fine at tens of NPCs and low
//! hundreds of blocks.

use crate::geometry::{CityLayout, Vec2};

/// True when `point` lies strictly inside any building footprint grown by
/// `padding`. Sidewalks never collide.
pub fn collides(point: Vec2, layout: &CityLayout, padding: f32) -> bool {
    layout
        .buildings()
        .any(|b| b.padded_contains(point, padding))
}

/// True when `point` is outside the square `[-bound, bound]²`.
pub fn out_of_bounds(point: Vec2, bound: f32) -> bool {
    point.x.abs() > bound || point.z.abs() > bound
}

/// Clamp `point` into the square `[-bound, bound]²`.
pub fn clamp_to_bounds(point: Vec2, bound: f32) -> Vec2 {
    Vec2::new(point.x.clamp(-bound, bound), point.z.clamp(-bound, bound))
}

/// Result of an axis-separated move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    pub position: Vec2,
    pub blocked_x: bool,
    pub blocked_z: bool,
}

impl SlideResult {
    pub fn moved(&self) -> bool {
        !(self.blocked_x && self.blocked_z)
    }
}

/// Move `from` by `delta`, testing the X step first and then the Z step
/// from wherever X ended up. Each blocked axis stays put.
pub fn slide_move(from: Vec2, delta: Vec2, layout: &CityLayout, padding: f32) -> SlideResult {
    let mut position = from;

    let step_x = Vec2::new(position.x + delta.x, position.z);
    let blocked_x = collides(step_x, layout, padding);
    if !blocked_x {
        position = step_x;
    }

    let step_z = Vec2::new(position.x, position.z + delta.z);
    let blocked_z = collides(step_z, layout, padding);
    if !blocked_z {
        position = step_z;
    }

    SlideResult {
        position,
        blocked_x,
        blocked_z,
    }
}
