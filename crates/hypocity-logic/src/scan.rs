//! Scan cone and cleaner reach tests.
//!
//! Distances here are full 3D: the player's eye is `eye_height` above the
//! ground while NPC positions sit on it, so the effective planar reach is a
//! little shorter than the nominal range.

use crate::config::GameConfig;
use crate::geometry::Vec3;

/// True when `target` is closer than `scan_range` to `eye` and the direction
/// to it lies inside the cone around `facing` (dot product above
/// `1 - scan_angle`).
pub fn in_scan_cone(eye: Vec3, facing: Vec3, target: Vec3, config: &GameConfig) -> bool {
    let offset = target - eye;
    if offset.length() >= config.scan_range {
        return false;
    }
    let to_target = offset.normalize();
    facing.normalize().dot(&to_target) > config.scan_dot_threshold()
}

/// Pick the closest candidate strictly within `range` of `origin`.
///
/// Ties keep the earlier candidate, so callers should pass candidates in a
/// stable order.
pub fn nearest_within<K: Copy>(
    origin: Vec3,
    range: f32,
    candidates: impl IntoIterator<Item = (K, Vec3)>,
) -> Option<(K, f32)> {
    let mut best: Option<(K, f32)> = None;
    let mut limit = range;
    for (key, position) in candidates {
        let d = position.distance(&origin);
        if d < limit {
            limit = d;
            best = Some((key, d));
        }
    }
    best
}
