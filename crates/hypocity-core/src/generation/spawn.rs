//! Spawn-position sampling that spreads NPCs around the plaza.

use hypocity_logic::collision::collides;
use hypocity_logic::config::GameConfig;
use hypocity_logic::geometry::{CityLayout, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Which sampler produced a spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Inside the entity's own angular sector, clear of buildings.
    Sector,
    /// Anywhere in the city, clear of buildings and outside the plaza square.
    Fallback,
    /// Random point on the small disk around the origin; never fails.
    LastResort,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec2,
    pub placement: Placement,
}

/// Angular bounds `[start, end)` of sector `index` out of `total`.
pub fn sector_bounds(index: u32, total: u32) -> (f32, f32) {
    let size = TAU / total.max(1) as f32;
    let start = index as f32 * size;
    (start, start + size)
}

/// Pick a spawn point for entity `index` of `total`.
///
/// 1. Up to `sector_attempts` tries at a random angle inside sector `index`
///    and a random radius in `[sector_min_radius, half_city - edge margin)`.
/// 2. Up to `fallback_attempts` tries anywhere in the city, requiring |x| or
///    |z| above `fallback_min_extent`.
/// 3. A random point within `last_resort_radius` of the origin.
///
/// Steps 1 and 2 test collision with `spawn_padding`; step 3 does not, so
/// collision-freedom is best effort under pathological layouts.
pub fn spawn_position(
    layout: &CityLayout,
    index: u32,
    total: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> SpawnPoint {
    let (start, end) = sector_bounds(index, total);

    for _ in 0..config.sector_attempts {
        let angle = rng.gen_range(start..end);
        let radius = rng.gen_range(config.sector_min_radius..config.sector_max_radius());
        let candidate = Vec2::from_angle(angle) * radius;
        if !collides(candidate, layout, config.spawn_padding) {
            return SpawnPoint {
                position: candidate,
                placement: Placement::Sector,
            };
        }
    }

    log::debug!(
        "Sector {}/{} exhausted {} attempts, falling back",
        index,
        total,
        config.sector_attempts
    );
    fallback_position(layout, config, rng)
}

/// Whole-city sampler used when an entity's sector is blocked.
pub fn fallback_position(layout: &CityLayout, config: &GameConfig, rng: &mut impl Rng) -> SpawnPoint {
    let extent = config.half_city() - config.fallback_edge_margin;

    for _ in 0..config.fallback_attempts {
        let candidate = Vec2::new(rng.gen_range(-extent..extent), rng.gen_range(-extent..extent));
        let outside_plaza = candidate.x.abs() > config.fallback_min_extent
            || candidate.z.abs() > config.fallback_min_extent;
        if outside_plaza && !collides(candidate, layout, config.spawn_padding) {
            return SpawnPoint {
                position: candidate,
                placement: Placement::Fallback,
            };
        }
    }

    log::warn!(
        "Spawn fallback exhausted {} attempts, placing near origin",
        config.fallback_attempts
    );
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen::<f32>() * config.last_resort_radius;
    SpawnPoint {
        position: Vec2::from_angle(angle) * radius,
        placement: Placement::LastResort,
    }
}
