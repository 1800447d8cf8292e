//! Session tunables.
//!
//! `GameConfig::default()` reproduces the stock game. Every field is
//! `#[serde(default)]`, so a JSON override file only needs the values it
//! changes. [`GameConfig::validate`] rejects combinations the simulation
//! cannot run with.

use serde::{Deserialize, Serialize};

use crate::constants::{city, collision, npc, player, session, spawn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // City layout
    pub city_size: f32,
    pub block_size: f32,
    pub street_width: f32,
    pub grid_margin: f32,
    pub plaza_half_extent: f32,
    pub building_inset: f32,
    pub building_min_height: f32,
    pub building_max_height: f32,
    pub sidewalk_height: f32,
    pub playable_bound: f32,

    // Collision
    pub move_padding: f32,
    pub spawn_padding: f32,

    // Population and spawning
    pub npc_count: u32,
    pub hypocrite_probability: f64,
    pub sector_min_radius: f32,
    pub sector_edge_margin: f32,
    pub sector_attempts: u32,
    pub fallback_attempts: u32,
    pub fallback_edge_margin: f32,
    pub fallback_min_extent: f32,
    pub last_resort_radius: f32,

    // Player
    pub player_speed: f32,
    pub eye_height: f32,
    pub scan_range: f32,
    pub scan_angle: f32,
    pub item_range: f32,

    // NPC behavior
    pub walk_speed: f32,
    pub chase_speed: f32,
    pub catch_distance: f32,
    pub react_radius: f32,
    pub wave_radius: f32,
    pub react_slowdown: f32,
    pub look_ahead: f32,
    pub avoid_margin: f32,
    pub avoid_weight: f32,
    pub touch_cooldown: f64,

    // Session
    pub victory_threshold: u32,
    pub notification_secs: f64,
    pub damage_flash_secs: f64,
    pub scan_beam_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            city_size: city::CITY_SIZE,
            block_size: city::BLOCK_SIZE,
            street_width: city::STREET_WIDTH,
            grid_margin: city::GRID_MARGIN,
            plaza_half_extent: city::PLAZA_HALF_EXTENT,
            building_inset: city::BUILDING_INSET,
            building_min_height: city::BUILDING_MIN_HEIGHT,
            building_max_height: city::BUILDING_MAX_HEIGHT,
            sidewalk_height: city::SIDEWALK_HEIGHT,
            playable_bound: city::PLAYABLE_BOUND,

            move_padding: collision::MOVE_PADDING,
            spawn_padding: collision::SPAWN_PADDING,

            npc_count: spawn::NPC_COUNT,
            hypocrite_probability: spawn::HYPOCRITE_PROBABILITY,
            sector_min_radius: spawn::SECTOR_MIN_RADIUS,
            sector_edge_margin: spawn::SECTOR_EDGE_MARGIN,
            sector_attempts: spawn::SECTOR_ATTEMPTS,
            fallback_attempts: spawn::FALLBACK_ATTEMPTS,
            fallback_edge_margin: spawn::FALLBACK_EDGE_MARGIN,
            fallback_min_extent: spawn::FALLBACK_MIN_EXTENT,
            last_resort_radius: spawn::LAST_RESORT_RADIUS,

            player_speed: player::SPEED,
            eye_height: player::EYE_HEIGHT,
            scan_range: player::SCAN_RANGE,
            scan_angle: player::SCAN_ANGLE,
            item_range: player::ITEM_RANGE,

            walk_speed: npc::WALK_SPEED,
            chase_speed: npc::CHASE_SPEED,
            catch_distance: npc::CATCH_DISTANCE,
            react_radius: npc::REACT_RADIUS,
            wave_radius: npc::WAVE_RADIUS,
            react_slowdown: npc::REACT_SLOWDOWN,
            look_ahead: npc::LOOK_AHEAD,
            avoid_margin: npc::AVOID_MARGIN,
            avoid_weight: npc::AVOID_WEIGHT,
            touch_cooldown: npc::TOUCH_COOLDOWN,

            victory_threshold: session::VICTORY_THRESHOLD,
            notification_secs: session::NOTIFICATION_SECS,
            damage_flash_secs: session::DAMAGE_FLASH_SECS,
            scan_beam_secs: session::SCAN_BEAM_SECS,
        }
    }
}

/// A config value the simulation cannot run with.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidConfig {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for InvalidConfig {}

impl GameConfig {
    /// Half the city side.
    pub fn half_city(&self) -> f32 {
        self.city_size / 2.0
    }

    /// Upper bound of the sector sampling radius band.
    pub fn sector_max_radius(&self) -> f32 {
        self.half_city() - self.sector_edge_margin
    }

    /// Minimum dot product between facing and target direction for a scan hit.
    pub fn scan_dot_threshold(&self) -> f32 {
        1.0 - self.scan_angle
    }

    /// Check every constraint, returning all violations at once.
    pub fn validate(&self) -> Result<(), Vec<InvalidConfig>> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &'static str, message: &str| {
            if !ok {
                errors.push(InvalidConfig {
                    field,
                    message: message.to_string(),
                });
            }
        };

        let positive = [
            ("city_size", self.city_size),
            ("block_size", self.block_size),
            ("player_speed", self.player_speed),
            ("scan_range", self.scan_range),
            ("item_range", self.item_range),
            ("walk_speed", self.walk_speed),
            ("chase_speed", self.chase_speed),
            ("catch_distance", self.catch_distance),
            ("playable_bound", self.playable_bound),
        ];
        for (field, value) in positive {
            check(value > 0.0, field, "must be positive");
        }

        check(self.street_width >= 0.0, "street_width", "must not be negative");
        check(
            self.building_inset >= 0.0 && self.building_inset < self.block_size,
            "building_inset",
            "must be in [0, block_size)",
        );
        check(
            self.building_min_height > 0.0 && self.building_min_height < self.building_max_height,
            "building_min_height",
            "must be positive and below building_max_height",
        );
        check(
            self.plaza_half_extent >= 0.0 && self.plaza_half_extent < self.half_city(),
            "plaza_half_extent",
            "must fit inside the city",
        );
        check(
            self.playable_bound <= self.half_city(),
            "playable_bound",
            "must not exceed half the city size",
        );
        check(self.npc_count > 0, "npc_count", "must be at least 1");
        check(
            (0.0..=1.0).contains(&self.hypocrite_probability),
            "hypocrite_probability",
            "must be in [0, 1]",
        );
        check(
            self.sector_min_radius >= 0.0 && self.sector_min_radius < self.sector_max_radius(),
            "sector_min_radius",
            "must be below half_city - sector_edge_margin",
        );
        check(
            self.fallback_edge_margin < self.half_city(),
            "fallback_edge_margin",
            "must be below half the city size",
        );
        check(
            self.last_resort_radius > 0.0,
            "last_resort_radius",
            "must be positive",
        );
        check(
            self.move_padding >= 0.0 && self.spawn_padding >= 0.0,
            "move_padding",
            "paddings must not be negative",
        );
        check(
            self.scan_angle > 0.0 && self.scan_angle <= 2.0,
            "scan_angle",
            "must be in (0, 2]",
        );
        check(
            self.wave_radius < self.react_radius,
            "wave_radius",
            "must be below react_radius",
        );
        check(
            self.catch_distance < self.react_radius,
            "catch_distance",
            "must be below react_radius",
        );
        check(
            (0.0..=1.0).contains(&self.react_slowdown),
            "react_slowdown",
            "must be in [0, 1]",
        );
        check(
            self.touch_cooldown >= 0.0,
            "touch_cooldown",
            "must not be negative",
        );
        check(
            self.victory_threshold > 0,
            "victory_threshold",
            "must be at least 1",
        );
        check(
            self.notification_secs > 0.0 && self.damage_flash_secs > 0.0 && self.scan_beam_secs > 0.0,
            "notification_secs",
            "timed effects must have positive lifetimes",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
