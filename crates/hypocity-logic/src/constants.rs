//! Game constants: city dimensions, speeds, ranges, timings and palettes.
//!
//! These are the defaults behind [`crate::config::GameConfig`]. Anything a
//! session may want to tune goes through the config; the palettes and text
//! pools are fixed.

pub mod city {
    /// Side length of the square city, centered on the origin.
    pub const CITY_SIZE: f32 = 100.0;
    pub const BLOCK_SIZE: f32 = 15.0;
    pub const STREET_WIDTH: f32 = 8.0;
    /// Grid margin from the city edge where block placement starts/stops.
    pub const GRID_MARGIN: f32 = 10.0;
    /// Cells whose origin lies within this half-extent of (0, 0) are left
    /// empty as the central plaza.
    pub const PLAZA_HALF_EXTENT: f32 = 10.0;
    /// Buildings are this much narrower than their sidewalk.
    pub const BUILDING_INSET: f32 = 2.0;
    pub const BUILDING_MIN_HEIGHT: f32 = 8.0;
    pub const BUILDING_MAX_HEIGHT: f32 = 23.0;
    pub const SIDEWALK_HEIGHT: f32 = 0.1;
    /// Players and NPCs never leave `[-PLAYABLE_BOUND, PLAYABLE_BOUND]` on
    /// either axis.
    pub const PLAYABLE_BOUND: f32 = 45.0;
    pub const BUILDING_COLORS: [&str; 2] = ["#2c2c2e", "#1c1c1e"];
}

pub mod collision {
    /// Padding used for player and NPC movement.
    pub const MOVE_PADDING: f32 = 0.5;
    /// Padding used when picking spawn points.
    pub const SPAWN_PADDING: f32 = 1.5;
}

pub mod spawn {
    pub const NPC_COUNT: u32 = 45;
    pub const HYPOCRITE_PROBABILITY: f64 = 0.5;
    /// Sector sampling radius band (the upper bound is `CITY_SIZE / 2 - 3`).
    pub const SECTOR_MIN_RADIUS: f32 = 15.0;
    pub const SECTOR_EDGE_MARGIN: f32 = 3.0;
    pub const SECTOR_ATTEMPTS: u32 = 20;
    /// Whole-city fallback sampler.
    pub const FALLBACK_ATTEMPTS: u32 = 100;
    pub const FALLBACK_EDGE_MARGIN: f32 = 2.0;
    /// Fallback points must have |x| or |z| above this.
    pub const FALLBACK_MIN_EXTENT: f32 = 8.0;
    /// Last-resort disk around the origin.
    pub const LAST_RESORT_RADIUS: f32 = 8.0;
}

pub mod player {
    pub const SPEED: f32 = 6.0;
    pub const EYE_HEIGHT: f32 = 1.7;
    pub const SCAN_RANGE: f32 = 12.0;
    /// The cone accepts targets whose direction dot facing exceeds
    /// `1 - SCAN_ANGLE`.
    pub const SCAN_ANGLE: f32 = 0.5;
    /// Cleaner reach.
    pub const ITEM_RANGE: f32 = 6.0;
}

pub mod npc {
    pub const WALK_SPEED: f32 = 2.0;
    pub const CHASE_SPEED: f32 = 5.2;
    pub const CATCH_DISTANCE: f32 = 1.2;
    /// Within this distance an NPC turns toward the player.
    pub const REACT_RADIUS: f32 = 6.0;
    /// Within this distance a non-chasing NPC stops and waves.
    pub const WAVE_RADIUS: f32 = 3.5;
    /// Wander speed multiplier between the wave and react radii.
    pub const REACT_SLOWDOWN: f32 = 0.3;
    pub const LOOK_AHEAD: f32 = 2.5;
    pub const AVOID_MARGIN: f32 = 2.0;
    pub const AVOID_WEIGHT: f32 = 3.0;
    /// Seconds between two proximity triggers of the same NPC.
    pub const TOUCH_COOLDOWN: f64 = 1.0;
}

pub mod session {
    /// Hypocrites cleaned to win.
    pub const VICTORY_THRESHOLD: u32 = 10;
    pub const NOTIFICATION_SECS: f64 = 2.5;
    pub const DAMAGE_FLASH_SECS: f64 = 0.3;
    pub const SCAN_BEAM_SECS: f64 = 0.3;
}

pub mod visuals {
    pub const SKIN_TONES: [&str; 5] = ["#ffdbac", "#f1c27d", "#e0ac69", "#8d5524", "#c68642"];
    pub const HAIR_COLORS: [&str; 5] = ["#090806", "#2c1608", "#b8a33c", "#e6e6e6", "#503020"];
    pub const HAIR_STYLES: u8 = 5;
    pub const HEIGHT_SCALE_MIN: f32 = 0.92;
    pub const HEIGHT_SCALE_SPAN: f32 = 0.18;
    pub const WIDTH_SCALE_MIN: f32 = 0.88;
    pub const WIDTH_SCALE_SPAN: f32 = 0.24;
}

pub mod dialogue {
    pub const INNOCENT: [&str; 7] = [
        "What has been hard for you lately?",
        "What made you lose yourself in games?",
        "You needed someone who understands you.",
        "I'm not here to scold you. I'm here to listen.",
        "It's okay to take a break sometimes.",
        "This isn't your fault.",
        "I'll be on your side.",
    ];

    pub const HYPOCRITE: [&str; 7] = [
        "Hand over your money.",
        "You're a patient.",
        "Your addiction needs curing!",
        "You brought this sickness on yourself.",
        "A gamer? You're an addict.",
        "Hospitalization is the only answer.",
        "You need forced treatment.",
    ];
}

pub mod messages {
    pub const HYPOCRITE_FOUND: &str = "Hypocrite found! (watch out)";
    pub const CITIZEN_CONFIRMED: &str = "Citizen confirmed. (get close to be comforted)";
    pub const CITIZEN_COMFORTED: &str = "A citizen opened their heart (coin +1)";
    pub const HYPOCRITE_CLEANED: &str =
        "You gathered the strength of those who opened up and cleaned a hypocrite.";
    pub const NONE_IN_RANGE: &str = "No hypocrite in range.";
    pub const INSUFFICIENT_COINS: &str = "Not enough coins.";
    pub const COIN_STOLEN: &str = "Your coin was stolen! (coin -1)";
}
