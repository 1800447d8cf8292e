//! Player system - integrates held movement intents into the camera pose

use hypocity_logic::config::GameConfig;
use hypocity_logic::geometry::{CityLayout, Vec3};
use hypocity_logic::movement::{step_player, MoveIntents};
use serde::{Deserialize, Serialize};

/// First-person camera pose. The facing comes from the input layer (mouse
/// look); the position is integrated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// Eye position.
    pub position: Vec3,
    /// Look direction (need not be normalized).
    pub facing: Vec3,
}

impl PlayerPose {
    /// Standing in the plaza at eye height, looking down −Z.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.eye_height, 0.0),
            facing: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

/// Move the player one frame.
pub fn player_movement_system(
    pose: &mut PlayerPose,
    intents: MoveIntents,
    dt: f32,
    layout: &CityLayout,
    config: &GameConfig,
) {
    pose.position = step_player(pose.position, pose.facing, intents, dt, layout, config);
}
