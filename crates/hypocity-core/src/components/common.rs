//! Spatial components shared by every simulated entity.

use hypocity_logic::geometry::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// World-space position. NPC feet sit on the ground (`y == 0`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub world: Vec3,
}

impl Position {
    pub fn on_ground(point: Vec2) -> Self {
        Self {
            world: point.at_height(0.0),
        }
    }

    pub fn planar(&self) -> Vec2 {
        self.world.planar()
    }

    /// Move on the plane and pin the height back to the ground.
    pub fn set_planar(&mut self, point: Vec2) {
        self.world = point.at_height(0.0);
    }
}

/// Facing hint for renderers, as a yaw (`atan2(x, z)`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading {
    pub yaw: f32,
}

impl Heading {
    pub fn along(direction: Vec2) -> Self {
        Self {
            yaw: direction.yaw(),
        }
    }

    /// Turn to look at `target` from `from`; keeps the old yaw if they coincide.
    pub fn face(&mut self, from: Vec2, target: Vec2) {
        let d = target - from;
        if d.length() > 0.0 {
            self.yaw = d.yaw();
        }
    }
}
