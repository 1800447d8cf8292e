//! Pure movement rules for player walking, NPC chase steering and wander steps.
//!
//! All movement is planar and axis-separated (see
//! [`crate::collision::slide_move`]). Heights are pinned by the callers:
//! the player's eye to `eye_height`, NPC feet to the ground.

use serde::{Deserialize, Serialize};

use crate::collision::{clamp_to_bounds, collides, out_of_bounds, slide_move};
use crate::config::GameConfig;
use crate::geometry::{CityLayout, Vec2, Vec3};

/// The four held movement intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntents {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntents {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Planar forward/right basis derived from a camera facing direction.
///
/// `right` is `forward` rotated a quarter turn clockwise seen from above, so
/// a camera looking down −Z has right = +X.
pub fn planar_basis(facing: Vec3) -> (Vec2, Vec2) {
    let forward = facing.planar().normalize();
    let right = Vec2::new(-forward.z, forward.x);
    (forward, right)
}

/// Advance the player one frame. Returns the new eye position.
pub fn step_player(
    position: Vec3,
    facing: Vec3,
    intents: MoveIntents,
    dt: f32,
    layout: &CityLayout,
    config: &GameConfig,
) -> Vec3 {
    let (forward, right) = planar_basis(facing);

    let mut wish = Vec2::ZERO;
    if intents.forward {
        wish += forward;
    }
    if intents.back {
        wish = wish - forward;
    }
    if intents.left {
        wish = wish - right;
    }
    if intents.right {
        wish += right;
    }

    let mut planar = position.planar();
    if wish.length() > 0.0 {
        let delta = wish.normalize() * (config.player_speed * dt);
        planar = slide_move(planar, delta, layout, config.move_padding).position;
    }
    let planar = clamp_to_bounds(planar, config.playable_bound);
    planar.at_height(config.eye_height)
}

/// Direction a chasing NPC at `from` should head to reach `target`,
/// bent away from buildings near a look-ahead point.
///
/// Every building whose center is within `half_extent + avoid_margin` of the
/// point `look_ahead` units along the straight chase line pushes the NPC
/// away from that building's center with weight `avoid_weight`. The sum is
/// normalized; a zero result means "stay put".
pub fn chase_direction(from: Vec2, target: Vec2, layout: &CityLayout, config: &GameConfig) -> Vec2 {
    let chase = (target - from).normalize();
    let probe = from + chase * config.look_ahead;

    let mut avoidance = Vec2::ZERO;
    for building in layout.buildings() {
        let center = building.center();
        if center.distance(&probe) < building.half_extent() + config.avoid_margin {
            avoidance += (from - center).normalize() * config.avoid_weight;
        }
    }

    (chase + avoidance).normalize()
}

/// Outcome of one wander step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WanderStep {
    /// The step is clear; move here.
    Advance(Vec2),
    /// The step hits a building or leaves the playable square; pick a new
    /// direction and try again next tick.
    Blocked,
}

/// Try moving `distance` along `direction`. The whole step is tested at once
/// (no sliding), matching how wanderers bounce off walls.
pub fn wander_step(
    from: Vec2,
    direction: Vec2,
    distance: f32,
    layout: &CityLayout,
    config: &GameConfig,
) -> WanderStep {
    let next = from + direction * distance;
    if collides(next, layout, config.move_padding) || out_of_bounds(next, config.playable_bound) {
        WanderStep::Blocked
    } else {
        WanderStep::Advance(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Block, BlockKind};

    fn building(x: f32, z: f32, size: f32) -> Block {
        Block {
            kind: BlockKind::Building,
            x,
            z,
            width: size,
            depth: size,
            height: 10.0,
            color: None,
        }
    }

    fn looking_north() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    #[test]
    fn basis_for_default_camera() {
        let (f, r) = planar_basis(looking_north());
        assert_eq!(f, Vec2::new(0.0, -1.0));
        assert_eq!(r, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn basis_ignores_pitch() {
        let (f, _) = planar_basis(Vec3::new(0.0, -0.9, -0.1));
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((f.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn player_walks_forward_at_speed() {
        let cfg = GameConfig::default();
        let intents = MoveIntents {
            forward: true,
            ..Default::default()
        };
        let p = step_player(
            Vec3::new(0.0, 1.7, 0.0),
            looking_north(),
            intents,
            0.5,
            &CityLayout::default(),
            &cfg,
        );
        assert!((p.z + 3.0).abs() < 1e-5, "z={}", p.z);
        assert_eq!(p.y, cfg.eye_height);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let cfg = GameConfig::default();
        let intents = MoveIntents {
            forward: true,
            right: true,
            ..Default::default()
        };
        let p = step_player(
            Vec3::new(0.0, 1.7, 0.0),
            looking_north(),
            intents,
            1.0,
            &CityLayout::default(),
            &cfg,
        );
        assert!((p.planar().length() - cfg.player_speed).abs() < 1e-4);
    }

    #[test]
    fn player_is_clamped_and_pinned() {
        let cfg = GameConfig::default();
        let intents = MoveIntents {
            right: true,
            ..Default::default()
        };
        let p = step_player(
            Vec3::new(44.0, 5.0, 0.0),
            looking_north(),
            intents,
            1.0,
            &CityLayout::default(),
            &cfg,
        );
        assert_eq!(p.x, cfg.playable_bound);
        assert_eq!(p.y, cfg.eye_height);
    }

    #[test]
    fn opposite_intents_cancel() {
        let cfg = GameConfig::default();
        let intents = MoveIntents {
            forward: true,
            back: true,
            ..Default::default()
        };
        let start = Vec3::new(1.0, 1.7, 1.0);
        let p = step_player(start, looking_north(), intents, 1.0, &CityLayout::default(), &cfg);
        assert_eq!(p, start);
    }

    #[test]
    fn chase_goes_straight_in_open_space() {
        let cfg = GameConfig::default();
        let dir = chase_direction(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            &CityLayout::default(),
            &cfg,
        );
        assert_eq!(dir, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn chase_bends_away_from_building_ahead() {
        let cfg = GameConfig::default();
        // Building sits just above the chase line, ahead of the NPC.
        let layout = CityLayout::new(vec![building(3.0, 2.0, 2.0)]);
        let dir = chase_direction(Vec2::ZERO, Vec2::new(20.0, 0.0), &layout, &cfg);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.z < 0.0, "should be pushed away (−z), got {:?}", dir);
    }

    #[test]
    fn wander_blocks_on_walls_and_bounds() {
        let cfg = GameConfig::default();
        let layout = CityLayout::new(vec![building(5.0, 0.0, 2.0)]);
        assert_eq!(
            wander_step(Vec2::new(3.0, 0.0), Vec2::new(1.0, 0.0), 1.0, &layout, &cfg),
            WanderStep::Blocked
        );
        assert_eq!(
            wander_step(Vec2::new(44.5, 0.0), Vec2::new(1.0, 0.0), 1.0, &layout, &cfg),
            WanderStep::Blocked
        );
        assert_eq!(
            wander_step(Vec2::ZERO, Vec2::new(0.0, 1.0), 1.0, &layout, &cfg),
            WanderStep::Advance(Vec2::new(0.0, 1.0))
        );
    }
}
