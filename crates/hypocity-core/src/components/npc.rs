//! NPC components: identity, type, looks, and per-entity behavior state.
//!
//! The reveal/removal state is the `NpcStatus` machine from
//! `hypocity_logic::status`, attached as its own component.

use hypocity_logic::constants::{dialogue, visuals};
use hypocity_logic::geometry::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether an NPC rewards or punishes the player once revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Innocent,
    Hypocrite,
}

impl NpcKind {
    /// Roll a kind: hypocrite with probability `p_hypocrite`.
    pub fn roll(rng: &mut impl Rng, p_hypocrite: f64) -> Self {
        if rng.gen_bool(p_hypocrite.clamp(0.0, 1.0)) {
            NpcKind::Hypocrite
        } else {
            NpcKind::Innocent
        }
    }

    pub fn dialogue_pool(&self) -> &'static [&'static str] {
        match self {
            NpcKind::Innocent => &dialogue::INNOCENT,
            NpcKind::Hypocrite => &dialogue::HYPOCRITE,
        }
    }
}

/// Cosmetic profession (picks the outfit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    Doctor,
    Teacher,
}

impl Profession {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Profession::Doctor
        } else {
            Profession::Teacher
        }
    }
}

/// Identity of a simulated inhabitant. Assigned once at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Npc {
    /// Stable index within the current batch (`npc-{id}` for display).
    pub id: u32,
    pub kind: NpcKind,
    pub profession: Profession,
}

impl Npc {
    pub fn label(&self) -> String {
        format!("npc-{}", self.id)
    }

    pub fn is_hypocrite(&self) -> bool {
        self.kind == NpcKind::Hypocrite
    }
}

/// Look of an NPC, rolled once at spawn and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visuals {
    pub skin_color: String,
    pub hair_color: String,
    pub hair_style: u8,
    pub height_scale: f32,
    pub width_scale: f32,
}

impl Visuals {
    pub fn random(rng: &mut impl Rng) -> Self {
        let skin = visuals::SKIN_TONES[rng.gen_range(0..visuals::SKIN_TONES.len())];
        let hair = visuals::HAIR_COLORS[rng.gen_range(0..visuals::HAIR_COLORS.len())];
        Self {
            skin_color: skin.to_string(),
            hair_color: hair.to_string(),
            hair_style: rng.gen_range(0..visuals::HAIR_STYLES),
            height_scale: visuals::HEIGHT_SCALE_MIN + rng.gen::<f32>() * visuals::HEIGHT_SCALE_SPAN,
            width_scale: visuals::WIDTH_SCALE_MIN + rng.gen::<f32>() * visuals::WIDTH_SCALE_SPAN,
        }
    }
}

/// The line an NPC says once revealed, as an index into its kind's pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dialogue {
    pub line: usize,
}

impl Dialogue {
    pub fn random(kind: NpcKind, rng: &mut impl Rng) -> Self {
        Self {
            line: rng.gen_range(0..kind.dialogue_pool().len()),
        }
    }

    pub fn text(&self, kind: NpcKind) -> &'static str {
        let pool = kind.dialogue_pool();
        pool[self.line % pool.len()]
    }
}

/// Per-NPC controller state carried between ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Behavior {
    /// Persistent wander direction (unit, planar).
    pub wander: Vec2,
    /// Display hint: walking animation.
    pub is_moving: bool,
    /// Display hint: standing and waving at the player.
    pub is_waving: bool,
    /// Session time of the last proximity trigger.
    pub last_touch: Option<f64>,
}

impl Behavior {
    pub fn new(wander: Vec2) -> Self {
        Self {
            wander,
            is_moving: true,
            is_waving: false,
            last_touch: None,
        }
    }

    /// Whether a proximity trigger at `now` is past the cooldown.
    pub fn touch_ready(&self, now: f64, cooldown: f64) -> bool {
        self.last_touch.map_or(true, |last| now - last > cooldown)
    }
}

/// A random unit direction on the ground plane.
pub fn random_direction(rng: &mut impl Rng) -> Vec2 {
    loop {
        let v = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5);
        if v.length() > 1e-3 {
            return v.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn visuals_stay_in_palette_and_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = Visuals::random(&mut rng);
            assert!(visuals::SKIN_TONES.contains(&v.skin_color.as_str()));
            assert!(visuals::HAIR_COLORS.contains(&v.hair_color.as_str()));
            assert!(v.hair_style < visuals::HAIR_STYLES);
            assert!((0.92..=1.10).contains(&v.height_scale));
            assert!((0.88..=1.12).contains(&v.width_scale));
        }
    }

    #[test]
    fn dialogue_matches_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = Dialogue::random(NpcKind::Hypocrite, &mut rng);
        assert!(dialogue::HYPOCRITE.contains(&d.text(NpcKind::Hypocrite)));
    }

    #[test]
    fn touch_cooldown() {
        let mut b = Behavior::new(Vec2::new(1.0, 0.0));
        assert!(b.touch_ready(0.0, 1.0));
        b.last_touch = Some(5.0);
        assert!(!b.touch_ready(5.5, 1.0));
        assert!(!b.touch_ready(6.0, 1.0));
        assert!(b.touch_ready(6.01, 1.0));
    }

    #[test]
    fn random_direction_is_unit() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!((random_direction(&mut rng).length() - 1.0).abs() < 1e-4);
        }
    }
}
