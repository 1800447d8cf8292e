//! Interaction system - the player's scan and cleaner item against NPCs

use hecs::{Entity, World};
use hypocity_logic::config::GameConfig;
use hypocity_logic::geometry::Vec3;
use hypocity_logic::scan::{in_scan_cone, nearest_within};
use hypocity_logic::status::NpcStatus;

use crate::components::{Npc, NpcKind, Position};

/// Result of one scan pulse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// At least one hypocrite was revealed.
    pub hypocrite_found: bool,
    /// Number of innocents revealed.
    pub innocents: u32,
    /// Ids of every NPC revealed by this pulse, ascending.
    pub revealed: Vec<u32>,
}

impl ScanOutcome {
    pub fn hit(&self) -> bool {
        !self.revealed.is_empty()
    }
}

/// Reveal every unseen NPC inside the scan cone.
///
/// Already revealed and neutralized NPCs are ignored, so scanning the same
/// crowd twice reveals nothing new.
pub fn resolve_scan(world: &mut World, eye: Vec3, facing: Vec3, config: &GameConfig) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for (_entity, (npc, status, pos)) in world.query_mut::<(&Npc, &mut NpcStatus, &Position)>() {
        if *status != NpcStatus::Unseen || !in_scan_cone(eye, facing, pos.world, config) {
            continue;
        }
        if let Ok(next) = status.identify() {
            *status = next;
            match npc.kind {
                NpcKind::Hypocrite => outcome.hypocrite_found = true,
                NpcKind::Innocent => outcome.innocents += 1,
            }
            outcome.revealed.push(npc.id);
        }
    }

    outcome.revealed.sort_unstable();
    outcome
}

/// The nearest active hypocrite strictly within `item_range` of the eye.
///
/// The hypocrite does not need to have been revealed. Candidates are
/// considered in id order, so equal distances resolve to the lowest id.
pub fn find_cleaner_target(world: &World, eye: Vec3, config: &GameConfig) -> Option<(Entity, u32)> {
    let mut candidates: Vec<(u32, Entity, Vec3)> = world
        .query::<(&Npc, &NpcStatus, &Position)>()
        .iter()
        .filter(|(_, (npc, status, _))| npc.is_hypocrite() && status.is_active())
        .map(|(e, (npc, _, pos))| (npc.id, e, pos.world))
        .collect();
    candidates.sort_by_key(|(id, ..)| *id);

    nearest_within(
        eye,
        config.item_range,
        candidates.into_iter().map(|(id, e, p)| ((e, id), p)),
    )
    .map(|(key, _)| key)
}

/// Move an NPC to its terminal state. Returns the new status, or `None` if
/// the entity is gone or was already neutralized.
pub fn neutralize(world: &mut World, entity: Entity) -> Option<NpcStatus> {
    let mut status = world.get::<&mut NpcStatus>(entity).ok()?;
    match status.neutralize() {
        Ok(next) => {
            *status = next;
            Some(next)
        }
        Err(err) => {
            log::debug!("Ignoring neutralize of {:?}: {}", entity, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Profession;
    use hypocity_logic::geometry::Vec2;

    fn spawn(world: &mut World, id: u32, kind: NpcKind, at: Vec2) -> Entity {
        world.spawn((
            Npc {
                id,
                kind,
                profession: Profession::Teacher,
            },
            NpcStatus::Unseen,
            Position::on_ground(at),
        ))
    }

    fn eye() -> Vec3 {
        Vec3::new(0.0, 1.7, 0.0)
    }

    fn north() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    #[test]
    fn scan_reveals_cone_only() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        let ahead_h = spawn(&mut world, 0, NpcKind::Hypocrite, Vec2::new(0.0, -5.0));
        let ahead_i = spawn(&mut world, 1, NpcKind::Innocent, Vec2::new(1.0, -6.0));
        let behind = spawn(&mut world, 2, NpcKind::Innocent, Vec2::new(0.0, 5.0));
        let far = spawn(&mut world, 3, NpcKind::Hypocrite, Vec2::new(0.0, -30.0));

        let out = resolve_scan(&mut world, eye(), north(), &cfg);
        assert!(out.hit());
        assert!(out.hypocrite_found);
        assert_eq!(out.innocents, 1);
        assert_eq!(out.revealed, vec![0, 1]);

        let status = |e| *world.get::<&NpcStatus>(e).unwrap();
        assert_eq!(status(ahead_h), NpcStatus::Identified);
        assert_eq!(status(ahead_i), NpcStatus::Identified);
        assert_eq!(status(behind), NpcStatus::Unseen);
        assert_eq!(status(far), NpcStatus::Unseen);
    }

    #[test]
    fn rescan_reveals_nothing_new() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        spawn(&mut world, 0, NpcKind::Hypocrite, Vec2::new(0.0, -5.0));
        assert!(resolve_scan(&mut world, eye(), north(), &cfg).hit());
        assert_eq!(resolve_scan(&mut world, eye(), north(), &cfg), ScanOutcome::default());
    }

    #[test]
    fn scan_skips_neutralized() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        let e = spawn(&mut world, 0, NpcKind::Innocent, Vec2::new(0.0, -5.0));
        neutralize(&mut world, e).unwrap();
        assert!(!resolve_scan(&mut world, eye(), north(), &cfg).hit());
    }

    #[test]
    fn cleaner_picks_nearest_hypocrite() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        spawn(&mut world, 0, NpcKind::Hypocrite, Vec2::new(4.0, 0.0));
        let near = spawn(&mut world, 1, NpcKind::Hypocrite, Vec2::new(0.0, 2.0));
        spawn(&mut world, 2, NpcKind::Innocent, Vec2::new(0.5, 0.0));

        assert_eq!(find_cleaner_target(&world, eye(), &cfg), Some((near, 1)));
    }

    #[test]
    fn cleaner_ignores_out_of_range_and_removed() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        spawn(&mut world, 0, NpcKind::Hypocrite, Vec2::new(6.0, 0.0));
        let close = spawn(&mut world, 1, NpcKind::Hypocrite, Vec2::new(1.0, 0.0));
        neutralize(&mut world, close).unwrap();

        assert_eq!(find_cleaner_target(&world, eye(), &cfg), None);
    }

    #[test]
    fn neutralize_twice_fails() {
        let mut world = World::new();
        let e = spawn(&mut world, 0, NpcKind::Hypocrite, Vec2::ZERO);
        assert_eq!(
            neutralize(&mut world, e),
            Some(NpcStatus::Neutralized { revealed: false })
        );
        assert_eq!(neutralize(&mut world, e), None);
    }
}
