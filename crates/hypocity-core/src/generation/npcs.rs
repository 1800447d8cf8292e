//! NPC batch generation

use hecs::{Entity, World};
use hypocity_logic::config::GameConfig;
use hypocity_logic::geometry::CityLayout;
use hypocity_logic::status::NpcStatus;
use rand::Rng;

use super::spawn::{spawn_position, Placement};
use crate::components::*;

/// Spawn a fresh batch of `config.npc_count` NPCs into `world`.
///
/// Each NPC gets its own angular sector for placement, a kind rolled with
/// `hypocrite_probability`, a profession, looks, a dialogue line, and a
/// random initial wander direction (also its initial facing).
pub fn generate_npcs(
    world: &mut World,
    layout: &CityLayout,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let total = config.npc_count;
    let mut entities = Vec::with_capacity(total as usize);
    let mut fallbacks = 0;

    for id in 0..total {
        let kind = NpcKind::roll(rng, config.hypocrite_probability);
        let profession = Profession::random(rng);
        let spawn = spawn_position(layout, id, total, config, rng);
        if spawn.placement != Placement::Sector {
            fallbacks += 1;
        }
        let direction = random_direction(rng);
        let looks = Visuals::random(rng);
        let line = Dialogue::random(kind, rng);

        let entity = world.spawn((
            Npc {
                id,
                kind,
                profession,
            },
            NpcStatus::Unseen,
            Position::on_ground(spawn.position),
            Heading::along(direction),
            Behavior::new(direction),
            looks,
            line,
        ));
        entities.push(entity);
    }

    let hypocrites = world
        .query::<&Npc>()
        .iter()
        .filter(|(_, npc)| npc.is_hypocrite())
        .count();
    log::info!(
        "Spawned {} NPCs ({} hypocrites, {} off-sector placements)",
        total,
        hypocrites,
        fallbacks
    );

    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generate_city;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_npcs() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let city = generate_city(&cfg, &mut rng);
        let mut world = World::new();

        let npcs = generate_npcs(&mut world, &city, &cfg, &mut rng);
        assert_eq!(npcs.len(), 45);

        for (i, entity) in npcs.iter().enumerate() {
            let npc = world.get::<&Npc>(*entity).unwrap();
            assert_eq!(npc.id, i as u32);
            assert_eq!(*world.get::<&NpcStatus>(*entity).unwrap(), NpcStatus::Unseen);
            assert!(world.get::<&Visuals>(*entity).is_ok());
            assert!(world.get::<&Dialogue>(*entity).is_ok());
            let pos = world.get::<&Position>(*entity).unwrap();
            assert_eq!(pos.world.y, 0.0);
            let behavior = world.get::<&Behavior>(*entity).unwrap();
            assert!((behavior.wander.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn probability_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let city = CityLayout::default();
        for (p, expected) in [(0.0, NpcKind::Innocent), (1.0, NpcKind::Hypocrite)] {
            let cfg = GameConfig {
                npc_count: 20,
                hypocrite_probability: p,
                ..Default::default()
            };
            let mut world = World::new();
            generate_npcs(&mut world, &city, &cfg, &mut rng);
            assert!(world.query::<&Npc>().iter().all(|(_, n)| n.kind == expected));
        }
    }
}
