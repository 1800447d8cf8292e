//! NPC behavior system - chase, react, wander, and proximity triggers

use hecs::{Entity, World};
use hypocity_logic::collision::slide_move;
use hypocity_logic::config::GameConfig;
use hypocity_logic::geometry::{CityLayout, Vec3};
use hypocity_logic::movement::{chase_direction, wander_step, WanderStep};
use hypocity_logic::status::NpcStatus;
use rand::Rng;

use crate::components::{random_direction, Behavior, Heading, Npc, NpcKind, Position};

/// A revealed NPC touched the player. The session reducer decides what
/// happens; the NPC's status is re-checked there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityEvent {
    /// A revealed innocent reached the player.
    Collect { entity: Entity, id: u32 },
    /// A revealed hypocrite reached the player.
    Catch { entity: Entity, id: u32 },
}

/// What one NPC is doing this tick, chosen from its status and the player's
/// distance.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Chase,
    Wave,
    Wander { speed_scale: f32, facing_player: bool },
}

fn choose_mode(npc: &Npc, status: NpcStatus, distance: f32, config: &GameConfig) -> Mode {
    if npc.kind == NpcKind::Hypocrite && status.is_scanned() {
        Mode::Chase
    } else if distance < config.wave_radius {
        Mode::Wave
    } else if distance < config.react_radius {
        Mode::Wander {
            speed_scale: config.react_slowdown,
            facing_player: true,
        }
    } else {
        Mode::Wander {
            speed_scale: 1.0,
            facing_player: false,
        }
    }
}

/// Advance every active NPC by `dt` seconds.
///
/// NPCs are processed in id order so that a seeded RNG produces the same
/// wander directions run to run. `now` is the session clock, used for the
/// per-NPC touch cooldown. Neutralized NPCs are skipped entirely.
pub fn npc_behavior_system(
    world: &mut World,
    layout: &CityLayout,
    config: &GameConfig,
    player: Vec3,
    now: f64,
    dt: f32,
    rng: &mut impl Rng,
) -> Vec<ProximityEvent> {
    let mut active: Vec<(Entity, Npc, NpcStatus, Position, Heading, Behavior)> = world
        .query::<(&Npc, &NpcStatus, &Position, &Heading, &Behavior)>()
        .iter()
        .filter(|(_, (_, status, ..))| status.is_active())
        .map(|(e, (npc, status, pos, heading, behavior))| (e, *npc, *status, *pos, *heading, *behavior))
        .collect();
    active.sort_by_key(|(_, npc, ..)| npc.id);

    let target = player.planar();
    let mut events = Vec::new();

    for (entity, npc, status, mut pos, mut heading, mut behavior) in active {
        let here = pos.planar();
        let distance = pos.world.distance(&player);
        let mode = choose_mode(&npc, status, distance, config);

        behavior.is_moving = mode != Mode::Wave;
        behavior.is_waving = mode == Mode::Wave;

        match mode {
            Mode::Chase => {
                heading.face(here, target);
                let dir = chase_direction(here, target, layout, config);
                let delta = dir * (config.chase_speed * dt);
                let slid = slide_move(here, delta, layout, config.move_padding);
                pos.set_planar(slid.position);
            }
            Mode::Wave => heading.face(here, target),
            Mode::Wander {
                speed_scale,
                facing_player,
            } => {
                if facing_player {
                    heading.face(here, target);
                }
                let distance_step = config.walk_speed * speed_scale * dt;
                match wander_step(here, behavior.wander, distance_step, layout, config) {
                    WanderStep::Advance(next) => {
                        pos.set_planar(next);
                        if !facing_player {
                            heading = Heading::along(behavior.wander);
                        }
                    }
                    WanderStep::Blocked => behavior.wander = random_direction(rng),
                }
            }
        }
        pos.world.y = 0.0;

        if pos.planar().distance(&target) < config.catch_distance
            && behavior.touch_ready(now, config.touch_cooldown)
        {
            behavior.last_touch = Some(now);
            match (npc.kind, status) {
                (NpcKind::Innocent, NpcStatus::Identified) => {
                    events.push(ProximityEvent::Collect { entity, id: npc.id })
                }
                (NpcKind::Hypocrite, NpcStatus::Identified) => {
                    events.push(ProximityEvent::Catch { entity, id: npc.id })
                }
                _ => {}
            }
        }

        // Apply
        if let Ok((p, h, b)) = world.query_one_mut::<(&mut Position, &mut Heading, &mut Behavior)>(entity) {
            *p = pos;
            *h = heading;
            *b = behavior;
        }
    }

    events
}
