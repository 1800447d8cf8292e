//! End-to-end session scenarios driven through the public engine API.
//!
//! Sessions use an empty city so the tests control exactly which NPCs are
//! near the player. Everyone not under test is parked on a far ring.

use hypocity_core::prelude::*;
use hypocity_logic::constants::messages;

const DT: f32 = 1.0 / 60.0;

// ── Helpers ────────────────────────────────────────────────────────────

fn open_city_session(seed: u64) -> GameSession {
    let mut s = GameSession::with_layout(GameConfig::default(), seed, CityLayout::default());
    s.handle(Intent::AnyKey);
    park_everyone(&mut s);
    s.drain_cues();
    s
}

fn park_everyone(s: &mut GameSession) {
    for id in 0..s.npc_count() as u32 {
        let angle = id as f32 * (std::f32::consts::TAU / s.npc_count() as f32);
        s.place_npc(id, Vec2::from_angle(angle) * 40.0);
    }
}

fn view(s: &GameSession, id: u32) -> NpcView {
    s.npc_view(id).expect("npc exists")
}

/// Reveal NPC `id` by putting it in front of the player and scanning.
fn reveal(s: &mut GameSession, id: u32) {
    s.place_npc(id, Vec2::new(0.0, -5.0));
    s.handle(Intent::Scan);
    assert!(view(s, id).scanned, "npc-{id} should be revealed");
}

/// Reveal innocent `id` and walk it into the player to earn a coin.
fn earn_coin(s: &mut GameSession, id: u32) {
    let before = s.coins();
    reveal(s, id);
    s.place_npc(id, Vec2::new(0.0, -0.5));
    s.update(DT);
    assert_eq!(s.coins(), before + 1);
}

fn ids(s: &GameSession, kind: NpcKind, at_least: usize) -> Vec<u32> {
    let ids = s.npc_ids(kind);
    assert!(ids.len() >= at_least, "seed produced only {} {:?}", ids.len(), kind);
    ids
}

// ── Scenario 1: fresh session ──────────────────────────────────────────

#[test]
fn fresh_sessions_are_about_half_hypocrites() {
    let mut hypocrites = 0;
    let mut total = 0;
    for seed in 0..40 {
        let s = GameSession::new(GameConfig::default(), seed);
        assert_eq!(s.status(), GameStatus::Tutorial);
        assert_eq!(s.npc_count(), 45);
        let views = s.npc_views();
        assert!(views.iter().all(|v| v.status == NpcStatus::Unseen));
        hypocrites += views.iter().filter(|v| v.kind == NpcKind::Hypocrite).count();
        total += views.len();
    }
    let ratio = hypocrites as f64 / total as f64;
    assert!((0.4..0.6).contains(&ratio), "hypocrite ratio {ratio}");
}

// ── Scenarios 2 and 3: scanning ────────────────────────────────────────

#[test]
fn scanning_an_innocent_confirms_without_counting() {
    let mut s = open_city_session(1);
    let innocent = ids(&s, NpcKind::Innocent, 1)[0];

    reveal(&mut s, innocent);
    assert_eq!(s.scanned_count(), 0);
    assert_eq!(s.notification(), Some(messages::CITIZEN_CONFIRMED));
    assert_eq!(view(&s, innocent).status, NpcStatus::Identified);
    assert!(view(&s, innocent).dialogue.is_some());
    assert_eq!(s.drain_cues(), vec![Cue::ScanPerformed]);
}

#[test]
fn scanning_a_hypocrite_counts() {
    let mut s = open_city_session(2);
    let hypocrite = ids(&s, NpcKind::Hypocrite, 1)[0];

    reveal(&mut s, hypocrite);
    assert_eq!(s.scanned_count(), 1);
    assert_eq!(s.notification(), Some(messages::HYPOCRITE_FOUND));
    assert!(view(&s, hypocrite).scanned);
}

#[test]
fn missed_scan_changes_nothing_but_the_beam() {
    let mut s = open_city_session(3);
    let before = s.npc_views();
    s.handle(Intent::Scan);
    assert!(s.is_scanning());
    assert_eq!(s.scanned_count(), 0);
    assert_eq!(s.notification(), None);
    assert!(s.drain_cues().is_empty());
    assert_eq!(s.npc_views(), before);
}

// ── Scenario 4: collecting ─────────────────────────────────────────────

#[test]
fn revealed_innocent_gives_one_coin() {
    let mut s = open_city_session(4);
    let innocent = ids(&s, NpcKind::Innocent, 1)[0];

    earn_coin(&mut s, innocent);
    assert!(view(&s, innocent).removed);
    assert_eq!(s.notification(), Some(messages::CITIZEN_COMFORTED));
    assert!(s.drain_cues().contains(&Cue::InnocentCollected));

    // Nothing more comes from the same NPC.
    for _ in 0..90 {
        s.update(DT);
    }
    assert_eq!(s.coins(), 1);
}

#[test]
fn unrevealed_innocent_gives_nothing() {
    let mut s = open_city_session(5);
    let innocent = ids(&s, NpcKind::Innocent, 1)[0];
    s.place_npc(innocent, Vec2::new(0.0, -0.5));
    for _ in 0..90 {
        s.update(DT);
    }
    assert_eq!(s.coins(), 0);
    assert!(!view(&s, innocent).removed);
}

// ── Scenario 5 and coin theft: catches ─────────────────────────────────

#[test]
fn caught_while_broke_goes_to_counseling() {
    let mut s = open_city_session(6);
    let hypocrite = ids(&s, NpcKind::Hypocrite, 1)[0];

    reveal(&mut s, hypocrite);
    s.place_npc(hypocrite, Vec2::new(0.0, -1.0));
    s.update(DT);

    assert_eq!(s.status(), GameStatus::Counseling);
    assert_eq!(s.coins(), 0);
    assert!(!s.pointer_locked());
    assert!(s.drain_cues().contains(&Cue::PlayerCaught));

    // Frozen until restart.
    let frozen = s.npc_views();
    s.update(0.5);
    assert_eq!(s.npc_views(), frozen);
}

#[test]
fn caught_with_coins_loses_one_and_the_thief_vanishes() {
    let mut s = open_city_session(7);
    let innocent = ids(&s, NpcKind::Innocent, 1)[0];
    let hypocrite = ids(&s, NpcKind::Hypocrite, 1)[0];
    earn_coin(&mut s, innocent);

    reveal(&mut s, hypocrite);
    s.place_npc(hypocrite, Vec2::new(0.0, -1.0));
    s.update(DT);

    assert_eq!(s.status(), GameStatus::Playing);
    assert_eq!(s.coins(), 0);
    assert!(view(&s, hypocrite).removed);
    assert!(s.is_damaged());
    assert_eq!(s.notification(), Some(messages::COIN_STOLEN));

    for _ in 0..25 {
        s.update(DT);
    }
    assert!(!s.is_damaged());
}

// ── Scenario 6 and victory: the cleaner ────────────────────────────────

#[test]
fn cleaner_spends_a_coin_on_the_nearest_hypocrite() {
    let mut s = open_city_session(8);
    let innocent = ids(&s, NpcKind::Innocent, 1)[0];
    let hypocrite = ids(&s, NpcKind::Hypocrite, 1)[0];
    earn_coin(&mut s, innocent);

    s.place_npc(hypocrite, Vec2::new(0.0, -4.0));
    s.handle(Intent::Scan);
    s.handle(Intent::UseItem);

    assert_eq!(s.coins(), 0);
    assert!(view(&s, hypocrite).removed);
    assert_eq!(s.victory_count(), 1);
    assert_eq!(s.notification(), Some(messages::HYPOCRITE_CLEANED));
    assert!(s.drain_cues().contains(&Cue::ItemUsed));
}

#[test]
fn cleaner_out_of_range_keeps_the_coin() {
    let mut s = open_city_session(9);
    let innocent = ids(&s, NpcKind::Innocent, 1)[0];
    earn_coin(&mut s, innocent);

    s.handle(Intent::UseItem);
    assert_eq!(s.coins(), 1);
    assert_eq!(s.victory_count(), 0);
    assert_eq!(s.notification(), Some(messages::NONE_IN_RANGE));
}

#[test]
fn tenth_clean_wins() {
    let mut s = open_city_session(10);
    let innocents = ids(&s, NpcKind::Innocent, 10);
    let hypocrites = ids(&s, NpcKind::Hypocrite, 10);

    for &id in &innocents[..10] {
        earn_coin(&mut s, id);
    }
    assert_eq!(s.coins(), 10);
    assert_eq!(s.victory_count(), 0, "collecting never counts toward victory");
    s.drain_cues();

    for (n, &id) in hypocrites[..10].iter().enumerate() {
        assert_eq!(s.status(), GameStatus::Playing, "won early after {n}");
        s.place_npc(id, Vec2::new(0.0, -4.0));
        s.handle(Intent::UseItem);
    }

    assert_eq!(s.victory_count(), 10);
    assert_eq!(s.coins(), 0);
    assert_eq!(s.status(), GameStatus::Victory);
    assert!(!s.pointer_locked());
    assert_eq!(s.drain_cues().last(), Some(&Cue::Victory));

    // End screen ignores gameplay.
    s.handle(Intent::UseItem);
    s.handle(Intent::AnyKey);
    assert_eq!(s.status(), GameStatus::Victory);
}

// ── Restart ────────────────────────────────────────────────────────────

#[test]
fn restart_keeps_city_and_resets_everything_else() {
    let mut s = open_city_session(11);
    let hypocrite = ids(&s, NpcKind::Hypocrite, 1)[0];
    s.set_player_position(Vec2::new(3.0, 3.0));
    reveal(&mut s, hypocrite);
    s.place_npc(hypocrite, Vec2::new(3.0, 2.0));
    s.update(DT);
    assert_eq!(s.status(), GameStatus::Counseling);

    let layout = s.layout().clone();
    let old_batch = s.npc_views();
    s.handle(Intent::Space);

    assert_eq!(s.status(), GameStatus::Tutorial);
    assert_eq!(s.layout(), &layout);
    assert_eq!(s.coins(), 0);
    assert_eq!(s.scanned_count(), 0);
    assert_eq!(s.victory_count(), 0);
    assert_eq!(s.notification(), None);
    assert!(!s.is_damaged());
    assert!(!s.ambiance_playing());
    assert_eq!(s.player().position, Vec3::new(0.0, 1.7, 0.0));
    assert_eq!(s.player().facing, Vec3::new(0.0, 0.0, -1.0));

    let new_batch = s.npc_views();
    assert_eq!(new_batch.len(), 45);
    assert!(new_batch.iter().all(|v| v.status == NpcStatus::Unseen));
    assert_ne!(new_batch, old_batch);
}

// ── Invariants over long runs ──────────────────────────────────────────

/// Scripted random play: walk, turn, scan and use the item on a fixed
/// schedule. Returns every snapshot.
fn scripted_run(seed: u64, frames: usize) -> Vec<SessionSnapshot> {
    let mut s = GameSession::new(GameConfig::default(), seed);
    s.handle(Intent::AnyKey);
    let mut snapshots = Vec::with_capacity(frames);
    for frame in 0..frames {
        let t = frame as f32 * DT;
        s.set_facing(Vec3::new(t.sin(), 0.0, -t.cos()));
        s.set_movement(MoveIntents {
            forward: frame % 240 < 180,
            left: frame % 500 < 60,
            ..Default::default()
        });
        if frame % 45 == 0 {
            s.handle(Intent::Scan);
        }
        if frame % 70 == 0 {
            s.handle(Intent::UseItem);
        }
        s.update(DT);
        snapshots.push(s.snapshot());
    }
    snapshots
}

#[test]
fn same_seed_same_game() {
    assert_eq!(scripted_run(99, 600), scripted_run(99, 600));
}

#[test]
fn flags_are_monotonic_and_tombstones_stay_put() {
    let snapshots = scripted_run(5, 1800);
    for pair in snapshots.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        if after.generation != before.generation {
            continue;
        }
        for (a, b) in before.npcs.iter().zip(&after.npcs) {
            assert!(!a.scanned || b.scanned, "npc-{} lost its scan", a.id);
            assert!(!a.removed || b.removed, "npc-{} came back", a.id);
            if a.removed {
                assert_eq!(a.position, b.position, "npc-{} moved after removal", a.id);
            }
        }
        assert!(after.scanned_count >= before.scanned_count);
        assert!(after.victory_count >= before.victory_count);
    }
}

#[test]
fn npcs_stay_on_the_ground_and_inside_the_city() {
    let cfg = GameConfig::default();
    for snap in scripted_run(12, 900) {
        assert!(snap.player.position.x.abs() <= cfg.playable_bound);
        assert!(snap.player.position.z.abs() <= cfg.playable_bound);
        assert_eq!(snap.player.position.y, cfg.eye_height);
        for npc in &snap.npcs {
            assert_eq!(npc.position.y, 0.0);
            assert!(npc.position.x.abs() <= cfg.half_city());
            assert!(npc.position.z.abs() <= cfg.half_city());
        }
    }
}
