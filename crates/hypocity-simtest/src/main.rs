//! Hypocity Headless Simulation Harness
//!
//! Validates the city generator, spawn sampler, collision resolver and whole
//! session flows in-process. No rendering, no audio, no input devices.
//!
//! Usage:
//!   cargo run -p hypocity-simtest
//!   cargo run -p hypocity-simtest -- --verbose --seed 7
//!   cargo run -p hypocity-simtest -- --config tuning.json --json

use clap::Parser;
use hypocity_core::config::{load_config_file, ConfigError};
use hypocity_core::generation::{generate_city, sector_bounds, spawn_position, Placement};
use hypocity_core::prelude::*;
use hypocity_logic::collision::{collides, slide_move};
use hypocity_logic::constants::messages;
use hypocity_logic::geometry::{Block, BlockKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

const DT: f32 = 1.0 / 60.0;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    json: bool,
    seed: u64,
    config: GameConfig,
}

#[derive(Parser)]
#[command(name = "hypocity-simtest")]
#[command(about = "Headless checks for the Hypocity city, spawner, collision and session")]
struct Args {
    /// Print every check and info-level logs
    #[arg(long)]
    verbose: bool,
    /// Print the final long-run snapshot as JSON
    #[arg(long)]
    json: bool,
    /// Seed for city and NPC generation
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// JSON tuning file overriding the default config
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_options(self) -> Result<Options, ConfigError> {
        let config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => GameConfig::default(),
        };
        Ok(Options {
            verbose: self.verbose,
            json: self.json,
            seed: self.seed,
            config,
        })
    }
}

fn main() {
    let opts = match Args::parse().into_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let default_filter = if opts.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    println!("=== Hypocity Simulation Harness (seed {}) ===\n", opts.seed);

    let mut results = Vec::new();

    // 1. City layout
    results.extend(validate_city_layout(&opts));

    // 2. Spawn sampler
    results.extend(validate_spawn_sampler(&opts));

    // 3. Collision resolver
    results.extend(validate_collision(&opts));

    // 4. Session scenarios
    results.extend(validate_session_scenarios(&opts));

    // 5. Long-run invariants
    results.extend(validate_long_run(&opts));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. City Layout ──────────────────────────────────────────────────────

fn validate_city_layout(opts: &Options) -> Vec<TestResult> {
    println!("--- City Layout ---");
    let mut results = Vec::new();
    let cfg = &opts.config;
    let layout = generate_city(cfg, &mut StdRng::seed_from_u64(opts.seed));

    let buildings = layout.building_count();
    results.push(TestResult {
        name: "city_not_empty".into(),
        passed: buildings > 0,
        detail: format!("{} buildings", buildings),
    });

    let paired = layout.buildings().all(|b| {
        layout
            .sidewalks()
            .filter(|s| s.x == b.x && s.z == b.z)
            .count()
            == 1
    }) && layout.sidewalks().count() == buildings;
    results.push(TestResult {
        name: "city_building_sidewalk_pairs".into(),
        passed: paired,
        detail: "each building has exactly one co-located sidewalk".into(),
    });

    results.push(TestResult {
        name: "city_plaza_open".into(),
        passed: !collides(Vec2::ZERO, &layout, cfg.move_padding),
        detail: "origin is free with movement padding".into(),
    });

    let heights_ok = layout
        .buildings()
        .all(|b| b.height >= cfg.building_min_height && b.height < cfg.building_max_height);
    results.push(TestResult {
        name: "city_heights_in_band".into(),
        passed: heights_ok,
        detail: format!(
            "[{}, {})",
            cfg.building_min_height, cfg.building_max_height
        ),
    });

    if opts.verbose {
        let tallest = layout.buildings().map(|b| b.height).fold(0.0f32, f32::max);
        println!("  tallest building: {:.1}", tallest);
    }

    results
}

// ── 2. Spawn Sampler ────────────────────────────────────────────────────

fn validate_spawn_sampler(opts: &Options) -> Vec<TestResult> {
    println!("--- Spawn Sampler ---");
    let mut results = Vec::new();
    let cfg = &opts.config;
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let layout = generate_city(cfg, &mut rng);
    let total = cfg.npc_count;

    let mut in_sector = 0;
    let mut fallbacks = 0;
    let mut out_of_sector = Vec::new();
    let mut colliding = 0;
    for round in 0..20 {
        for index in 0..total {
            let spawn = spawn_position(&layout, index, total, cfg, &mut rng);
            if spawn.placement != Placement::LastResort
                && collides(spawn.position, &layout, cfg.spawn_padding)
            {
                colliding += 1;
            }
            if spawn.placement != Placement::Sector {
                fallbacks += 1;
                continue;
            }
            let (start, end) = sector_bounds(index, total);
            let mut angle = spawn.position.angle();
            if angle < start - 1e-4 {
                angle += std::f32::consts::TAU;
            }
            if angle >= start - 1e-4 && angle <= end + 1e-4 {
                in_sector += 1;
            } else {
                out_of_sector.push((round, index));
            }
        }
    }

    results.push(TestResult {
        name: "spawn_sector_respected".into(),
        passed: out_of_sector.is_empty(),
        detail: format!(
            "{} sector placements, {} outside their sector {:?}",
            in_sector,
            out_of_sector.len(),
            out_of_sector.iter().take(5).collect::<Vec<_>>()
        ),
    });
    results.push(TestResult {
        name: "spawn_clear_of_buildings".into(),
        passed: colliding == 0,
        detail: format!("{} colliding, {} fallbacks", colliding, fallbacks),
    });

    // Fully blocked city still terminates.
    let wall = CityLayout::new(vec![Block {
        kind: BlockKind::Building,
        x: 0.0,
        z: 0.0,
        width: 4.0 * cfg.city_size,
        depth: 4.0 * cfg.city_size,
        height: 10.0,
        color: None,
    }]);
    let spawn = spawn_position(&wall, 0, 1, cfg, &mut rng);
    results.push(TestResult {
        name: "spawn_last_resort_terminates".into(),
        passed: spawn.placement == Placement::LastResort
            && spawn.position.length() <= cfg.last_resort_radius,
        detail: format!("{:?} at {:?}", spawn.placement, spawn.position),
    });

    results
}

// ── 3. Collision Resolver ───────────────────────────────────────────────

fn validate_collision(opts: &Options) -> Vec<TestResult> {
    println!("--- Collision Resolver ---");
    let mut results = Vec::new();
    let cfg = &opts.config;
    let layout = generate_city(cfg, &mut StdRng::seed_from_u64(opts.seed));

    // Sample a grid over the city.
    let mut mismatches = 0;
    let mut monotonic_violations = 0;
    let mut samples = 0;
    let half = cfg.half_city();
    let mut x = -half;
    while x <= half {
        let mut z = -half;
        while z <= half {
            let p = Vec2::new(x, z);
            let expected = layout.buildings().any(|b| b.padded_contains(p, cfg.move_padding));
            if collides(p, &layout, cfg.move_padding) != expected {
                mismatches += 1;
            }
            if collides(p, &layout, cfg.move_padding) && !collides(p, &layout, cfg.spawn_padding) {
                monotonic_violations += 1;
            }
            samples += 1;
            z += 0.7;
        }
        x += 0.7;
    }
    results.push(TestResult {
        name: "collision_matches_padded_rects".into(),
        passed: mismatches == 0,
        detail: format!("{} mismatches over {} samples", mismatches, samples),
    });
    results.push(TestResult {
        name: "collision_padding_monotonic".into(),
        passed: monotonic_violations == 0,
        detail: format!(
            "padding {} ⊆ padding {}",
            cfg.move_padding, cfg.spawn_padding
        ),
    });

    // Sliding along a wall: diagonal into a wall keeps the parallel component.
    let wall = CityLayout::new(vec![Block {
        kind: BlockKind::Building,
        x: 5.0,
        z: 0.0,
        width: 2.0,
        depth: 20.0,
        height: 10.0,
        color: None,
    }]);
    let slid = slide_move(Vec2::new(3.0, 0.0), Vec2::new(1.0, 1.0), &wall, cfg.move_padding);
    results.push(TestResult {
        name: "collision_slides_along_walls".into(),
        passed: slid.blocked_x && !slid.blocked_z && (slid.position.z - 1.0).abs() < 1e-5,
        detail: format!("ended at {:?}", slid.position),
    });

    results
}

// ── 4. Session Scenarios ────────────────────────────────────────────────

fn open_session(opts: &Options) -> GameSession {
    let mut s = GameSession::with_layout(opts.config.clone(), opts.seed, CityLayout::default());
    s.handle(Intent::AnyKey);
    let count = s.npc_count() as u32;
    for id in 0..count {
        let angle = id as f32 * std::f32::consts::TAU / count as f32;
        s.place_npc(id, Vec2::from_angle(angle) * (opts.config.playable_bound - 5.0));
    }
    s.drain_cues();
    s
}

fn reveal(s: &mut GameSession, id: u32) {
    s.place_npc(id, Vec2::new(0.0, -5.0));
    s.handle(Intent::Scan);
}

fn earn_coin(s: &mut GameSession, id: u32) {
    reveal(s, id);
    s.place_npc(id, Vec2::new(0.0, -0.5));
    s.update(DT);
}

fn validate_session_scenarios(opts: &Options) -> Vec<TestResult> {
    println!("--- Session Scenarios ---");
    let mut results = Vec::new();

    // Scenario 1: hypocrite ratio over repeated generation
    let cfg = &opts.config;
    let mut hypocrites = 0usize;
    let mut total = 0usize;
    for offset in 0..20 {
        let s = GameSession::with_layout(cfg.clone(), opts.seed + offset, CityLayout::default());
        let views = s.npc_views();
        hypocrites += views.iter().filter(|v| v.kind == NpcKind::Hypocrite).count();
        total += views.len();
    }
    let ratio = hypocrites as f64 / total.max(1) as f64;
    results.push(TestResult {
        name: "scenario_hypocrite_ratio".into(),
        passed: (ratio - cfg.hypocrite_probability).abs() < 0.1,
        detail: format!("{:.3} over {} NPCs", ratio, total),
    });

    let s = open_session(opts);
    let innocents = s.npc_ids(NpcKind::Innocent);
    let hypocrites = s.npc_ids(NpcKind::Hypocrite);
    if innocents.is_empty() || hypocrites.is_empty() {
        results.push(TestResult {
            name: "scenario_population".into(),
            passed: false,
            detail: format!(
                "need both kinds: {} innocents, {} hypocrites",
                innocents.len(),
                hypocrites.len()
            ),
        });
        return results;
    }
    let (innocent, hypocrite) = (innocents[0], hypocrites[0]);

    // Scenario 2: scan an innocent
    let mut s = open_session(opts);
    reveal(&mut s, innocent);
    let scanned = s.npc_view(innocent).map_or(false, |v| v.scanned);
    results.push(TestResult {
        name: "scenario_scan_innocent".into(),
        passed: scanned
            && s.scanned_count() == 0
            && s.notification() == Some(messages::CITIZEN_CONFIRMED),
        detail: format!("scanned={} count={}", scanned, s.scanned_count()),
    });

    // Scenario 3: scan a hypocrite
    let mut s = open_session(opts);
    reveal(&mut s, hypocrite);
    let scanned = s.npc_view(hypocrite).map_or(false, |v| v.scanned);
    results.push(TestResult {
        name: "scenario_scan_hypocrite".into(),
        passed: scanned && s.scanned_count() == 1,
        detail: format!("scanned={} count={}", scanned, s.scanned_count()),
    });

    // Scenario 4: collect a revealed innocent, once
    let mut s = open_session(opts);
    earn_coin(&mut s, innocent);
    let removed = s.npc_view(innocent).map_or(false, |v| v.removed);
    for _ in 0..60 {
        s.update(DT);
    }
    results.push(TestResult {
        name: "scenario_collect_innocent".into(),
        passed: removed && s.coins() == 1,
        detail: format!("removed={} coins={}", removed, s.coins()),
    });

    // Scenario 5: caught while broke
    let mut s = open_session(opts);
    reveal(&mut s, hypocrite);
    s.place_npc(hypocrite, Vec2::new(0.0, -1.0));
    s.update(DT);
    results.push(TestResult {
        name: "scenario_caught_broke".into(),
        passed: s.status() == GameStatus::Counseling && s.coins() == 0,
        detail: format!("status={:?} coins={}", s.status(), s.coins()),
    });

    // Catch with a coin in hand
    let mut s = open_session(opts);
    earn_coin(&mut s, innocent);
    reveal(&mut s, hypocrite);
    s.place_npc(hypocrite, Vec2::new(0.0, -1.0));
    s.update(DT);
    let thief_gone = s.npc_view(hypocrite).map_or(false, |v| v.removed);
    results.push(TestResult {
        name: "scenario_coin_stolen".into(),
        passed: s.status() == GameStatus::Playing && s.coins() == 0 && thief_gone && s.is_damaged(),
        detail: format!(
            "status={:?} coins={} thief_gone={}",
            s.status(),
            s.coins(),
            thief_gone
        ),
    });

    // Scenario 6: cleaner on a revealed hypocrite
    let mut s = open_session(opts);
    earn_coin(&mut s, innocent);
    s.place_npc(hypocrite, Vec2::new(0.0, -4.0));
    s.handle(Intent::Scan);
    s.handle(Intent::UseItem);
    let cleaned = s.npc_view(hypocrite).map_or(false, |v| v.removed);
    results.push(TestResult {
        name: "scenario_cleaner".into(),
        passed: cleaned && s.coins() == 0 && s.victory_count() == 1,
        detail: format!(
            "cleaned={} coins={} victories={}",
            cleaned,
            s.coins(),
            s.victory_count()
        ),
    });

    // Restart keeps the city
    let mut s2 = GameSession::new(cfg.clone(), opts.seed);
    s2.handle(Intent::AnyKey);
    let layout = s2.layout().clone();
    s2.set_player_position(Vec2::ZERO);
    reveal(&mut s2, hypocrite);
    s2.place_npc(hypocrite, Vec2::new(0.0, -1.0));
    s2.update(DT);
    s2.handle(Intent::Space);
    results.push(TestResult {
        name: "scenario_restart".into(),
        passed: s2.status() == GameStatus::Tutorial
            && s2.coins() == 0
            && s2.scanned_count() == 0
            && s2.layout() == &layout
            && s2.generation() == 1,
        detail: format!("status={:?} generation={}", s2.status(), s2.generation()),
    });

    results
}

// ── 5. Long Run ─────────────────────────────────────────────────────────

fn scripted_run(opts: &Options, frames: usize) -> Vec<SessionSnapshot> {
    let mut s = GameSession::new(opts.config.clone(), opts.seed);
    s.handle(Intent::AnyKey);
    let mut snapshots = Vec::with_capacity(frames);
    for frame in 0..frames {
        let t = frame as f32 * DT;
        s.set_facing(Vec3::new((0.7 * t).sin(), 0.0, -(0.7 * t).cos()));
        s.set_movement(MoveIntents {
            forward: frame % 300 < 200,
            right: frame % 700 < 90,
            ..Default::default()
        });
        if frame % 40 == 0 {
            s.handle(Intent::Scan);
        }
        if frame % 90 == 0 {
            s.handle(Intent::UseItem);
        }
        if s.status().is_terminal() {
            s.handle(Intent::Space);
            s.handle(Intent::AnyKey);
        }
        s.update(DT);
        s.drain_cues();
        snapshots.push(s.snapshot());
    }
    snapshots
}

fn validate_long_run(opts: &Options) -> Vec<TestResult> {
    println!("--- Long Run ---");
    let mut results = Vec::new();
    let cfg = &opts.config;
    let frames = 60 * 60;
    let snapshots = scripted_run(opts, frames);

    let mut flag_reverts = 0;
    let mut tombstone_moves = 0;
    let mut off_ground = 0;
    let mut restarts = 0;
    for pair in snapshots.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.generation != b.generation {
            restarts += 1;
            continue;
        }
        for (x, y) in a.npcs.iter().zip(&b.npcs) {
            if (x.scanned && !y.scanned) || (x.removed && !y.removed) {
                flag_reverts += 1;
            }
            if x.removed && x.position != y.position {
                tombstone_moves += 1;
            }
        }
    }
    for snap in &snapshots {
        off_ground += snap.npcs.iter().filter(|n| n.position.y != 0.0).count();
        if snap.player.position.y != cfg.eye_height {
            off_ground += 1;
        }
    }

    results.push(TestResult {
        name: "long_run_flags_monotonic".into(),
        passed: flag_reverts == 0,
        detail: format!("{} reverts over {} frames, {} restarts", flag_reverts, frames, restarts),
    });
    results.push(TestResult {
        name: "long_run_tombstones_frozen".into(),
        passed: tombstone_moves == 0,
        detail: format!("{} moves", tombstone_moves),
    });
    results.push(TestResult {
        name: "long_run_heights_pinned".into(),
        passed: off_ground == 0,
        detail: format!("{} off-height samples", off_ground),
    });

    let again = scripted_run(opts, 600);
    results.push(TestResult {
        name: "long_run_deterministic".into(),
        passed: again[..] == snapshots[..600],
        detail: format!("seed {} replayed 600 frames", opts.seed),
    });

    if let Some(last) = snapshots.last() {
        if opts.verbose {
            println!(
                "  final: status={:?} coins={} scanned={} victories={}",
                last.status, last.coins, last.scanned_count, last.victory_count
            );
        }
        if opts.json {
            match serde_json::to_string_pretty(last) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to serialize snapshot: {}", e),
            }
        }
    }

    results
}
