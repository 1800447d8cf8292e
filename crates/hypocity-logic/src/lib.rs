//! Pure gameplay rules for Hypocity.
//!
//! Everything here is plain data in, results out: no ECS, no randomness, no
//! clock. The session engine in `hypocity-core` owns state and calls into
//! these functions every tick, which keeps the rules unit-testable on their
//! own.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`collision`] | Point-vs-padded-box building collision, axis-separated sliding |
//! | [`config`] | `GameConfig` tunables with defaults and validation |
//! | [`constants`] | City dimensions, speeds, radii, timings, palettes, text pools |
//! | [`geometry`] | `Vec2`/`Vec3`, city `Block`s and the `CityLayout` |
//! | [`movement`] | Player walking, chase steering with building avoidance, wander steps |
//! | [`scan`] | Scan cone test and nearest-in-range selection |
//! | [`status`] | Session status and per-NPC status state machines |

pub mod collision;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod movement;
pub mod scan;
pub mod status;
