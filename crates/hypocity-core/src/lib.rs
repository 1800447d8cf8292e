//! Hypocity Core - Session engine for the Hypocity street game
//!
//! A first-person arcade game set in a small procedural city: scan passers-by
//! to reveal who is an innocent and who is a hypocrite, collect coins from
//! revealed innocents, and spend them to clean hypocrites before one catches
//! you penniless.
//!
//! # Architecture
//!
//! The NPC crowd lives in an ECS world via `hecs`:
//! - **Entities**: one per NPC; neutralized NPCs stay as tombstones
//! - **Components**: pure data (`Npc`, `NpcStatus`, `Position`, `Behavior`, ...)
//! - **Systems**: player movement, NPC behavior, scan and cleaner resolution
//!
//! The rules themselves (collision, steering, scan cone, state machines) are
//! pure functions in `hypocity-logic`. [`engine::GameSession`] owns the state
//! and routes every counter and status change through a single event reducer.
//!
//! # Example
//!
//! ```rust,no_run
//! use hypocity_core::prelude::*;
//!
//! let mut session = GameSession::new(GameConfig::default(), 42);
//! session.handle(Intent::AnyKey);
//!
//! loop {
//!     session.update(1.0 / 60.0); // 60 FPS
//!     for cue in session.drain_cues() {
//!         println!("play {:?}", cue);
//!     }
//! }
//! ```

pub mod audio;
pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod generation;
pub mod snapshot;
pub mod systems;
pub mod timers;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::GameSession;
    pub use crate::events::{Cue, Intent, SessionEvent};
    pub use crate::snapshot::{NpcView, SessionSnapshot};
    pub use hypocity_logic::config::GameConfig;
    pub use hypocity_logic::geometry::{CityLayout, Vec2, Vec3};
    pub use hypocity_logic::movement::MoveIntents;
    pub use hypocity_logic::status::{GameStatus, NpcStatus};
}
