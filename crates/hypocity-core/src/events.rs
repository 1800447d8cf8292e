//! Inputs to the session and the events its reducer consumes.
//!
//! Input handlers and systems never touch counters or status directly; they
//! describe what happened as a [`SessionEvent`] and hand it to
//! [`GameSession::apply`](crate::engine::GameSession::apply), which checks it
//! against the current state before changing anything.

use serde::{Deserialize, Serialize};

use crate::timers::DeferredEffect;

/// A discrete, edge-triggered key press from the input layer.
///
/// Every variant counts as "a key" for leaving the tutorial screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Any key without a gameplay binding.
    AnyKey,
    /// The space bar; the only key that restarts from an end screen.
    Space,
    /// Fire a scan pulse.
    Scan,
    /// Spend a coin on the cleaner item.
    UseItem,
}

/// Something that may change session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Leave the tutorial and start simulating.
    Start,
    /// Rebuild the session from an end screen.
    Restart,
    /// A scan pulse was fired, hit or miss.
    ScanFired,
    /// A scan pulse revealed at least one NPC.
    ScanHit { hypocrite_found: bool, innocents: u32 },
    /// The cleaner was used; `target` is the chosen hypocrite's id, if any.
    CleanerUsed { target: Option<u32> },
    /// A revealed innocent reached the player.
    InnocentReached { npc: u32 },
    /// A revealed hypocrite reached the player.
    CaughtBy { npc: u32 },
    /// A deferred effect came due. Ignored if `generation` is stale.
    TimerFired {
        generation: u64,
        effect: DeferredEffect,
    },
}

/// Fire-and-forget audio trigger for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    ScanPerformed,
    ItemUsed,
    InnocentCollected,
    PlayerCaught,
    Victory,
}
