//! The two state machines: session status and per-NPC status.
//!
//! ```text
//! Session:  Tutorial ──start──▶ Playing ──win──▶ Victory
//!              ▲                   └──broke catch──▶ Counseling
//!              └────────── restart ◀──── (Victory | Counseling)
//!
//! NPC:      Unseen ──identify──▶ Identified ──neutralize──▶ Neutralized
//!              └────────────── neutralize ─────────────────────▲
//! ```
//!
//! Both machines reject illegal requests with a [`TransitionError`] instead of
//! silently flipping flags.

use serde::{Deserialize, Serialize};

/// Session status. Only `Playing` runs the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Tutorial,
    Playing,
    Victory,
    Counseling,
}

/// Something that may move the session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusSignal {
    /// Any key pressed while the tutorial is shown.
    Start,
    /// The victory counter reached its threshold.
    Win,
    /// A revealed hypocrite caught the player with no coins left.
    CaughtBroke,
    /// Space pressed on an end screen.
    Restart,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Victory | GameStatus::Counseling)
    }

    pub fn is_playing(&self) -> bool {
        *self == GameStatus::Playing
    }

    /// The status `signal` leads to, or an error if it is not honored here.
    pub fn next(self, signal: StatusSignal) -> Result<GameStatus, TransitionError> {
        use GameStatus::*;
        use StatusSignal::*;
        match (self, signal) {
            (Tutorial, Start) => Ok(Playing),
            (Playing, Win) => Ok(Victory),
            (Playing, CaughtBroke) => Ok(Counseling),
            (Victory | Counseling, Restart) => Ok(Tutorial),
            (from, signal) => Err(TransitionError::Status { from, signal }),
        }
    }
}

/// Per-NPC reveal/removal state. `Neutralized` is terminal: the NPC stays
/// in the collection as a tombstone but never moves, triggers, or renders.
/// It remembers whether the type had been revealed, so "scanned" never
/// reverts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcStatus {
    #[default]
    Unseen,
    Identified,
    Neutralized { revealed: bool },
}

impl NpcStatus {
    /// Type has been revealed by a scan (stays true after neutralization).
    pub fn is_scanned(&self) -> bool {
        matches!(
            self,
            NpcStatus::Identified | NpcStatus::Neutralized { revealed: true }
        )
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, NpcStatus::Neutralized { .. })
    }

    pub fn is_active(&self) -> bool {
        !self.is_removed()
    }

    /// Reveal the NPC's type. Only legal from `Unseen`.
    pub fn identify(self) -> Result<NpcStatus, TransitionError> {
        match self {
            NpcStatus::Unseen => Ok(NpcStatus::Identified),
            from => Err(TransitionError::Npc {
                from,
                to: NpcStatus::Identified,
            }),
        }
    }

    /// Remove the NPC from play. Legal from any non-terminal state.
    pub fn neutralize(self) -> Result<NpcStatus, TransitionError> {
        match self {
            NpcStatus::Unseen => Ok(NpcStatus::Neutralized { revealed: false }),
            NpcStatus::Identified => Ok(NpcStatus::Neutralized { revealed: true }),
            from => Err(TransitionError::Npc { from, to: from }),
        }
    }
}

/// An illegal state-machine request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    Status {
        from: GameStatus,
        signal: StatusSignal,
    },
    Npc {
        from: NpcStatus,
        to: NpcStatus,
    },
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::Status { from, signal } => {
                write!(f, "signal {:?} is not honored in status {:?}", signal, from)
            }
            TransitionError::Npc { from, to } => {
                write!(f, "NPC cannot move from {:?} to {:?}", from, to)
            }
        }
    }
}

impl std::error::Error for TransitionError {}
