//! Deferred effects: notification dismissal, damage flash, scan beam.
//!
//! Each effect is stamped with the session generation it was scheduled in
//! and carries the token of the value it is meant to clear. When it fires,
//! the reducer drops it if the session was restarted or the value was
//! replaced in the meantime, even by an identical one.

use serde::{Deserialize, Serialize};

/// What to undo when a timer comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredEffect {
    /// Clear notification number `notice`, unless a newer one replaced it.
    ClearNotification { notice: u64 },
    /// End damage flash number `flash`.
    ClearDamage { flash: u64 },
    /// End scan beam number `pulse`.
    EndScanBeam { pulse: u64 },
}

#[derive(Debug, Clone)]
struct Scheduled {
    fires_at: f64,
    generation: u64,
    effect: DeferredEffect,
}

/// Pending deferred effects, fired in due-time order (ties in scheduling
/// order).
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fires_at: f64, generation: u64, effect: DeferredEffect) {
        self.pending.push(Scheduled {
            fires_at,
            generation,
            effect,
        });
    }

    /// Remove and return every effect due at or before `now`.
    pub fn take_due(&mut self, now: f64) -> Vec<(u64, DeferredEffect)> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.fires_at <= now);
        self.pending = pending;
        // Stable sort keeps scheduling order for equal due times.
        due.sort_by(|a, b| a.fires_at.total_cmp(&b.fires_at));
        due.into_iter().map(|s| (s.generation, s.effect)).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
