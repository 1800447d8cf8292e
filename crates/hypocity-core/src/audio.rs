//! Audio context - cue outbox and ambient loop state.
//!
//! The context is opened when play starts and closed on restart. Synthesis
//! is the presentation layer's job: it drains the queued [`Cue`]s each frame
//! and mirrors [`AudioContext::ambiance_playing`].

use crate::events::Cue;

#[derive(Debug, Default)]
pub struct AudioContext {
    ambiance: bool,
    queued: Vec<Cue>,
}

impl AudioContext {
    pub fn open() -> Self {
        log::debug!("Audio context opened");
        Self::default()
    }

    pub fn start_ambiance(&mut self) {
        self.ambiance = true;
    }

    pub fn ambiance_playing(&self) -> bool {
        self.ambiance
    }

    pub fn play(&mut self, cue: Cue) {
        self.queued.push(cue);
    }

    /// Take every cue queued since the last drain.
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.queued)
    }

    /// Stop the ambient loop and release the context. Cues not yet drained
    /// are returned so the caller can still hand them out.
    pub fn close(mut self) -> Vec<Cue> {
        self.ambiance = false;
        log::debug!("Audio context closed ({} cues pending)", self.queued.len());
        self.drain()
    }
}
