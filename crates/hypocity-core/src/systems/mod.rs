//! Systems - logic that operates on components

mod interaction;
mod npc_behavior;
mod player;

pub use interaction::*;
pub use npc_behavior::*;
pub use player::*;
