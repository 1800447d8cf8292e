//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to NPC entities.
//! They have no behavior - that lives in systems.

mod common;
mod npc;

pub use common::*;
pub use npc::*;
