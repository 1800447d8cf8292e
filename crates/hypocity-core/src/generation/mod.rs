//! Generation - procedural creation of the city and its inhabitants.

mod city;
mod npcs;
mod spawn;

pub use city::*;
pub use npcs::*;
pub use spawn::*;
