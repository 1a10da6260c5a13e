//! The engraved cube scene: pure description plus the Bevy entities drawn from it

mod describe;
mod spawn;

pub use describe::*;
pub use spawn::*;
