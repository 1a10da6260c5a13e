mod engraving;
mod state;
pub mod symbols;

pub use engraving::*;
pub use state::*;
