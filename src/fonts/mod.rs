//! Glyph-outline loading: family table, asset loader and load-state cache

mod library;
mod loader;
mod plugin;
mod table;

pub use library::*;
pub use loader::*;
pub use plugin::*;
pub use table::*;
