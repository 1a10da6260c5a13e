//! Glyph outlines and extruded text meshes

mod extrude;
mod outline;

pub use extrude::*;
pub use outline::*;

use thiserror::Error;

/// Errors raised while turning a font and a string into a mesh
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GlyphError {
    #[error("invalid font data: {0}")]
    InvalidFont(String),
    #[error("tessellation failed: {0}")]
    Tessellation(String),
    #[error("text has no visible outline")]
    EmptyOutline,
}
