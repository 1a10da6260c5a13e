//! Centralized constants for the customizer
//!
//! Cube geometry, engraving limits and the finish shared by the scene and the
//! control panel live here so both sides agree on the same numbers.

use bevy::prelude::*;

/// Cube body dimensions and finish
pub mod cube {
    /// Edge length of the cube (world units)
    pub const EDGE: f32 = 2.0;
    /// Distance from the cube center to an engraving plane.
    /// Slightly past the face so the text never z-fights with the body.
    pub const ENGRAVING_OFFSET: f32 = EDGE * 0.5 + 0.01;
    /// Body metalness
    pub const METALLIC: f32 = 0.8;
    /// Body roughness
    pub const ROUGHNESS: f32 = 0.2;
}

/// Engraving limits
pub mod engraving {
    use super::*;

    /// Maximum number of characters per text surface
    pub const MAX_CHARACTERS: usize = 10;
    /// Smallest allowed font size (world units per em)
    pub const MIN_FONT_SIZE: f32 = 0.08;
    /// Largest allowed font size (world units per em)
    pub const MAX_FONT_SIZE: f32 = 0.25;
    /// Font size slider step
    pub const FONT_SIZE_STEP: f32 = 0.01;
    /// Font size used on a fresh configuration
    pub const DEFAULT_FONT_SIZE: f32 = 0.15;
    /// Extrusion depth of engraved text
    pub const DEPTH: f32 = 0.02;
    /// Number of segments a single glyph curve is approximated with
    pub const CURVE_SEGMENTS: u32 = 12;
    /// Engraved text color
    pub const TEXT_COLOR: Color = Color::srgb(0.0, 0.0, 0.0);
}

/// Preview lighting
pub mod lighting {
    use super::*;

    pub const AMBIENT_BRIGHTNESS: f32 = 200.0;
    /// Uniform studio environment reflected by the metallic body
    pub const ENVIRONMENT_COLOR: Color = Color::srgb(0.92, 0.92, 0.95);
    pub const ENVIRONMENT_INTENSITY: f32 = 1500.0;
    pub const DIRECTIONAL_ILLUMINANCE: f32 = 8000.0;
    pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(10.0, 10.0, 5.0);
    /// Clear color behind the preview (soft studio gray)
    pub const BACKGROUND: Color = Color::srgb(0.93, 0.93, 0.94);
}

/// Displayed product price
pub const PRICE_LABEL: &str = "$89.99";
