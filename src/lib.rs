//! # Engraved Cube Customizer
//!
//! An interactive 3D product customizer for a metal cube with engraved text
//! or symbols on its four side faces.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use engraved_cube::CustomizerPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(CustomizerPlugin)
//!         .run();
//! }
//! ```
//!
//! ## Data Flow
//!
//! Panel widgets write [`CustomizerAction`] messages. The configuration state
//! applies them in order and publishes one [`ConfigurationChanged`] per
//! action. The font loader requests any glyph outlines the new configuration
//! needs and publishes [`GlyphOutlineReady`] when a load finishes. The scene
//! is re-derived from the configuration and the font cache whenever either
//! message arrives.
//!
//! Fonts are `.ttf` / `.otf` assets loaded through Bevy's `AssetServer`; the
//! bundled DejaVu faces live in `assets/fonts/`. See [`CustomizerSettings`]
//! for the settings file location and the family table.

pub mod config;
pub mod constants;
pub mod customizer;
pub mod fonts;
pub mod glyph;
pub mod scene;
pub mod ui;

// Re-export the main plugin
pub use customizer::{CameraCommand, CustomizerPlugin, OrbitCamera};

// Re-export configuration types
pub use config::{
    ConfigurationChanged, CubeMaterial, Customizer, CustomizerAction, EngravingConfiguration,
    EngravingMode, FontFamily, OrderRequested, Surface,
};

// Re-export font loading types
pub use fonts::{
    FontLibrary, FontLoadError, FontLoadState, FontTable, GlyphOutlineLoader, GlyphOutlineReady,
};

// Re-export the pure scene derivation
pub use scene::{derive_scene, SceneDescription};

pub use ui::CustomizerSettings;
