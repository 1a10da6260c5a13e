use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use thiserror::Error;

use crate::glyph::{GlyphError, GlyphOutline};

/// Why a glyph-outline resource could not be loaded
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FontLoadError {
    #[error("failed to load '{path}': {message}")]
    Load { path: String, message: String },
    #[error("load did not finish within {secs}s")]
    Timeout { secs: f32 },
}

/// Errors raised by [`GlyphOutlineLoader`]
#[derive(Debug, Error)]
pub enum GlyphOutlineLoaderError {
    #[error("could not read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    InvalidFont(#[from] GlyphError),
}

/// Loads `.ttf` / `.otf` files as [`GlyphOutline`] assets
#[derive(Default, TypePath)]
pub struct GlyphOutlineLoader;

impl AssetLoader for GlyphOutlineLoader {
    type Asset = GlyphOutline;
    type Settings = ();
    type Error = GlyphOutlineLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        Ok(GlyphOutline::from_bytes(bytes)?)
    }

    fn extensions(&self) -> &[&str] {
        &["ttf", "otf"]
    }
}
