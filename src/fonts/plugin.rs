use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::library::FontLibrary;
use super::loader::{FontLoadError, GlyphOutlineLoader};
use super::table::FontResource;
use crate::config::{ConfigurationChanged, Customizer, CustomizerSet};
use crate::glyph::GlyphOutline;
use crate::scene::fonts_to_request;
use crate::ui::CustomizerSettings;

/// Published once when a font load finishes, successfully or not
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct GlyphOutlineReady {
    pub resource: FontResource,
    pub loaded: bool,
}

struct PendingLoad {
    handle: Handle<GlyphOutline>,
    started: f64,
}

/// Font handles the asset server is still working on
#[derive(Resource, Default)]
pub struct PendingFontLoads {
    loads: HashMap<FontResource, PendingLoad>,
}

impl PendingFontLoads {
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontLoadSet;

/// Requires `AssetPlugin` (part of `DefaultPlugins`)
pub struct FontLoadingPlugin;

impl Plugin for FontLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<GlyphOutline>()
            .init_asset_loader::<GlyphOutlineLoader>()
            .init_resource::<CustomizerSettings>()
            .init_resource::<FontLibrary>()
            .init_resource::<PendingFontLoads>()
            .add_message::<GlyphOutlineReady>()
            .add_systems(
                Update,
                (request_font_loads, poll_font_loads)
                    .chain()
                    .in_set(FontLoadSet)
                    .after(CustomizerSet::ApplyActions),
            );
    }
}

/// Issue loads for fonts the new configuration needs
fn request_font_loads(
    mut changed: MessageReader<ConfigurationChanged>,
    customizer: Res<Customizer>,
    settings: Res<CustomizerSettings>,
    asset_server: Res<AssetServer>,
    time: Res<Time<Real>>,
    mut library: ResMut<FontLibrary>,
    mut pending: ResMut<PendingFontLoads>,
) {
    if changed.read().count() == 0 {
        return;
    }

    for resource in fonts_to_request(customizer.config(), &settings.fonts, &library) {
        if !library.begin(&resource) {
            continue;
        }
        debug!("Requesting glyph outlines '{}'", resource);
        let handle: Handle<GlyphOutline> = asset_server.load(resource.as_str().to_string());
        pending.loads.insert(
            resource,
            PendingLoad {
                handle,
                started: time.elapsed_secs_f64(),
            },
        );
    }
}

/// Outcome of a pending load, `None` while it should keep waiting.
///
/// A timeout of zero or less waits forever.
pub fn settle_font_load(
    resource: &FontResource,
    outline: Option<&GlyphOutline>,
    state: &LoadState,
    elapsed_secs: f64,
    timeout_secs: f32,
) -> Option<Result<GlyphOutline, FontLoadError>> {
    if let Some(outline) = outline {
        return Some(Ok(outline.clone()));
    }
    match state {
        LoadState::Failed(err) => Some(Err(FontLoadError::Load {
            path: resource.to_string(),
            message: err.to_string(),
        })),
        _ if timeout_secs > 0.0 && elapsed_secs > f64::from(timeout_secs) => {
            Some(Err(FontLoadError::Timeout { secs: timeout_secs }))
        }
        _ => None,
    }
}

/// Move finished (or timed out) loads into the library
fn poll_font_loads(
    settings: Res<CustomizerSettings>,
    time: Res<Time<Real>>,
    asset_server: Res<AssetServer>,
    outlines: Res<Assets<GlyphOutline>>,
    mut library: ResMut<FontLibrary>,
    mut pending: ResMut<PendingFontLoads>,
    mut ready: MessageWriter<GlyphOutlineReady>,
) {
    if pending.loads.is_empty() {
        return;
    }

    let now = time.elapsed_secs_f64();
    let timeout = settings.font_load_timeout_secs;

    pending.loads.retain(|resource, load| {
        let state = asset_server.load_state(&load.handle);
        let Some(result) = settle_font_load(
            resource,
            outlines.get(&load.handle),
            &state,
            now - load.started,
            timeout,
        ) else {
            return true;
        };

        match &result {
            Ok(outline) => info!(
                "Loaded glyph outlines '{}' ({})",
                resource,
                outline.family_name().unwrap_or("unnamed")
            ),
            Err(e) => error!("Engraving font '{}' unavailable: {}", resource, e),
        }

        let loaded = result.is_ok();
        if library.complete(resource, result) {
            ready.write(GlyphOutlineReady {
                resource: resource.clone(),
                loaded,
            });
        }
        // Dropping the handle abandons a timed-out load
        false
    });
}
