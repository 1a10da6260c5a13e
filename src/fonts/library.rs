use std::collections::HashMap;

use bevy::prelude::*;

use super::loader::FontLoadError;
use super::table::FontResource;
use crate::glyph::GlyphOutline;

/// Load state of one glyph-outline resource.
///
/// `NotRequested → Loading → Loaded | Failed`; `Failed` is terminal so a
/// broken font is never requested again on re-render.
#[derive(Debug, Clone, Default)]
pub enum FontLoadState {
    #[default]
    NotRequested,
    Loading,
    Loaded(GlyphOutline),
    Failed(FontLoadError),
}

/// Payload-free view of [`FontLoadState`] for display and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontLoadStatus {
    NotRequested,
    Loading,
    Loaded,
    Failed,
}

impl FontLoadState {
    pub fn status(&self) -> FontLoadStatus {
        match self {
            FontLoadState::NotRequested => FontLoadStatus::NotRequested,
            FontLoadState::Loading => FontLoadStatus::Loading,
            FontLoadState::Loaded(_) => FontLoadStatus::Loaded,
            FontLoadState::Failed(_) => FontLoadStatus::Failed,
        }
    }
}

/// Cache of glyph outlines shared by every surface and family
#[derive(Resource, Debug, Default)]
pub struct FontLibrary {
    states: HashMap<FontResource, FontLoadState>,
}

impl FontLibrary {
    pub fn status(&self, key: &FontResource) -> FontLoadStatus {
        self.states
            .get(key)
            .map(FontLoadState::status)
            .unwrap_or(FontLoadStatus::NotRequested)
    }

    pub fn state(&self, key: &FontResource) -> Option<&FontLoadState> {
        self.states.get(key)
    }

    /// Outline for `key` if it finished loading
    pub fn outline(&self, key: &FontResource) -> Option<&GlyphOutline> {
        match self.states.get(key) {
            Some(FontLoadState::Loaded(outline)) => Some(outline),
            _ => None,
        }
    }

    /// Mark `key` as loading.
    ///
    /// Returns `true` only if the caller should issue the load, i.e. the
    /// resource was never requested before.
    pub fn begin(&mut self, key: &FontResource) -> bool {
        let state = self.states.entry(key.clone()).or_default();
        if matches!(state, FontLoadState::NotRequested) {
            *state = FontLoadState::Loading;
            true
        } else {
            false
        }
    }

    /// Record the outcome of a load.
    ///
    /// Only a `Loading` resource transitions; late results (e.g. after a
    /// timeout already failed the load) are dropped. Returns whether the
    /// state changed.
    pub fn complete(
        &mut self,
        key: &FontResource,
        result: Result<GlyphOutline, FontLoadError>,
    ) -> bool {
        let Some(state) = self.states.get_mut(key) else {
            return false;
        };
        if !matches!(state, FontLoadState::Loading) {
            return false;
        }
        *state = match result {
            Ok(outline) => FontLoadState::Loaded(outline),
            Err(err) => FontLoadState::Failed(err),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(path: &str) -> FontResource {
        FontResource::new(path)
    }

    fn io_error() -> FontLoadError {
        FontLoadError::Load {
            path: "fonts/missing.ttf".to_string(),
            message: "not found".to_string(),
        }
    }

    #[test]
    fn unknown_resource_is_not_requested() {
        let library = FontLibrary::default();
        assert_eq!(library.status(&key("a.ttf")), FontLoadStatus::NotRequested);
        assert!(library.outline(&key("a.ttf")).is_none());
    }

    #[test]
    fn begin_is_deduplicated() {
        let mut library = FontLibrary::default();
        assert!(library.begin(&key("a.ttf")));
        assert!(!library.begin(&key("a.ttf")));
        assert_eq!(library.status(&key("a.ttf")), FontLoadStatus::Loading);
        assert!(library.begin(&key("b.ttf")));
        assert_eq!(library.status(&key("b.ttf")), FontLoadStatus::Loading);
    }

    #[test]
    fn failure_is_terminal() {
        let mut library = FontLibrary::default();
        library.begin(&key("a.ttf"));
        assert!(library.complete(&key("a.ttf"), Err(io_error())));
        assert_eq!(library.status(&key("a.ttf")), FontLoadStatus::Failed);

        // Re-render must not refire the load
        assert!(!library.begin(&key("a.ttf")));
        assert_eq!(library.status(&key("a.ttf")), FontLoadStatus::Failed);
        assert!(library.outline(&key("a.ttf")).is_none());
    }

    #[test]
    fn late_results_are_dropped() {
        let mut library = FontLibrary::default();
        library.begin(&key("a.ttf"));
        library.complete(&key("a.ttf"), Err(FontLoadError::Timeout { secs: 1.0 }));
        assert!(!library.complete(&key("a.ttf"), Err(io_error())));
        assert!(matches!(
            library.state(&key("a.ttf")),
            Some(FontLoadState::Failed(FontLoadError::Timeout { .. }))
        ));
    }

    #[test]
    fn completion_without_request_is_ignored() {
        let mut library = FontLibrary::default();
        assert!(!library.complete(&key("a.ttf"), Err(io_error())));
        assert_eq!(library.status(&key("a.ttf")), FontLoadStatus::NotRequested);
    }
}
