use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::FontFamily;

/// Resource used when neither the requested nor the default family is mapped
pub const FALLBACK_FONT_RESOURCE: &str = "fonts/DejaVuSans.ttf";

/// Key of a glyph-outline resource (a path relative to the asset root).
///
/// Several families may share one resource; loads are de-duplicated by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontResource(pub String);

impl FontResource {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FontResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font family → glyph resource mapping.
///
/// Part of the settings file so aliases (Inter currently reuses Helvetiker's
/// outlines) can be replaced without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontTable {
    /// Family whose resource is used for unmapped families
    #[serde(default)]
    pub default_family: FontFamily,
    #[serde(default)]
    pub resources: BTreeMap<FontFamily, String>,
}

impl Default for FontTable {
    fn default() -> Self {
        let resources = [
            (FontFamily::Helvetiker, "fonts/DejaVuSans.ttf"),
            (FontFamily::Optimer, "fonts/DejaVuSansCondensed.ttf"),
            (FontFamily::Gentilis, "fonts/DejaVuSerif.ttf"),
            (FontFamily::Inter, "fonts/DejaVuSans.ttf"),
        ]
        .into_iter()
        .map(|(family, path)| (family, path.to_string()))
        .collect();

        Self {
            default_family: FontFamily::Helvetiker,
            resources,
        }
    }
}

impl FontTable {
    /// Resource for a family, falling back to the default family's resource
    pub fn resolve(&self, family: FontFamily) -> FontResource {
        self.resources
            .get(&family)
            .or_else(|| self.resources.get(&self.default_family))
            .map(|path| FontResource::new(path.clone()))
            .unwrap_or_else(|| FontResource::new(FALLBACK_FONT_RESOURCE))
    }

    /// Families that share their resource with another family
    pub fn aliases(&self) -> Vec<(FontFamily, FontFamily)> {
        let mut out = Vec::new();
        for family in FontFamily::ALL {
            let resource = self.resolve(family);
            if let Some(owner) = FontFamily::ALL
                .into_iter()
                .take_while(|f| *f != family)
                .find(|f| self.resolve(*f) == resource)
            {
                out.push((family, owner));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_maps_every_family() {
        let table = FontTable::default();
        assert_eq!(
            table.resolve(FontFamily::Optimer).as_str(),
            "fonts/DejaVuSansCondensed.ttf"
        );
        assert_eq!(
            table.resolve(FontFamily::Inter),
            table.resolve(FontFamily::Helvetiker)
        );
    }

    #[test]
    fn unmapped_family_uses_default_family() {
        let mut table = FontTable::default();
        table.resources.remove(&FontFamily::Gentilis);
        assert_eq!(
            table.resolve(FontFamily::Gentilis),
            table.resolve(FontFamily::Helvetiker)
        );
    }

    #[test]
    fn empty_table_uses_fallback_resource() {
        let table = FontTable {
            default_family: FontFamily::Optimer,
            resources: BTreeMap::new(),
        };
        assert_eq!(table.resolve(FontFamily::Inter).as_str(), FALLBACK_FONT_RESOURCE);
    }

    #[test]
    fn aliases_are_reported() {
        let table = FontTable::default();
        assert_eq!(table.aliases(), vec![(FontFamily::Inter, FontFamily::Helvetiker)]);

        let mut table = table;
        table
            .resources
            .insert(FontFamily::Inter, "fonts/inter_regular.ttf".to_string());
        assert!(table.aliases().is_empty());
    }

    #[test]
    fn table_round_trips_through_ron() {
        let table = FontTable::default();
        let text = ron::to_string(&table).unwrap();
        let back: FontTable = ron::from_str(&text).unwrap();
        assert_eq!(back, table);
    }
}
