use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::engraving::{
    DEFAULT_FONT_SIZE, MAX_CHARACTERS, MAX_FONT_SIZE, MIN_FONT_SIZE,
};

/// One of the four engravable vertical faces of the cube.
///
/// Top and bottom are never engraved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Surface {
    Front,
    Right,
    Back,
    Left,
}

impl Surface {
    pub const ALL: [Surface; 4] = [Surface::Front, Surface::Right, Surface::Back, Surface::Left];

    /// Array index of this surface
    pub fn index(self) -> usize {
        match self {
            Surface::Front => 0,
            Surface::Right => 1,
            Surface::Back => 2,
            Surface::Left => 3,
        }
    }

    /// 1-based number shown in the panel ("Surface 1".."Surface 4")
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Surface::Front => "Front",
            Surface::Right => "Right",
            Surface::Back => "Back",
            Surface::Left => "Left",
        }
    }
}

/// Which slot of a surface is engraved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngravingMode {
    /// Free text ("Word")
    #[default]
    Text,
    /// A library symbol ("Logo")
    Symbol,
}

impl EngravingMode {
    pub fn label(self) -> &'static str {
        match self {
            EngravingMode::Text => "Word",
            EngravingMode::Symbol => "Logo",
        }
    }
}

/// Cube body material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeMaterial {
    #[default]
    RoseGold,
    Gold,
    Silver,
    Black,
}

impl CubeMaterial {
    pub const ALL: [CubeMaterial; 4] = [
        CubeMaterial::RoseGold,
        CubeMaterial::Gold,
        CubeMaterial::Silver,
        CubeMaterial::Black,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CubeMaterial::RoseGold => "Rose Gold",
            CubeMaterial::Gold => "Gold",
            CubeMaterial::Silver => "Silver",
            CubeMaterial::Black => "Black",
        }
    }

    /// sRGB bytes of the display color
    pub fn rgb(self) -> [u8; 3] {
        match self {
            CubeMaterial::RoseGold => [0xE8, 0xB4, 0xA0],
            CubeMaterial::Gold => [0xFF, 0xD7, 0x00],
            CubeMaterial::Silver => [0xC0, 0xC0, 0xC0],
            CubeMaterial::Black => [0x2C, 0x2C, 0x2C],
        }
    }

    pub fn color(self) -> Color {
        let [r, g, b] = self.rgb();
        Color::srgb_u8(r, g, b)
    }

    /// Display color as `#RRGGBB`
    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Parse a display label ("Rose Gold") or variant name ("RoseGold")
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        Self::ALL
            .into_iter()
            .find(|m| normalize_name(m.label()) == wanted)
    }
}

/// Supported engraving fonts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Helvetiker,
    Optimer,
    Gentilis,
    Inter,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Helvetiker,
        FontFamily::Optimer,
        FontFamily::Gentilis,
        FontFamily::Inter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Helvetiker => "Helvetiker",
            FontFamily::Optimer => "Optimer",
            FontFamily::Gentilis => "Gentilis",
            FontFamily::Inter => "Inter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        Self::ALL
            .into_iter()
            .find(|f| normalize_name(f.label()) == wanted)
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Stored engraving of a single surface.
///
/// Both slots are kept; `mode` picks the one that is shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceEngraving {
    pub text: String,
    pub symbol: String,
    pub mode: EngravingMode,
}

impl SurfaceEngraving {
    /// Content that is engraved for the current mode (possibly empty)
    pub fn active_content(&self) -> &str {
        match self.mode {
            EngravingMode::Text => &self.text,
            EngravingMode::Symbol => &self.symbol,
        }
    }
}

/// The user's cube configuration.
///
/// Every setter is total: out-of-range input is truncated or clamped, never
/// rejected. Setters return `true` when the stored value changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngravingConfiguration {
    surfaces: [SurfaceEngraving; 4],
    material: CubeMaterial,
    font: FontFamily,
    font_size: f32,
}

impl Default for EngravingConfiguration {
    fn default() -> Self {
        Self {
            surfaces: Default::default(),
            material: CubeMaterial::default(),
            font: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl EngravingConfiguration {
    pub fn surface(&self, surface: Surface) -> &SurfaceEngraving {
        &self.surfaces[surface.index()]
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (Surface, &SurfaceEngraving)> {
        Surface::ALL.into_iter().map(|s| (s, self.surface(s)))
    }

    pub fn material(&self) -> CubeMaterial {
        self.material
    }

    pub fn font(&self) -> FontFamily {
        self.font
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn active_content(&self, surface: Surface) -> &str {
        self.surface(surface).active_content()
    }

    /// Number of characters of the active content
    pub fn character_count(&self, surface: Surface) -> usize {
        self.active_content(surface).chars().count()
    }

    /// Live indicator shown next to a text input, e.g. `"3/10"`
    pub fn character_indicator(&self, surface: Surface) -> String {
        format!("{}/{}", self.character_count(surface), MAX_CHARACTERS)
    }

    /// Store text for a surface, keeping only the first ten characters
    pub fn set_surface_content(&mut self, surface: Surface, text: &str) -> bool {
        let truncated: String = text.chars().take(MAX_CHARACTERS).collect();
        let slot = &mut self.surfaces[surface.index()].text;
        if *slot == truncated {
            return false;
        }
        *slot = truncated;
        true
    }

    /// Store a symbol glyph for a surface
    pub fn set_surface_symbol(&mut self, surface: Surface, glyph: &str) -> bool {
        let slot = &mut self.surfaces[surface.index()].symbol;
        if slot == glyph {
            return false;
        }
        *slot = glyph.to_string();
        true
    }

    /// Switch the active slot of a surface; the other slot keeps its value
    pub fn set_surface_mode(&mut self, surface: Surface, mode: EngravingMode) -> bool {
        let slot = &mut self.surfaces[surface.index()].mode;
        if *slot == mode {
            return false;
        }
        *slot = mode;
        true
    }

    pub fn set_material(&mut self, material: CubeMaterial) -> bool {
        let changed = self.material != material;
        self.material = material;
        changed
    }

    /// Set the material from a display name; unknown names are ignored
    pub fn set_material_by_name(&mut self, name: &str) -> bool {
        match CubeMaterial::from_name(name) {
            Some(material) => self.set_material(material),
            None => {
                warn!("Ignoring unknown material '{}'", name);
                false
            }
        }
    }

    pub fn set_font(&mut self, font: FontFamily) -> bool {
        let changed = self.font != font;
        self.font = font;
        changed
    }

    /// Set the font from a family name; unknown names are ignored
    pub fn set_font_by_name(&mut self, name: &str) -> bool {
        match FontFamily::from_name(name) {
            Some(font) => self.set_font(font),
            None => {
                warn!("Ignoring unknown font family '{}'", name);
                false
            }
        }
    }

    /// Set the font size, clamped to the supported range.
    /// Non-finite values leave the size unchanged.
    pub fn set_font_size(&mut self, size: f32) -> bool {
        if !size.is_finite() {
            warn!("Ignoring non-finite font size {}", size);
            return false;
        }
        let clamped = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if clamped != size {
            debug!("Font size {} clamped to {}", size, clamped);
        }
        let changed = self.font_size != clamped;
        self.font_size = clamped;
        changed
    }

    /// One-line description of the configuration
    pub fn summary(&self) -> String {
        let faces: Vec<String> = self
            .surfaces()
            .map(|(surface, engraving)| {
                let content = engraving.active_content();
                if content.is_empty() {
                    format!("{}: -", surface.label())
                } else {
                    format!("{}: {} \"{}\"", surface.label(), engraving.mode.label(), content)
                }
            })
            .collect();
        format!(
            "{} cube, {} {:.2} | {}",
            self.material.label(),
            self.font.label(),
            self.font_size,
            faces.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngravingConfiguration::default();
        assert_eq!(config.material(), CubeMaterial::RoseGold);
        assert_eq!(config.font(), FontFamily::Helvetiker);
        assert_eq!(config.font_size(), 0.15);
        for (_, engraving) in config.surfaces() {
            assert_eq!(engraving.mode, EngravingMode::Text);
            assert!(engraving.text.is_empty());
            assert!(engraving.symbol.is_empty());
        }
    }

    #[test]
    fn content_is_truncated_to_ten_characters() {
        let mut config = EngravingConfiguration::default();
        config.set_surface_content(Surface::Front, "HELLOWORLD!");
        assert_eq!(config.active_content(Surface::Front), "HELLOWORLD");

        for input in ["", "a", "exactly10!", "much longer than ten characters"] {
            config.set_surface_content(Surface::Back, input);
            let expected: String = input.chars().take(10).collect();
            assert_eq!(config.active_content(Surface::Back), expected);
        }
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let mut config = EngravingConfiguration::default();
        config.set_surface_content(Surface::Left, "ÄÖÜäöüßéèêë");
        assert_eq!(config.active_content(Surface::Left), "ÄÖÜäöüßéèê");
        assert_eq!(config.character_count(Surface::Left), 10);
        assert_eq!(config.character_indicator(Surface::Left), "10/10");
    }

    #[test]
    fn mode_switch_preserves_both_slots() {
        let mut config = EngravingConfiguration::default();
        config.set_surface_content(Surface::Front, "LOVE");
        config.set_surface_mode(Surface::Front, EngravingMode::Symbol);
        assert_eq!(config.active_content(Surface::Front), "");
        config.set_surface_mode(Surface::Front, EngravingMode::Text);
        assert_eq!(config.active_content(Surface::Front), "LOVE");
    }

    #[test]
    fn symbol_does_not_touch_text_slot() {
        let mut config = EngravingConfiguration::default();
        config.set_surface_content(Surface::Right, "ANNA");
        config.set_surface_mode(Surface::Right, EngravingMode::Symbol);
        config.set_surface_symbol(Surface::Right, "♪");
        assert_eq!(config.active_content(Surface::Right), "♪");
        assert_eq!(config.surface(Surface::Right).text, "ANNA");
    }

    #[test]
    fn setters_do_not_change_mode() {
        let mut config = EngravingConfiguration::default();
        config.set_surface_symbol(Surface::Back, "*");
        assert_eq!(config.surface(Surface::Back).mode, EngravingMode::Text);
        config.set_surface_mode(Surface::Back, EngravingMode::Symbol);
        config.set_surface_content(Surface::Back, "X");
        assert_eq!(config.surface(Surface::Back).mode, EngravingMode::Symbol);
    }

    #[test]
    fn font_size_is_clamped() {
        let mut config = EngravingConfiguration::default();
        config.set_font_size(-1.0);
        assert_eq!(config.font_size(), 0.08);
        config.set_font_size(100.0);
        assert_eq!(config.font_size(), 0.25);
        config.set_font_size(0.2);
        assert_eq!(config.font_size(), 0.2);
    }

    #[test]
    fn non_finite_font_size_is_ignored() {
        let mut config = EngravingConfiguration::default();
        assert!(!config.set_font_size(f32::NAN));
        assert!(!config.set_font_size(f32::INFINITY));
        assert_eq!(config.font_size(), 0.15);
    }

    #[test]
    fn setters_report_changes() {
        let mut config = EngravingConfiguration::default();
        assert!(config.set_surface_content(Surface::Front, "A"));
        assert!(!config.set_surface_content(Surface::Front, "A"));
        assert!(config.set_material(CubeMaterial::Gold));
        assert!(!config.set_material(CubeMaterial::Gold));
        assert!(!config.set_font(FontFamily::Helvetiker));
        assert!(config.set_font(FontFamily::Optimer));
    }

    #[test]
    fn names_are_parsed_leniently() {
        assert_eq!(CubeMaterial::from_name("Rose Gold"), Some(CubeMaterial::RoseGold));
        assert_eq!(CubeMaterial::from_name("rosegold"), Some(CubeMaterial::RoseGold));
        assert_eq!(CubeMaterial::from_name("Platinum"), None);
        assert_eq!(FontFamily::from_name("gentilis"), Some(FontFamily::Gentilis));
        assert_eq!(FontFamily::from_name("Comic Sans"), None);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut config = EngravingConfiguration::default();
        assert!(!config.set_material_by_name("Platinum"));
        assert!(!config.set_font_by_name("Comic Sans"));
        assert_eq!(config.material(), CubeMaterial::RoseGold);
        assert_eq!(config.font(), FontFamily::Helvetiker);
        assert!(config.set_material_by_name("Black"));
        assert_eq!(config.material(), CubeMaterial::Black);
    }

    #[test]
    fn material_colors() {
        assert_eq!(CubeMaterial::RoseGold.hex(), "#E8B4A0");
        assert_eq!(CubeMaterial::Gold.hex(), "#FFD700");
        assert_eq!(CubeMaterial::Silver.hex(), "#C0C0C0");
        assert_eq!(CubeMaterial::Black.hex(), "#2C2C2C");
    }

    #[test]
    fn summary_lists_engraved_faces() {
        let mut config = EngravingConfiguration::default();
        config.set_surface_content(Surface::Front, "HI");
        let summary = config.summary();
        assert!(summary.starts_with("Rose Gold cube, Helvetiker 0.15"));
        assert!(summary.contains("Front: Word \"HI\""));
        assert!(summary.contains("Left: -"));
    }
}
