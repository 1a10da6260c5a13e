//! Symbol library for "Logo" engravings

/// A named symbol that can be engraved instead of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub name: &'static str,
    pub glyph: &'static str,
}

/// All engravable symbols, in display order
pub const SYMBOLS: [Symbol; 8] = [
    Symbol { name: "heart", glyph: "<3" },
    Symbol { name: "star", glyph: "*" },
    Symbol { name: "music", glyph: "♪" },
    Symbol { name: "diamond", glyph: "<>" },
    Symbol { name: "crown", glyph: "^" },
    Symbol { name: "infinity", glyph: "8" },
    Symbol { name: "peace", glyph: "O" },
    Symbol { name: "smile", glyph: ":)" },
];

/// Look up the glyph for a symbol name
pub fn glyph_for(name: &str) -> Option<&'static str> {
    SYMBOLS.iter().find(|s| s.name == name).map(|s| s.glyph)
}

/// Reverse lookup, used to highlight the selected symbol button
pub fn name_for(glyph: &str) -> Option<&'static str> {
    SYMBOLS.iter().find(|s| s.glyph == glyph).map(|s| s.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_has_eight_unique_entries() {
        assert_eq!(SYMBOLS.len(), 8);
        for (i, a) in SYMBOLS.iter().enumerate() {
            for b in &SYMBOLS[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.glyph, b.glyph);
            }
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(glyph_for("music"), Some("♪"));
        assert_eq!(glyph_for("heart"), Some("<3"));
        assert_eq!(glyph_for("rocket"), None);
        assert_eq!(name_for(":)"), Some("smile"));
        assert_eq!(name_for("?"), None);
    }
}
