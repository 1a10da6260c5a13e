//! Font faces and single-line text outlines
//!
//! A [`GlyphOutline`] owns validated font bytes. Outlines are produced on
//! demand with `ttf-parser` and collected into a `lyon` path in font units.

use std::sync::Arc;

use bevy::asset::Asset;
use bevy::reflect::TypePath;
use lyon::math::{point, vector, Transform};
use lyon::path::Path;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::extrude::{extrude_path, ExtrudedMesh};
#[cfg(test)]
use super::extrude::flatten_contours;
use super::GlyphError;
use crate::constants::engraving::CURVE_SEGMENTS;

/// Loaded glyph-outline resource for one font file
#[derive(Asset, TypePath, Clone)]
pub struct GlyphOutline {
    data: Arc<Vec<u8>>,
    units_per_em: f32,
    family_name: Option<String>,
}

impl std::fmt::Debug for GlyphOutline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphOutline")
            .field("bytes", &self.data.len())
            .field("units_per_em", &self.units_per_em)
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl GlyphOutline {
    /// Validate font bytes (TTF/OTF, first face of a collection)
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, GlyphError> {
        let face = Face::parse(&data, 0).map_err(|e| GlyphError::InvalidFont(e.to_string()))?;
        let units_per_em = f32::from(face.units_per_em());
        let family_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
            .find_map(|name| name.to_string());
        Ok(Self {
            data: Arc::new(data),
            units_per_em,
            family_name,
        })
    }

    /// Outline with no font data, for tests that only track load state
    #[cfg(test)]
    pub(crate) fn stub(units_per_em: f32) -> Self {
        Self {
            data: Arc::new(Vec::new()),
            units_per_em,
            family_name: None,
        }
    }

    pub fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    /// Family name recorded in the font's name table
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    fn face(&self) -> Result<Face<'_>, GlyphError> {
        Face::parse(&self.data, 0).map_err(|e| GlyphError::InvalidFont(e.to_string()))
    }

    /// Lay `text` out on one line starting at the origin, in font units.
    ///
    /// Characters the font lacks are drawn with its `.notdef` glyph.
    pub fn text_path(&self, text: &str) -> Result<Path, GlyphError> {
        let face = self.face()?;
        let mut sink = PathSink::default();
        let mut pen_x = 0.0;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
            if let Some(prev) = previous {
                pen_x += f32::from(kerning(&face, prev, glyph));
            }
            sink.offset_x = pen_x;
            // Whitespace has no outline; that is not an error
            face.outline_glyph(glyph, &mut sink);
            sink.finish_contour();
            pen_x += f32::from(face.glyph_hor_advance(glyph).unwrap_or(0));
            previous = Some(glyph);
        }

        Ok(sink.builder.build())
    }
}

fn kerning(face: &Face<'_>, left: GlyphId, right: GlyphId) -> i16 {
    let Some(kern) = face.tables().kern else {
        return 0;
    };
    kern.subtables
        .into_iter()
        .filter(|st| st.horizontal && !st.variable)
        .find_map(|st| st.glyphs_kerning(left, right))
        .unwrap_or(0)
}

/// Collects ttf-parser outline callbacks into a lyon path
struct PathSink {
    builder: lyon::path::path::Builder,
    offset_x: f32,
    open: bool,
}

impl Default for PathSink {
    fn default() -> Self {
        Self {
            builder: Path::builder(),
            offset_x: 0.0,
            open: false,
        }
    }
}

impl PathSink {
    fn finish_contour(&mut self) {
        if self.open {
            self.builder.end(true);
            self.open = false;
        }
    }

    fn p(&self, x: f32, y: f32) -> lyon::math::Point {
        point(x + self.offset_x, y)
    }
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish_contour();
        let at = self.p(x, y);
        self.builder.begin(at);
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.p(x, y);
        self.builder.line_to(to);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ctrl = self.p(x1, y1);
        let to = self.p(x, y);
        self.builder.quadratic_bezier_to(ctrl, to);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let ctrl1 = self.p(x1, y1);
        let ctrl2 = self.p(x2, y2);
        let to = self.p(x, y);
        self.builder.cubic_bezier_to(ctrl1, ctrl2, to);
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}

/// Curve flattening tolerance for text of the given size (world units).
///
/// Roughly matches splitting a quarter-em curve into [`CURVE_SEGMENTS`] pieces.
pub fn curve_tolerance(size: f32) -> f32 {
    (size * 0.25 / CURVE_SEGMENTS as f32).max(1e-5)
}

/// Scale a font-unit path to `size` world units per em and center it on the
/// origin (x/y of the bounding box).
pub fn normalize_path(path: Path, units_per_em: f32, size: f32) -> Path {
    let scale = size / units_per_em.max(1.0);
    let scaled = path.transformed(&Transform::scale(scale, scale));
    let Some((min_x, min_y, max_x, max_y)) = path_bounds(&scaled) else {
        return scaled;
    };
    let center = vector((min_x + max_x) * 0.5, (min_y + max_y) * 0.5);
    scaled.transformed(&Transform::translation(-center.x, -center.y))
}

/// Bounds of a path's segment endpoints
fn path_bounds(path: &Path) -> Option<(f32, f32, f32, f32)> {
    let mut points = path.iter().flat_map(|event| {
        let (a, b) = (event.from(), event.to());
        [a, b]
    });
    let first = points.next()?;
    Some(points.fold(
        (first.x, first.y, first.x, first.y),
        |(min_x, min_y, max_x, max_y), p| (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
    ))
}

/// Build the extruded mesh for a line of engraved text.
///
/// The result is centered on the origin in x/y and spans `z = 0..depth`,
/// so placing it on a face plane makes the text stand out of the surface.
pub fn build_text_mesh(
    outline: &GlyphOutline,
    text: &str,
    size: f32,
    depth: f32,
) -> Result<ExtrudedMesh, GlyphError> {
    let path = outline.text_path(text)?;
    let path = normalize_path(path, outline.units_per_em(), size);
    let mut mesh = extrude_path(&path, depth, curve_tolerance(size))?;
    // Flattened curves can sit inside the outline's bounds
    mesh.center_xy();
    Ok(mesh)
}
