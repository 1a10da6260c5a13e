//! Pure derivation of the drawable scene from a configuration

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use crate::config::{EngravingConfiguration, Surface};
use crate::constants::{cube, engraving};
use crate::fonts::{FontLibrary, FontResource, FontTable};

/// The cube body
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidSpec {
    pub size: Vec3,
    pub color: Color,
    pub metallic: f32,
    pub roughness: f32,
}

/// Extruded text on one surface
#[derive(Debug, Clone, PartialEq)]
pub struct EngravingSpec {
    pub surface: Surface,
    pub content: String,
    pub font: FontResource,
    /// World units per em
    pub size: f32,
    pub depth: f32,
    pub color: Color,
    /// Places the text's local +Z along the surface normal
    pub transform: Transform,
}

/// Everything the rendering surface needs to draw the cube
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub cuboid: CuboidSpec,
    pub engravings: Vec<EngravingSpec>,
}

/// Transform of a surface's engraving plane.
///
/// The plane sits just outside the face and is rotated so local +Z points
/// along the outward normal.
pub fn surface_transform(surface: Surface) -> Transform {
    let d = cube::ENGRAVING_OFFSET;
    let (translation, yaw) = match surface {
        Surface::Front => (Vec3::new(0.0, 0.0, d), 0.0),
        Surface::Right => (Vec3::new(d, 0.0, 0.0), FRAC_PI_2),
        Surface::Back => (Vec3::new(0.0, 0.0, -d), PI),
        Surface::Left => (Vec3::new(-d, 0.0, 0.0), -FRAC_PI_2),
    };
    Transform::from_translation(translation).with_rotation(Quat::from_rotation_y(yaw))
}

/// Font resources the configuration needs that were never requested
pub fn fonts_to_request(
    config: &EngravingConfiguration,
    table: &FontTable,
    library: &FontLibrary,
) -> Vec<FontResource> {
    let has_content = config
        .surfaces()
        .any(|(_, engraving)| !engraving.active_content().is_empty());
    if !has_content {
        return Vec::new();
    }
    let resource = table.resolve(config.font());
    if library.state(&resource).is_some() {
        return Vec::new();
    }
    vec![resource]
}

/// Derive the scene for a configuration.
///
/// Surfaces with empty content, or whose font is not loaded (still loading or
/// failed), get no overlay. The cuboid is always present.
pub fn derive_scene(
    config: &EngravingConfiguration,
    table: &FontTable,
    library: &FontLibrary,
) -> SceneDescription {
    let material = config.material();
    let cuboid = CuboidSpec {
        size: Vec3::splat(cube::EDGE),
        color: material.color(),
        metallic: cube::METALLIC,
        roughness: cube::ROUGHNESS,
    };

    let font = table.resolve(config.font());
    let font_ready = library.outline(&font).is_some();

    let engravings = config
        .surfaces()
        .filter(|_| font_ready)
        .filter_map(|(surface, engraving)| {
            let content = engraving.active_content();
            if content.is_empty() {
                return None;
            }
            Some(EngravingSpec {
                surface,
                content: content.to_string(),
                font: font.clone(),
                size: config.font_size(),
                depth: engraving::DEPTH,
                color: engraving::TEXT_COLOR,
                transform: surface_transform(surface),
            })
        })
        .collect();

    SceneDescription { cuboid, engravings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CubeMaterial, EngravingMode, FontFamily};
    use crate::fonts::FontLoadError;
    use crate::glyph::GlyphOutline;

    fn loaded_library(table: &FontTable, family: FontFamily) -> FontLibrary {
        let mut library = FontLibrary::default();
        let key = table.resolve(family);
        library.begin(&key);
        library.complete(&key, Ok(GlyphOutline::stub(1000.0)));
        library
    }

    #[test]
    fn default_configuration_is_a_bare_rose_gold_cube() {
        let table = FontTable::default();
        let scene = derive_scene(
            &EngravingConfiguration::default(),
            &table,
            &loaded_library(&table, FontFamily::Helvetiker),
        );
        assert_eq!(scene.cuboid.color, Color::srgb_u8(0xE8, 0xB4, 0xA0));
        assert_eq!(scene.cuboid.size, Vec3::splat(2.0));
        assert_eq!(scene.cuboid.metallic, 0.8);
        assert_eq!(scene.cuboid.roughness, 0.2);
        assert!(scene.engravings.is_empty());
    }

    #[test]
    fn loaded_font_places_text_on_each_surface() {
        let table = FontTable::default();
        let library = loaded_library(&table, FontFamily::Helvetiker);
        let mut config = EngravingConfiguration::default();
        config.set_surface_content(Surface::Front, "HELLOWORLD!");
        config.set_surface_mode(Surface::Right, EngravingMode::Symbol);
        config.set_surface_symbol(Surface::Right, "♪");
        config.set_surface_content(Surface::Left, "ANNA");

        let scene = derive_scene(&config, &table, &library);
        let surfaces: Vec<_> = scene.engravings.iter().map(|e| e.surface).collect();
        assert_eq!(surfaces, vec![Surface::Front, Surface::Right, Surface::Left]);
        assert_eq!(scene.engravings[0].content, "HELLOWORLD");
        assert_eq!(scene.engravings[1].content, "♪");
        assert_eq!(scene.engravings[0].size, 0.15);
        assert_eq!(scene.engravings[0].depth, 0.02);
    }

    #[test]
    fn engravings_face_outward_just_off_the_surface() {
        for surface in Surface::ALL {
            let transform = surface_transform(surface);
            let normal = transform.rotation * Vec3::Z;
            let along = transform.translation.dot(normal);
            assert!((along - 1.01).abs() < 1e-5, "{surface:?} offset {along}");
            assert!(transform.translation.cross(normal).length() < 1e-5);
            assert!(normal.y.abs() < 1e-6, "{surface:?} must be a vertical face");
        }
        let front = surface_transform(Surface::Front).rotation * Vec3::Z;
        let right = surface_transform(Surface::Right).rotation * Vec3::Z;
        assert!((front - Vec3::Z).length() < 1e-5);
        assert!((right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn failed_font_degrades_to_bare_cube() {
        let table = FontTable::default();
        let mut library = FontLibrary::default();
        let key = table.resolve(FontFamily::Helvetiker);
        library.begin(&key);
        library.complete(
            &key,
            Err(FontLoadError::Load {
                path: key.to_string(),
                message: "missing".to_string(),
            }),
        );

        let mut config = EngravingConfiguration::default();
        for surface in Surface::ALL {
            config.set_surface_content(surface, "TEXT");
        }
        let scene = derive_scene(&config, &table, &library);
        assert_eq!(scene.cuboid.color, CubeMaterial::RoseGold.color());
        assert!(scene.engravings.is_empty());
        assert!(fonts_to_request(&config, &table, &library).is_empty());
    }

    #[test]
    fn loading_font_shows_no_text() {
        let table = FontTable::default();
        let mut library = FontLibrary::default();
        library.begin(&table.resolve(FontFamily::Helvetiker));
        let mut config = EngravingConfiguration::default();
        config.set_surface_content(Surface::Back, "X");
        assert!(derive_scene(&config, &table, &library).engravings.is_empty());
    }

    #[test]
    fn derivation_is_idempotent() {
        let table = FontTable::default();
        let library = loaded_library(&table, FontFamily::Helvetiker);
        let mut config = EngravingConfiguration::default();
        config.set_material(CubeMaterial::Black);
        config.set_surface_content(Surface::Back, "2024");
        config.set_font_size(0.2);

        let first = derive_scene(&config, &table, &library);
        let second = derive_scene(&config, &table, &library);
        assert_eq!(first, second);
    }

    #[test]
    fn aliased_family_shares_loaded_outline() {
        let table = FontTable::default();
        let library = loaded_library(&table, FontFamily::Helvetiker);
        let mut config = EngravingConfiguration::default();
        config.set_font(FontFamily::Inter);
        config.set_surface_content(Surface::Front, "HI");
        assert_eq!(derive_scene(&config, &table, &library).engravings.len(), 1);
        assert!(fonts_to_request(&config, &table, &library).is_empty());
    }

    #[test]
    fn fonts_are_requested_only_for_visible_content() {
        let table = FontTable::default();
        let library = FontLibrary::default();
        let mut config = EngravingConfiguration::default();
        assert!(fonts_to_request(&config, &table, &library).is_empty());

        // Text in the inactive slot does not count
        config.set_surface_content(Surface::Front, "HIDDEN");
        config.set_surface_mode(Surface::Front, EngravingMode::Symbol);
        assert!(fonts_to_request(&config, &table, &library).is_empty());

        config.set_font(FontFamily::Optimer);
        config.set_surface_symbol(Surface::Front, "*");
        assert_eq!(
            fonts_to_request(&config, &table, &library),
            vec![FontResource::new("fonts/DejaVuSansCondensed.ttf")]
        );
    }
}
