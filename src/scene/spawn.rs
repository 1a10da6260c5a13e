use bevy::prelude::*;

use super::describe::{derive_scene, SceneDescription};
use crate::config::{ConfigurationChanged, Customizer, CustomizerSet, Surface};
use crate::constants::lighting;
use crate::fonts::{FontLibrary, FontLoadSet, GlyphOutlineReady};
use crate::glyph::{build_text_mesh, GlyphError};
use crate::ui::CustomizerSettings;

/// Marker for every entity spawned from a [`SceneDescription`]
#[derive(Component, Default)]
pub struct CubeSceneEntity;

/// Marker for the cube body
#[derive(Component)]
pub struct CubeBody;

/// Extruded text on one surface
#[derive(Component, Debug)]
pub struct EngravingMesh {
    pub surface: Surface,
}

/// Bookkeeping of scene re-derivations
#[derive(Resource, Debug, Default)]
pub struct SceneDerivations {
    /// Number of derivations since startup
    pub count: u64,
    /// The most recent description
    pub last: Option<SceneDescription>,
}

pub struct CubeScenePlugin;

impl Plugin for CubeScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneDerivations>()
            .add_systems(Startup, spawn_lighting)
            .add_systems(
                Update,
                rederive_scene
                    .after(CustomizerSet::ApplyActions)
                    .after(FontLoadSet),
            );
    }
}

fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(ClearColor(lighting::BACKGROUND));
    commands.spawn((
        Name::new("Key Light"),
        DirectionalLight {
            illuminance: lighting::DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(lighting::DIRECTIONAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Rebuild the cube whenever the configuration or a font changed.
///
/// Runs at most once per frame no matter how many notifications arrived.
/// Without mesh/material assets (headless) only the description is recorded.
#[allow(clippy::too_many_arguments)]
fn rederive_scene(
    mut commands: Commands,
    mut changed: MessageReader<ConfigurationChanged>,
    mut fonts_ready: MessageReader<GlyphOutlineReady>,
    customizer: Res<Customizer>,
    settings: Res<CustomizerSettings>,
    library: Res<FontLibrary>,
    existing: Query<Entity, With<CubeSceneEntity>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut derivations: ResMut<SceneDerivations>,
) {
    let notifications = changed.read().count() + fonts_ready.read().count();
    if notifications == 0 {
        return;
    }

    let description = derive_scene(customizer.config(), &settings.fonts, &library);
    derivations.count += 1;
    debug!(
        "Scene derivation #{} ({} engravings)",
        derivations.count,
        description.engravings.len()
    );

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    if let (Some(mut meshes), Some(mut materials)) = (meshes, materials) {
        spawn_description(&mut commands, &description, &library, &mut meshes, &mut materials);
    }

    derivations.last = Some(description);
}

fn spawn_description(
    commands: &mut Commands,
    description: &SceneDescription,
    library: &FontLibrary,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let cuboid = &description.cuboid;
    commands.spawn((
        Name::new("Cube"),
        CubeSceneEntity,
        CubeBody,
        Mesh3d(meshes.add(Cuboid::from_size(cuboid.size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: cuboid.color,
            metallic: cuboid.metallic,
            perceptual_roughness: cuboid.roughness,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    for engraving in &description.engravings {
        let Some(outline) = library.outline(&engraving.font) else {
            continue;
        };
        let mesh = match build_text_mesh(outline, &engraving.content, engraving.size, engraving.depth) {
            Ok(mesh) => mesh,
            Err(GlyphError::EmptyOutline) => {
                debug!("Nothing to engrave on {:?}", engraving.surface);
                continue;
            }
            Err(e) => {
                warn!(
                    "Skipping engraving on {:?} surface: {}",
                    engraving.surface, e
                );
                continue;
            }
        };

        commands.spawn((
            Name::new(format!("Engraving {}", engraving.surface.label())),
            CubeSceneEntity,
            EngravingMesh {
                surface: engraving.surface,
            },
            Mesh3d(meshes.add(mesh.into_mesh())),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: engraving.color,
                metallic: 0.1,
                perceptual_roughness: 0.6,
                ..default()
            })),
            engraving.transform,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CubeMaterial, CustomizerAction, CustomizerStatePlugin, EngravingMode};
    use crate::fonts::{FontLoadingPlugin, FontResource};

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(AssetPlugin {
                watch_for_changes_override: Some(false),
                ..default()
            })
            .add_plugins(CustomizerStatePlugin)
            .add_plugins(FontLoadingPlugin)
            .add_plugins(CubeScenePlugin);
        app
    }

    fn derivations(app: &App) -> u64 {
        app.world().resource::<SceneDerivations>().count
    }

    #[test]
    fn initial_scene_is_derived_once() {
        let mut app = test_app();
        app.update();
        app.update();
        assert_eq!(derivations(&app), 1);

        let last = app.world().resource::<SceneDerivations>().last.clone().unwrap();
        assert_eq!(last.cuboid.color, CubeMaterial::RoseGold.color());
        assert!(last.engravings.is_empty());
    }

    #[test]
    fn each_action_triggers_one_derivation() {
        let mut app = test_app();
        app.update();

        let actions = [
            CustomizerAction::SetMaterial(CubeMaterial::Gold),
            CustomizerAction::SetSurfaceMode {
                surface: Surface::Right,
                mode: EngravingMode::Symbol,
            },
            CustomizerAction::SetFontSize(0.1),
        ];
        for (i, action) in actions.into_iter().enumerate() {
            app.world_mut().write_message(action);
            app.update();
            assert_eq!(derivations(&app), i as u64 + 2);
            app.update();
            assert_eq!(derivations(&app), i as u64 + 2, "idle frame must not redraw");
        }

        let last = app.world().resource::<SceneDerivations>().last.clone().unwrap();
        assert_eq!(last.cuboid.color, CubeMaterial::Gold.color());
    }

    #[test]
    fn font_completion_triggers_one_derivation() {
        let mut app = test_app();
        app.update();
        let before = derivations(&app);

        app.world_mut().write_message(GlyphOutlineReady {
            resource: FontResource::new("fonts/DejaVuSans.ttf"),
            loaded: false,
        });
        app.update();
        assert_eq!(derivations(&app), before + 1);
    }
}
