use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use super::camera::PreviewCameraPlugin;
use crate::config::CustomizerStatePlugin;
use crate::fonts::FontLoadingPlugin;
use crate::scene::CubeScenePlugin;
use crate::ui::UiPlugin;

/// Main plugin that bundles the whole customizer
pub struct CustomizerPlugin;

impl Plugin for CustomizerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Third-party plugins
            .add_plugins(EguiPlugin::default())
            // UI first: it loads the settings the font loader reads
            .add_plugins(UiPlugin)
            // Customizer core
            .add_plugins(CustomizerStatePlugin)
            .add_plugins(FontLoadingPlugin)
            .add_plugins(CubeScenePlugin)
            .add_plugins(PreviewCameraPlugin);
    }
}
