//! Standalone engraved cube customizer.

use bevy::prelude::*;
use engraved_cube::CustomizerPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Engraved Cube Customizer".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CustomizerPlugin)
        .run();
}
