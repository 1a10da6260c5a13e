mod panel;
mod settings;
mod theme;

pub use panel::*;
pub use settings::*;
pub use theme::*;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SettingsPlugin)
            .add_plugins(ThemePlugin)
            .add_plugins(CustomizerPanelPlugin);
    }
}
