use bevy::prelude::*;
use bevy_egui::{egui, EguiContext, EguiContextSettings, EguiContexts, EguiPrimaryContextPass};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::fonts::FontTable;

/// Application settings that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustomizerSettings {
    /// UI scale factor (1.0 = default)
    pub ui_scale: f32,
    /// Orbit speed in radians per pixel of drag
    pub orbit_sensitivity: f32,
    /// Fraction of the camera distance moved per zoom step
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
    /// Seconds before a pending font load is treated as failed (0 = never)
    #[serde(default = "default_font_load_timeout")]
    pub font_load_timeout_secs: f32,
    /// Font family → glyph resource table
    #[serde(default)]
    pub fonts: FontTable,
}

fn default_zoom_speed() -> f32 {
    0.15
}

fn default_font_load_timeout() -> f32 {
    10.0
}

impl Default for CustomizerSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            orbit_sensitivity: 0.008,
            zoom_speed: default_zoom_speed(),
            font_load_timeout_secs: default_font_load_timeout(),
            fonts: FontTable::default(),
        }
    }
}

impl CustomizerSettings {
    /// Get the settings file path
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("engraved_cube");
            p.push("settings.ron");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_ron(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings, falling back to defaults on malformed content
    pub fn from_ron(content: &str) -> Self {
        match ron::from_str(content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            error!("Could not determine config directory");
            return;
        };

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    error!("Failed to save settings: {}", e);
                } else {
                    info!("Settings saved to: {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize settings: {}", e);
            }
        }
    }
}

/// Resource to track if settings window is open
#[derive(Resource, Default)]
pub struct SettingsWindowState {
    pub open: bool,
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        // Load settings on startup
        let settings = CustomizerSettings::load();
        app.insert_resource(settings)
            .init_resource::<SettingsWindowState>()
            .add_systems(Update, apply_ui_scale)
            .add_systems(EguiPrimaryContextPass, draw_settings_window);
    }
}

/// Apply UI scale to egui
fn apply_ui_scale(
    settings: Res<CustomizerSettings>,
    mut query: Query<&mut EguiContextSettings, With<EguiContext>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut ctx_settings in &mut query {
        ctx_settings.scale_factor = settings.ui_scale;
    }
}

/// Draw the settings window
fn draw_settings_window(
    mut contexts: EguiContexts,
    mut settings: ResMut<CustomizerSettings>,
    mut window_state: ResMut<SettingsWindowState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Settings")
        .open(&mut window_state.open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Interface");
            egui::Grid::new("settings_ui_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("UI Scale:");
                    let response = ui.add(
                        egui::Slider::new(&mut settings.ui_scale, 0.75..=3.0)
                            .step_by(0.25)
                            .suffix("x"),
                    );
                    if response.changed() {
                        settings.save();
                    }
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Camera");
            egui::Grid::new("settings_camera_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Orbit Sensitivity:");
                    let response = ui.add(
                        egui::Slider::new(&mut settings.orbit_sensitivity, 0.002..=0.02)
                            .step_by(0.001),
                    );
                    if response.changed() {
                        settings.save();
                    }
                    ui.end_row();

                    ui.label("Zoom Step:");
                    let response = ui.add(
                        egui::Slider::new(&mut settings.zoom_speed, 0.05..=0.5)
                            .step_by(0.05),
                    );
                    if response.changed() {
                        settings.save();
                    }
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Fonts");
            egui::Grid::new("settings_fonts_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Load Timeout:");
                    let response = ui.add(
                        egui::Slider::new(&mut settings.font_load_timeout_secs, 0.0..=60.0)
                            .step_by(1.0)
                            .custom_formatter(|v, _| {
                                if v == 0.0 {
                                    "Off".to_string()
                                } else {
                                    format!("{:.0}s", v)
                                }
                            }),
                    );
                    if response.changed() {
                        settings.save();
                    }
                    ui.end_row();

                    for (family, owner) in settings.fonts.aliases() {
                        ui.label(format!("{}:", family.label()));
                        ui.weak(format!("uses {} outlines", owner.label()));
                        ui.end_row();
                    }
                });
            ui.weak("Restart to apply font table changes.");
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontFamily;

    #[test]
    fn settings_round_trip() {
        let settings = CustomizerSettings::default();
        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(CustomizerSettings::from_ron(&text), settings);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = CustomizerSettings::from_ron("(ui_scale: 2.0, orbit_sensitivity: 0.01)");
        assert_eq!(settings.ui_scale, 2.0);
        assert_eq!(settings.font_load_timeout_secs, 10.0);
        assert_eq!(
            settings.fonts.resolve(FontFamily::Inter),
            settings.fonts.resolve(FontFamily::Helvetiker)
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let settings = CustomizerSettings::from_ron(
            "(ui_scale: 1.5, orbit_sensitivity: 0.01, asset_dir: \"assets\")",
        );
        assert_eq!(settings.ui_scale, 1.5);
        assert_eq!(settings.fonts, FontTable::default());
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        assert_eq!(
            CustomizerSettings::from_ron("not ron at all"),
            CustomizerSettings::default()
        );
    }
}
