use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Resource to track if theme has been applied
#[derive(Resource, Default)]
pub struct ThemeApplied(pub bool);

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemeApplied>()
            .add_systems(Update, apply_storefront_theme);
    }
}

/// Light storefront palette
pub mod colors {
    use bevy_egui::egui::Color32;

    // Backgrounds
    pub const BG_CARD: Color32 = Color32::from_rgba_premultiplied(252, 251, 250, 250);
    pub const BG_INPUT: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BG_MUTED: Color32 = Color32::from_rgb(243, 241, 239);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(28, 25, 23);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(87, 83, 78);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(140, 134, 128);

    // Accent (selected buttons, primary call to action)
    pub const ACCENT: Color32 = Color32::from_rgb(24, 24, 27);
    pub const ACCENT_TEXT: Color32 = Color32::from_rgb(250, 250, 250);

    // Widget colors
    pub const WIDGET_BG: Color32 = Color32::from_rgb(245, 244, 242);
    pub const WIDGET_BG_HOVER: Color32 = Color32::from_rgb(231, 229, 226);
    pub const WIDGET_BG_ACTIVE: Color32 = Color32::from_rgb(214, 211, 207);
    pub const WIDGET_BORDER: Color32 = Color32::from_rgb(214, 211, 207);

    // Status colors
    pub const STATUS_LOADING: Color32 = Color32::from_rgb(180, 130, 40);
    pub const STATUS_ERROR: Color32 = Color32::from_rgb(200, 60, 60);
}

/// Apply the storefront theme to egui
fn apply_storefront_theme(mut contexts: EguiContexts, mut theme_applied: ResMut<ThemeApplied>) {
    if theme_applied.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);

    // Rounding (corner radius)
    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    // Window styling
    style.visuals.window_fill = colors::BG_CARD;
    style.visuals.window_stroke = egui::Stroke::new(1.0, colors::WIDGET_BORDER);
    style.visuals.panel_fill = colors::BG_CARD;

    // Widget backgrounds
    style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_SECONDARY);
    style.visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, colors::WIDGET_BORDER);

    style.visuals.widgets.inactive.bg_fill = colors::WIDGET_BG;
    style.visuals.widgets.inactive.weak_bg_fill = colors::WIDGET_BG;
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, colors::WIDGET_BORDER);

    style.visuals.widgets.hovered.bg_fill = colors::WIDGET_BG_HOVER;
    style.visuals.widgets.hovered.weak_bg_fill = colors::WIDGET_BG_HOVER;
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, colors::TEXT_MUTED);

    style.visuals.widgets.active.bg_fill = colors::WIDGET_BG_ACTIVE;
    style.visuals.widgets.active.weak_bg_fill = colors::WIDGET_BG_ACTIVE;

    // Selected toggle buttons read as filled dark chips
    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, colors::ACCENT_TEXT);

    // Text fields
    style.visuals.extreme_bg_color = colors::BG_INPUT;
    style.visuals.faint_bg_color = colors::BG_MUTED;

    ctx.set_style(style);
    theme_applied.0 = true;

    info!("Applied storefront theme");
}
