use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::settings::{CustomizerSettings, SettingsWindowState};
use super::theme::colors;
use crate::config::symbols::SYMBOLS;
use crate::config::{
    CubeMaterial, Customizer, CustomizerAction, EngravingConfiguration, EngravingMode, FontFamily,
    OrderRequested, Surface,
};
use crate::constants::{engraving, PRICE_LABEL};
use crate::customizer::CameraCommand;
use crate::fonts::{FontLibrary, FontLoadStatus, FontTable};

/// Width of the customizer side panel
const PANEL_WIDTH: f32 = 340.0;

pub struct CustomizerPanelPlugin;

impl Plugin for CustomizerPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_customizer_panel);
    }
}

/// What a widget asked for during one frame.
///
/// Widgets never touch the configuration; the panel system turns these into
/// messages after the UI pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelIntent {
    Customize(CustomizerAction),
    Order,
    Camera(CameraCommand),
    OpenSettings,
}

/// Fonts worth mentioning in the panel (still loading or broken)
pub fn font_status_lines(table: &FontTable, library: &FontLibrary) -> Vec<(FontFamily, FontLoadStatus)> {
    FontFamily::ALL
        .into_iter()
        .map(|family| (family, library.status(&table.resolve(family))))
        .filter(|(_, status)| matches!(status, FontLoadStatus::Loading | FontLoadStatus::Failed))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn draw_customizer_panel(
    mut contexts: EguiContexts,
    customizer: Res<Customizer>,
    settings: Res<CustomizerSettings>,
    library: Res<FontLibrary>,
    mut settings_window: ResMut<SettingsWindowState>,
    mut actions: MessageWriter<CustomizerAction>,
    mut orders: MessageWriter<OrderRequested>,
    mut camera: MessageWriter<CameraCommand>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let statuses = font_status_lines(&settings.fonts, &library);
    let mut intents = Vec::new();

    egui::SidePanel::right("customizer_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                customizer_ui(ui, customizer.config(), &statuses, &mut intents);
            });
        });

    egui::TopBottomPanel::bottom("preview_controls")
        .show_separator_line(false)
        .show(ctx, |ui| preview_controls(ui, &mut intents));

    for intent in intents {
        match intent {
            PanelIntent::Customize(action) => {
                actions.write(action);
            }
            PanelIntent::Order => {
                orders.write(OrderRequested);
            }
            PanelIntent::Camera(command) => {
                camera.write(command);
            }
            PanelIntent::OpenSettings => settings_window.open = true,
        }
    }

    Ok(())
}

/// The "Customize Your Own Cube" card
pub fn customizer_ui(
    ui: &mut egui::Ui,
    config: &EngravingConfiguration,
    font_statuses: &[(FontFamily, FontLoadStatus)],
    intents: &mut Vec<PanelIntent>,
) {
    ui.horizontal(|ui| {
        ui.heading("Customize Your Own Cube");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("⚙").on_hover_text("Settings").clicked() {
                intents.push(PanelIntent::OpenSettings);
            }
        });
    });
    ui.colored_label(
        colors::TEXT_SECONDARY,
        "Add text or a logo to each side of the cube",
    );
    ui.add_space(8.0);

    for surface in Surface::ALL {
        surface_editor(ui, config, surface, intents);
        ui.add_space(6.0);
    }

    ui.separator();
    font_size_slider(ui, config.font_size(), intents);

    ui.separator();
    ui.label(egui::RichText::new("Material").strong());
    ui.horizontal_wrapped(|ui| {
        for material in CubeMaterial::ALL {
            material_button(ui, material, config.material() == material, intents);
        }
    });

    ui.add_space(4.0);
    ui.label(egui::RichText::new("Font").strong());
    ui.horizontal_wrapped(|ui| {
        for family in FontFamily::ALL {
            if ui
                .selectable_label(config.font() == family, family.label())
                .clicked()
            {
                intents.push(PanelIntent::Customize(CustomizerAction::SetFont(family)));
            }
        }
    });
    for (family, status) in font_statuses {
        match status {
            FontLoadStatus::Loading => {
                ui.colored_label(colors::STATUS_LOADING, format!("Loading {}…", family.label()));
            }
            FontLoadStatus::Failed => {
                ui.colored_label(
                    colors::STATUS_ERROR,
                    format!("{} is unavailable, engravings are hidden", family.label()),
                );
            }
            _ => {}
        }
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(PRICE_LABEL).size(22.0).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Reset").clicked() {
                intents.push(PanelIntent::Customize(CustomizerAction::Reset));
            }
            let add_to_cart = egui::Button::new(
                egui::RichText::new("Add to Cart").color(colors::ACCENT_TEXT),
            )
            .fill(colors::ACCENT);
            if ui.add(add_to_cart).clicked() {
                intents.push(PanelIntent::Order);
            }
        });
    });
}

fn surface_editor(
    ui: &mut egui::Ui,
    config: &EngravingConfiguration,
    surface: Surface,
    intents: &mut Vec<PanelIntent>,
) {
    let engraving = config.surface(surface);

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(surface.label()).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Right-to-left, so Logo first
            for mode in [EngravingMode::Symbol, EngravingMode::Text] {
                if ui.selectable_label(engraving.mode == mode, mode.label()).clicked()
                    && engraving.mode != mode
                {
                    intents.push(PanelIntent::Customize(CustomizerAction::SetSurfaceMode {
                        surface,
                        mode,
                    }));
                }
            }
        });
    });

    match engraving.mode {
        EngravingMode::Text => {
            let mut text = engraving.text.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .id_salt(("engraving_text", surface.index()))
                    .char_limit(engraving::MAX_CHARACTERS)
                    .hint_text(format!("Text for side {}", surface.number()))
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                intents.push(PanelIntent::Customize(CustomizerAction::SetSurfaceContent {
                    surface,
                    text,
                }));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.colored_label(colors::TEXT_MUTED, config.character_indicator(surface));
            });
        }
        EngravingMode::Symbol => {
            egui::Grid::new(("symbol_grid", surface.index()))
                .num_columns(4)
                .spacing([6.0, 6.0])
                .show(ui, |ui| {
                    for (i, symbol) in SYMBOLS.iter().enumerate() {
                        let selected = engraving.symbol == symbol.glyph;
                        let button = egui::Button::new(egui::RichText::new(symbol.glyph).size(16.0))
                            .selected(selected)
                            .min_size(egui::vec2(64.0, 32.0));
                        if ui.add(button).on_hover_text(symbol.name).clicked() && !selected {
                            intents.push(PanelIntent::Customize(CustomizerAction::SetSurfaceSymbol {
                                surface,
                                glyph: symbol.glyph.to_string(),
                            }));
                        }
                        if i % 4 == 3 {
                            ui.end_row();
                        }
                    }
                });
        }
    }
}

fn font_size_slider(ui: &mut egui::Ui, current: f32, intents: &mut Vec<PanelIntent>) {
    ui.label(egui::RichText::new("Font Size").strong());
    let mut size = current;
    let response = ui.add(
        egui::Slider::new(&mut size, engraving::MIN_FONT_SIZE..=engraving::MAX_FONT_SIZE)
            .step_by(f64::from(engraving::FONT_SIZE_STEP))
            .show_value(false),
    );
    if response.changed() && size != current {
        intents.push(PanelIntent::Customize(CustomizerAction::SetFontSize(size)));
    }
    ui.horizontal(|ui| {
        ui.colored_label(colors::TEXT_MUTED, "Small");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(colors::TEXT_MUTED, "Large");
        });
    });
}

fn material_button(
    ui: &mut egui::Ui,
    material: CubeMaterial,
    selected: bool,
    intents: &mut Vec<PanelIntent>,
) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
        let [r, g, b] = material.rgb();
        ui.painter()
            .circle_filled(rect.center(), 6.0, egui::Color32::from_rgb(r, g, b));
        ui.painter().circle_stroke(
            rect.center(),
            6.0,
            egui::Stroke::new(1.0, colors::WIDGET_BORDER),
        );
        if ui.selectable_label(selected, material.label()).clicked() && !selected {
            intents.push(PanelIntent::Customize(CustomizerAction::SetMaterial(material)));
        }
    });
}

fn preview_controls(ui: &mut egui::Ui, intents: &mut Vec<PanelIntent>) {
    ui.horizontal(|ui| {
        let buttons = [
            ("Reset View", CameraCommand::ResetView),
            ("Zoom In", CameraCommand::ZoomIn),
            ("Zoom Out", CameraCommand::ZoomOut),
        ];
        for (label, command) in buttons {
            if ui.button(label).clicked() {
                intents.push(PanelIntent::Camera(command));
            }
        }
        ui.colored_label(colors::TEXT_MUTED, "Drag to rotate · Scroll to zoom");
    });
}
