use bevy::prelude::*;

use super::engraving::{CubeMaterial, EngravingConfiguration, EngravingMode, FontFamily, Surface};

/// Resource owning the live configuration.
///
/// Systems outside this module only read it; every change goes through a
/// [`CustomizerAction`] so each action produces exactly one
/// [`ConfigurationChanged`] notification.
#[derive(Resource, Debug, Default)]
pub struct Customizer {
    config: EngravingConfiguration,
    /// Incremented once per applied action
    revision: u64,
}

impl Customizer {
    /// Read-only snapshot of the current configuration
    pub fn config(&self) -> &EngravingConfiguration {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a single action. Returns the new revision.
    pub fn apply(&mut self, action: &CustomizerAction) -> u64 {
        let config = &mut self.config;
        let changed = match action {
            CustomizerAction::SetSurfaceContent { surface, text } => {
                config.set_surface_content(*surface, text)
            }
            CustomizerAction::SetSurfaceSymbol { surface, glyph } => {
                config.set_surface_symbol(*surface, glyph)
            }
            CustomizerAction::SetSurfaceMode { surface, mode } => {
                config.set_surface_mode(*surface, *mode)
            }
            CustomizerAction::SetMaterial(material) => config.set_material(*material),
            CustomizerAction::SetFont(font) => config.set_font(*font),
            CustomizerAction::SetFontSize(size) => config.set_font_size(*size),
            CustomizerAction::Reset => {
                let was_default = *config == EngravingConfiguration::default();
                *config = EngravingConfiguration::default();
                !was_default
            }
        };
        self.revision += 1;
        debug!(
            "Applied {:?} (revision {}, changed: {})",
            action, self.revision, changed
        );
        self.revision
    }
}

/// A discrete user action on the configuration
#[derive(Message, Debug, Clone, PartialEq)]
pub enum CustomizerAction {
    SetSurfaceContent { surface: Surface, text: String },
    SetSurfaceSymbol { surface: Surface, glyph: String },
    SetSurfaceMode { surface: Surface, mode: EngravingMode },
    SetMaterial(CubeMaterial),
    SetFont(FontFamily),
    SetFontSize(f32),
    /// Restore the default configuration
    Reset,
}

/// Published once for every applied [`CustomizerAction`]
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationChanged {
    pub revision: u64,
}

/// Event raised by the "Add to Cart" button
#[derive(Message, Debug, Clone, Copy)]
pub struct OrderRequested;

pub struct CustomizerStatePlugin;

impl Plugin for CustomizerStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Customizer>()
            .add_message::<CustomizerAction>()
            .add_message::<ConfigurationChanged>()
            .add_message::<OrderRequested>()
            .add_systems(Startup, announce_initial_configuration)
            .add_systems(
                Update,
                (
                    apply_customizer_actions.in_set(CustomizerSet::ApplyActions),
                    handle_order_requested,
                ),
            );
    }
}

/// Ordering for systems that observe configuration changes
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CustomizerSet {
    ApplyActions,
}

/// The initial configuration counts as a change so the first scene gets built
fn announce_initial_configuration(
    customizer: Res<Customizer>,
    mut changed: MessageWriter<ConfigurationChanged>,
) {
    changed.write(ConfigurationChanged {
        revision: customizer.revision(),
    });
}

/// Apply queued actions in order, one notification per action
fn apply_customizer_actions(
    mut actions: MessageReader<CustomizerAction>,
    mut customizer: ResMut<Customizer>,
    mut changed: MessageWriter<ConfigurationChanged>,
) {
    for action in actions.read() {
        let revision = customizer.apply(action);
        changed.write(ConfigurationChanged { revision });
    }
}

/// Log the order summary (there is no checkout backend)
fn handle_order_requested(mut events: MessageReader<OrderRequested>, customizer: Res<Customizer>) {
    for _ in events.read() {
        info!("Add to cart: {}", customizer.config().summary());
        match ron::to_string(customizer.config()) {
            Ok(serialized) => debug!("Order configuration: {}", serialized),
            Err(e) => warn!("Failed to serialize order configuration: {}", e),
        }
    }
}
