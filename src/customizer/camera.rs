use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::lighting;
use crate::ui::CustomizerSettings;

/// Vertical field of view of the preview camera (degrees)
const FOV_DEGREES: f32 = 50.0;
/// Closest the camera may get to the cube center
const MIN_DISTANCE: f32 = 2.5;
/// Farthest the camera may get from the cube center
const MAX_DISTANCE: f32 = 15.0;
/// Pitch limit, keeps the camera from flipping over the poles
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
/// Initial camera position
const HOME_POSITION: Vec3 = Vec3::new(4.0, 4.0, 4.0);

pub struct PreviewCameraPlugin;

impl Plugin for PreviewCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CameraCommand>()
            .add_systems(Startup, spawn_preview_camera)
            .add_systems(
                Update,
                (orbit_drag, scroll_zoom, handle_camera_commands, apply_orbit).chain(),
            );
    }
}

/// Orbit state of the preview camera around the cube center.
///
/// Panning is intentionally absent; the target never moves.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(HOME_POSITION)
    }
}

impl OrbitCamera {
    /// Orbit that places the camera at `position`, looking at the origin
    pub fn looking_from(position: Vec3) -> Self {
        let distance = position.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let dir = position.normalize_or(Vec3::Z);
        Self {
            yaw: dir.x.atan2(dir.z),
            pitch: dir.y.asin().clamp(-MAX_PITCH, MAX_PITCH),
            distance,
        }
    }

    /// Camera transform for this orbit
    pub fn transform(&self) -> Transform {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance;
        Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y)
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Scale the distance by `factor` (< 1 moves closer)
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// Buttons under the 3D preview
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCommand {
    ResetView,
    ZoomIn,
    ZoomOut,
}

/// Uniform studio environment so the metallic finish has something to reflect
pub fn studio_environment(images: &mut Assets<Image>) -> EnvironmentMapLight {
    EnvironmentMapLight {
        intensity: lighting::ENVIRONMENT_INTENSITY,
        ..EnvironmentMapLight::solid_color(images, lighting::ENVIRONMENT_COLOR)
    }
}

fn spawn_preview_camera(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let orbit = OrbitCamera::default();
    let environment = studio_environment(&mut images);
    commands.spawn((
        Name::new("Preview Camera"),
        orbit,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            ..default()
        }),
        orbit.transform(),
        AmbientLight {
            color: Color::WHITE,
            brightness: lighting::AMBIENT_BRIGHTNESS,
            affects_lightmapped_meshes: true,
        },
        environment,
    ));
}

/// Rotate around the cube with left mouse drag
fn orbit_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    settings: Res<CustomizerSettings>,
    mut query: Query<&mut OrbitCamera>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.pressed(MouseButton::Left) {
        return;
    }

    // Don't orbit while dragging a slider or other widget
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let delta = mouse_motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    for mut orbit in &mut query {
        orbit.rotate(
            -delta.x * settings.orbit_sensitivity,
            delta.y * settings.orbit_sensitivity,
        );
    }
}

/// Scroll wheel dollies the camera toward / away from the cube
fn scroll_zoom(
    scroll: Res<AccumulatedMouseScroll>,
    settings: Res<CustomizerSettings>,
    mut query: Query<&mut OrbitCamera>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let scroll_y = scroll.delta.y;
    if scroll_y == 0.0 {
        return;
    }

    for mut orbit in &mut query {
        orbit.zoom((1.0 - settings.zoom_speed).powf(scroll_y.signum()));
    }
}

fn handle_camera_commands(
    mut events: MessageReader<CameraCommand>,
    settings: Res<CustomizerSettings>,
    mut query: Query<&mut OrbitCamera>,
) {
    for command in events.read() {
        for mut orbit in &mut query {
            match command {
                CameraCommand::ResetView => *orbit = OrbitCamera::default(),
                CameraCommand::ZoomIn => orbit.zoom(1.0 - settings.zoom_speed),
                CameraCommand::ZoomOut => orbit.zoom(1.0 / (1.0 - settings.zoom_speed)),
            }
        }
    }
}

fn apply_orbit(mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (orbit, mut transform) in &mut query {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_starts_at_home_position() {
        let transform = OrbitCamera::default().transform();
        assert!((transform.translation - HOME_POSITION).length() < 1e-4);
        let forward = transform.forward().as_vec3();
        assert!((forward + HOME_POSITION.normalize()).length() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..100 {
            orbit.zoom(0.5);
        }
        assert_eq!(orbit.distance, MIN_DISTANCE);
        for _ in 0..100 {
            orbit.zoom(2.0);
        }
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }

    #[test]
    fn pitch_never_flips() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate(0.0, 10.0);
        assert_eq!(orbit.pitch, MAX_PITCH);
        orbit.rotate(0.0, -20.0);
        assert_eq!(orbit.pitch, -MAX_PITCH);
        assert!(orbit.transform().translation.is_finite());
    }

    #[test]
    fn studio_environment_is_generated() {
        let mut images = Assets::<Image>::default();
        let environment = studio_environment(&mut images);
        assert_eq!(environment.intensity, lighting::ENVIRONMENT_INTENSITY);
        assert!(images.get(&environment.diffuse_map).is_some());
        assert!(images.get(&environment.specular_map).is_some());
    }

    #[test]
    fn camera_always_looks_at_the_cube() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate(1.3, -0.4);
        let transform = orbit.transform();
        let to_center = (-transform.translation).normalize();
        assert!((transform.forward().as_vec3() - to_center).length() < 1e-4);
    }
}
