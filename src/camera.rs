//! Perspective orbit camera around Earth.
//!
//! Left-drag orbits, the scroll wheel zooms. Both are damped: input moves
//! the target angles and distance, and the camera eases toward them each
//! frame. Input is ignored while egui owns the pointer.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 50.0;

/// Near clip plane in render units.
pub const NEAR_PLANE: f32 = 1.0;

/// Far clip plane in render units.
pub const FAR_PLANE: f32 = 2.0e7;

/// Initial camera position.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 2.0e6, 6.0e6);

/// Fraction of the remaining way to the target covered per frame.
pub const DAMPING: f32 = 0.06;

/// Closest allowed distance to the origin.
pub const MIN_DISTANCE: f32 = 30_000.0;

/// Farthest allowed distance to the origin.
pub const MAX_DISTANCE: f32 = 1.0e8;

/// Radians of orbit per pixel of drag.
pub const ORBIT_SPEED: f32 = 0.005;

/// Relative zoom per scroll line.
pub const ZOOM_SPEED: f32 = 0.1;

/// Keep the camera off the poles so `looking_at` stays well defined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Whether egui wants the pointer this frame. Written by the UI.
#[derive(Resource, Default, Debug)]
pub struct PointerCapture {
    pub egui_wants_pointer: bool,
}

/// Logical size of the primary window's viewport.
#[derive(Resource, Debug)]
pub struct ViewportSize {
    pub logical: Vec2,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            logical: Vec2::new(1280.0, 720.0),
        }
    }
}

/// Spherical camera state around the origin.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub target_distance: f32,
}

impl OrbitCamera {
    /// Orbit state that places the camera at `position`.
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let yaw = position.x.atan2(position.z);
        let pitch = (position.y / position.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            yaw,
            pitch,
            distance,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
        }
    }

    /// Current camera position.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Queue a drag of `delta` pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.target_yaw -= delta.x * ORBIT_SPEED;
        self.target_pitch =
            (self.target_pitch + delta.y * ORBIT_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Queue a zoom of `lines` scroll lines. Positive zooms in.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - lines * ZOOM_SPEED).max(0.1);
        self.target_distance = (self.target_distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Ease toward the targets by one frame.
    pub fn step(&mut self) {
        self.yaw = damp(self.yaw, self.target_yaw, DAMPING);
        self.pitch = damp(self.pitch, self.target_pitch, DAMPING);
        self.distance = damp(self.distance, self.target_distance, DAMPING);
    }
}

/// Move `current` a `factor` of the way toward `target`.
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerCapture>()
            .init_resource::<ViewportSize>()
            .add_systems(Startup, (setup_camera, init_viewport_size))
            .add_systems(
                Update,
                (track_viewport_size, camera_input, apply_orbit).chain(),
            );
    }
}

/// Spawn the main camera with perspective projection.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::from_position(INITIAL_POSITION),
        MainCamera,
    ));
}

fn init_viewport_size(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    if let Ok(window) = window_query.single() {
        viewport.logical = Vec2::new(window.width(), window.height());
    }
}

/// Keep [`ViewportSize`] in step with the window. The projection's aspect
/// ratio is updated by Bevy itself.
fn track_viewport_size(
    mut resized: MessageReader<WindowResized>,
    mut viewport: ResMut<ViewportSize>,
) {
    if let Some(last) = resized.read().last() {
        viewport.logical = Vec2::new(last.width, last.height);
    }
}

/// Left-drag to orbit, scroll to zoom.
fn camera_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    capture: Res<PointerCapture>,
    mut camera_query: Query<&mut OrbitCamera, With<MainCamera>>,
) {
    if capture.egui_wants_pointer {
        return;
    }
    let Ok(mut orbit) = camera_query.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        orbit.orbit(mouse_motion.delta);
    }
    if mouse_scroll.delta.y != 0.0 {
        orbit.zoom(mouse_scroll.delta.y);
    }
}

fn apply_orbit(mut camera_query: Query<(&mut OrbitCamera, &mut Transform), With<MainCamera>>) {
    for (mut orbit, mut transform) in &mut camera_query {
        orbit.step();
        *transform = Transform::from_translation(orbit.position()).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_from_position_round_trips_initial_view() {
        let orbit = OrbitCamera::from_position(INITIAL_POSITION);
        let position = orbit.position();
        assert_relative_eq!(position.x, 0.0, epsilon = 1.0);
        assert_relative_eq!(position.y, 2.0e6, max_relative = 1e-5);
        assert_relative_eq!(position.z, 6.0e6, max_relative = 1e-5);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut orbit = OrbitCamera::from_position(INITIAL_POSITION);
        for _ in 0..200 {
            orbit.zoom(5.0);
        }
        assert_eq!(orbit.target_distance, MIN_DISTANCE);
        for _ in 0..500 {
            orbit.zoom(-5.0);
        }
        assert_eq!(orbit.target_distance, MAX_DISTANCE);
    }

    #[test]
    fn test_step_eases_toward_target() {
        let mut orbit = OrbitCamera::from_position(INITIAL_POSITION);
        let start = orbit.distance;
        orbit.target_distance = start * 2.0;
        orbit.step();
        assert_relative_eq!(orbit.distance, start * (1.0 + DAMPING), max_relative = 1e-6);
        assert!(orbit.distance < orbit.target_distance);
    }

    #[test]
    fn test_orbit_pitch_is_limited() {
        let mut orbit = OrbitCamera::from_position(INITIAL_POSITION);
        orbit.orbit(Vec2::new(0.0, 1.0e6));
        assert!(orbit.target_pitch <= PITCH_LIMIT);
        orbit.orbit(Vec2::new(0.0, -1.0e7));
        assert!(orbit.target_pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn test_damp() {
        assert_eq!(damp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(damp(3.0, 3.0, DAMPING), 3.0);
    }
}
