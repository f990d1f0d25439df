//! Click-to-select for asteroid markers.
//!
//! A click is turned into normalised device coordinates, unprojected into
//! a world-space ray and tested against every marker sphere. Trails are
//! never tested. The nearest hit wins; a miss leaves the selection as it
//! was.

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{MainCamera, PointerCapture, ViewportSize};
use crate::neo::SelectionDetail;
use crate::registry::{NeoBody, NeoMarker, SelectedNeo};

/// Sent when the user picks an asteroid.
#[derive(Message, Clone, Debug)]
pub struct NeoSelected {
    pub entity: Entity,
    pub detail: SelectionDetail,
}

/// Plugin providing click picking.
pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NeoSelected>()
            .add_systems(Update, (pick_on_click, log_selection).chain());
    }
}

/// Map a pointer position in logical pixels (origin top-left) to NDC.
pub fn pointer_to_ndc(pointer: Vec2, viewport_size: Vec2) -> Vec2 {
    Vec2::new(
        pointer.x / viewport_size.x * 2.0 - 1.0,
        -(pointer.y / viewport_size.y) * 2.0 + 1.0,
    )
}

/// World-space ray from the camera eye through the pointer at `ndc`.
///
/// Any depth inside the frustum lies on the pointer's line of sight, so the
/// mid-depth point is used together with the eye.
pub fn ray_from_ndc(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    ndc: Vec2,
) -> Option<Ray3d> {
    let through = camera.ndc_to_world(camera_transform, ndc.extend(0.5))?;
    ray_through(camera_transform.translation(), through)
}

/// Ray starting at `origin` and passing through `through`.
pub fn ray_through(origin: Vec3, through: Vec3) -> Option<Ray3d> {
    if !origin.is_finite() || !through.is_finite() {
        return None;
    }
    let direction = Dir3::new(through - origin).ok()?;
    Some(Ray3d::new(origin, direction))
}

/// Distance along `ray` to the first intersection with a sphere.
///
/// Computed in f64: scene coordinates reach millions of units while
/// markers are a few units across.
pub fn ray_sphere_distance(ray: Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let origin = ray.origin.as_dvec3();
    let direction = ray.direction.as_dvec3();
    let to_center = center.as_dvec3() - origin;

    let along = to_center.dot(direction);
    let closest: DVec3 = origin + direction * along;
    let miss_sq = closest.distance_squared(center.as_dvec3());
    let radius = radius as f64;
    if miss_sq > radius * radius {
        return None;
    }

    let half_chord = (radius * radius - miss_sq).sqrt();
    let exit = along + half_chord;
    if exit < 0.0 {
        return None;
    }
    let entry = along - half_chord;
    Some(entry.max(0.0) as f32)
}

/// Nearest candidate hit by `ray`. Candidates are `(entity, center, radius)`.
pub fn pick_nearest(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, Vec3, f32)>,
) -> Option<(Entity, f32)> {
    candidates
        .into_iter()
        .filter_map(|(entity, center, radius)| {
            ray_sphere_distance(ray, center, radius).map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Marker radius in world units, including the screen-space scaling.
pub fn effective_radius(marker: &NeoMarker, transform: &Transform) -> f32 {
    marker.base_radius * transform.scale.max_element()
}

/// Resolve a left click to an asteroid.
pub fn pick_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    capture: Res<PointerCapture>,
    viewport: Res<ViewportSize>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    markers: Query<(Entity, &Transform, &NeoMarker, &NeoBody)>,
    mut selected: ResMut<SelectedNeo>,
    mut selections: MessageWriter<NeoSelected>,
) {
    if !mouse.just_pressed(MouseButton::Left) || capture.egui_wants_pointer {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let ndc = pointer_to_ndc(cursor, viewport.logical);
    let Some(ray) = ray_from_ndc(camera, camera_transform, ndc) else {
        return;
    };

    let candidates = markers.iter().map(|(entity, transform, marker, _)| {
        (entity, transform.translation, effective_radius(marker, transform))
    });
    let Some((entity, _)) = pick_nearest(ray, candidates) else {
        return;
    };

    let Ok((_, _, _, body)) = markers.get(entity) else {
        return;
    };
    selected.entity = Some(entity);
    selections.write(NeoSelected {
        entity,
        detail: body.asteroid.detail(),
    });
}

fn log_selection(mut selections: MessageReader<NeoSelected>) {
    for selection in selections.read() {
        info!("Selected {} ({})", selection.detail.title, selection.detail.id);
    }
}
