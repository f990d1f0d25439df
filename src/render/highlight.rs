//! Selection ring around the picked asteroid.

use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::picking::effective_radius;
use crate::registry::{NeoMarker, SelectedNeo};

/// Ring radius relative to the marker.
pub const RING_FACTOR: f32 = 1.8;

/// Number of segments in the ring.
pub const RING_SEGMENTS: usize = 32;

/// Points of a closed ring facing the camera.
pub fn ring_points(center: Vec3, radius: f32, right: Vec3, up: Vec3, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + (right * angle.cos() + up * angle.sin()) * radius
        })
        .collect()
}

/// Draw a camera-facing ring around the selected asteroid.
pub fn draw_selection_highlight(
    mut gizmos: Gizmos,
    selected: Res<SelectedNeo>,
    camera_query: Query<&GlobalTransform, With<MainCamera>>,
    markers: Query<(&Transform, &NeoMarker)>,
) {
    let Some(entity) = selected.entity else {
        return;
    };
    let Ok((transform, marker)) = markers.get(entity) else {
        return;
    };
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };

    let radius = effective_radius(marker, transform) * RING_FACTOR;
    let points = ring_points(
        transform.translation,
        radius,
        *camera_transform.right(),
        *camera_transform.up(),
        RING_SEGMENTS,
    );
    gizmos.linestrip(points, Color::srgba(1.0, 1.0, 1.0, 0.8));
}
