//! Trail polylines drawn with gizmos.

use bevy::prelude::*;

use crate::registry::{NeoBody, NeoTrail};
use crate::render::markers::hazard_color;

/// Trail opacity.
pub const TRAIL_ALPHA: f32 = 0.18;

/// Faint line in the marker's colour.
pub fn trail_color(is_hazardous: bool) -> Color {
    hazard_color(is_hazardous).with_alpha(TRAIL_ALPHA)
}

/// Draw every asteroid's trail. Trails are fixed at spawn time.
pub fn draw_trails(mut gizmos: Gizmos, trails: Query<(&NeoTrail, &NeoBody)>) {
    for (trail, body) in &trails {
        gizmos.linestrip(
            trail.points.iter().copied(),
            trail_color(body.asteroid.is_hazardous),
        );
    }
}
