//! Asteroid marker meshes and screen-size scaling.
//!
//! The physical marker radius is only a few render units while the camera
//! sits millions of units away, so markers are inflated each frame to
//! cover a fixed fraction of the view. Picking reads the same scale.

use bevy::prelude::*;

use crate::animation::advance_neos;
use crate::camera::{FOV_DEGREES, MainCamera};
use crate::registry::{NeoBody, NeoMarker};

/// Fraction of the visible height a marker should span.
pub const MARKER_SCREEN_FRACTION: f32 = 0.006;

/// Upper bound on the inflation factor.
pub const MAX_MARKER_SCALE: f32 = 1.0e5;

/// Shared materials for the two marker kinds.
#[derive(Resource)]
pub struct MarkerMaterials {
    pub hazardous: Handle<StandardMaterial>,
    pub safe: Handle<StandardMaterial>,
}

impl MarkerMaterials {
    pub fn for_hazard(&self, is_hazardous: bool) -> Handle<StandardMaterial> {
        if is_hazardous {
            self.hazardous.clone()
        } else {
            self.safe.clone()
        }
    }
}

/// Marker and trail colour: red for potentially hazardous, cyan otherwise.
pub fn hazard_color(is_hazardous: bool) -> Color {
    if is_hazardous {
        Color::srgb_u8(0xff, 0x6b, 0x6b)
    } else {
        Color::srgb_u8(0x7b, 0xe0, 0xff)
    }
}

/// Scale factor that makes a sphere of `base_radius` span
/// [`MARKER_SCREEN_FRACTION`] of the view at `camera_distance`.
///
/// Never shrinks a marker below its built size.
pub fn screen_scale(base_radius: f32, camera_distance: f32, fov: f32) -> f32 {
    if base_radius <= 0.0 || !camera_distance.is_finite() {
        return 1.0;
    }
    let visible_height = 2.0 * camera_distance * (fov * 0.5).tan();
    let target_radius = visible_height * MARKER_SCREEN_FRACTION * 0.5;
    (target_radius / base_radius).clamp(1.0, MAX_MARKER_SCALE)
}

/// Plugin attaching meshes to new asteroids and keeping them visible.
pub struct MarkerPlugin;

impl Plugin for MarkerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, create_marker_materials).add_systems(
            Update,
            (attach_marker_visuals, scale_markers_to_screen)
                .chain()
                .after(advance_neos),
        );
    }
}

fn create_marker_materials(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    let mut marker_material = |is_hazardous: bool| {
        materials.add(StandardMaterial {
            base_color: hazard_color(is_hazardous),
            perceptual_roughness: 0.8,
            metallic: 0.1,
            ..default()
        })
    };
    let hazardous = marker_material(true);
    let safe = marker_material(false);
    commands.insert_resource(MarkerMaterials { hazardous, safe });
}

/// Give freshly spawned asteroids a sphere mesh.
fn attach_marker_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<MarkerMaterials>,
    added: Query<(Entity, &NeoBody, &NeoMarker), Added<NeoBody>>,
) {
    for (entity, body, marker) in &added {
        let mesh = meshes.add(Sphere::new(marker.base_radius).mesh().uv(10, 8));
        commands.entity(entity).insert((
            Mesh3d(mesh),
            MeshMaterial3d(materials.for_hazard(body.asteroid.is_hazardous)),
        ));
    }
}

/// Inflate markers so they keep a constant apparent size.
pub fn scale_markers_to_screen(
    camera_query: Query<(&GlobalTransform, &Projection), With<MainCamera>>,
    mut markers: Query<(&NeoMarker, &mut Transform)>,
) {
    let Ok((camera_transform, projection)) = camera_query.single() else {
        return;
    };
    let fov = match projection {
        Projection::Perspective(perspective) => perspective.fov,
        _ => FOV_DEGREES.to_radians(),
    };
    let camera_position = camera_transform.translation();

    for (marker, mut transform) in &mut markers {
        let distance = camera_position.distance(transform.translation);
        transform.scale = Vec3::splat(screen_scale(marker.base_radius, distance, fov));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_screen_scale_grows_with_distance() {
        let fov = FOV_DEGREES.to_radians();
        let near = screen_scale(1.0, 1.0e5, fov);
        let far = screen_scale(1.0, 1.0e6, fov);
        assert_relative_eq!(far / near, 10.0, max_relative = 1e-5);
    }

    #[test]
    fn test_screen_scale_never_shrinks() {
        assert_eq!(screen_scale(3.0, 10.0, FOV_DEGREES.to_radians()), 1.0);
    }

    #[test]
    fn test_screen_scale_degenerate_inputs() {
        assert_eq!(screen_scale(0.0, 1.0e6, 1.0), 1.0);
        assert_eq!(screen_scale(1.0, f32::INFINITY, 1.0), 1.0);
    }

    #[test]
    fn test_hazard_colors_differ() {
        assert_ne!(hazard_color(true), hazard_color(false));
    }
}
