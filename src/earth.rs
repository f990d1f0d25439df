//! Earth and its atmosphere shell, and their reaction to scale changes.
//!
//! The shells are the only geometry rescaled live when the distance scale
//! changes. Asteroid trajectories keep the render-space coordinates they
//! were built with until the next reload, so distances and speeds look
//! skewed relative to Earth in the meantime.

use bevy::prelude::*;

use crate::types::{ATMOSPHERE_FACTOR, EARTH_RADIUS_KM, ScaleSettings, km_to_units};

/// Earth rotation per animation tick at time speed 1 (radians).
pub const EARTH_SPIN_PER_TICK: f32 = 0.0008;

/// Atmosphere rotation per animation tick at time speed 1 (radians).
pub const ATMOSPHERE_SPIN_PER_TICK: f32 = 0.0009;

/// A sphere whose render radius follows the distance scale.
#[derive(Component, Clone, Copy, Debug)]
pub struct EarthShell {
    /// Physical radius in kilometres.
    pub radius_km: f64,
    /// Radius the mesh was built with, in render units.
    pub mesh_radius: f32,
}

/// Ambient rotation applied by the animation loop.
#[derive(Component, Clone, Copy, Debug)]
pub struct EarthSpin {
    pub radians_per_tick: f32,
}

/// Marker for the solid Earth body.
#[derive(Component)]
pub struct EarthBody;

/// Marker for the atmosphere shell.
#[derive(Component)]
pub struct Atmosphere;

/// Plugin spawning Earth and keeping it in scale.
pub struct EarthPlugin;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_earth).add_systems(
            Update,
            rescale_earth_shells.run_if(resource_changed::<ScaleSettings>),
        );
    }
}

/// Uniform scale that makes a mesh of `mesh_radius` render at
/// `radius_km` under `distance_scale`.
pub fn shell_scale(radius_km: f64, distance_scale: f64, mesh_radius: f32) -> f32 {
    (km_to_units(radius_km, distance_scale) / mesh_radius as f64) as f32
}

fn spawn_earth(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scale: Res<ScaleSettings>,
) {
    let distance_scale = scale.snapshot().distance_scale;

    let earth_radius = km_to_units(EARTH_RADIUS_KM, distance_scale) as f32;
    let earth_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x2a, 0x4b, 0x7a),
        emissive: Color::srgb_u8(0x05, 0x14, 0x27).to_linear(),
        perceptual_roughness: 0.9,
        reflectance: 0.1,
        ..default()
    });
    commands.spawn((
        Name::new("Earth"),
        EarthBody,
        EarthShell {
            radius_km: EARTH_RADIUS_KM,
            mesh_radius: earth_radius,
        },
        EarthSpin {
            radians_per_tick: EARTH_SPIN_PER_TICK,
        },
        Mesh3d(meshes.add(Sphere::new(earth_radius).mesh().uv(64, 32))),
        MeshMaterial3d(earth_material),
        Transform::default(),
    ));

    let atmosphere_km = EARTH_RADIUS_KM * ATMOSPHERE_FACTOR;
    let atmosphere_radius = km_to_units(atmosphere_km, distance_scale) as f32;
    let atmosphere_material = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(0x6f, 0xb8, 0xff, 15),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Name::new("Atmosphere"),
        Atmosphere,
        EarthShell {
            radius_km: atmosphere_km,
            mesh_radius: atmosphere_radius,
        },
        EarthSpin {
            radians_per_tick: ATMOSPHERE_SPIN_PER_TICK,
        },
        Mesh3d(meshes.add(Sphere::new(atmosphere_radius).mesh().uv(32, 16))),
        MeshMaterial3d(atmosphere_material),
        Transform::default(),
    ));

    info!(
        "Spawned Earth (radius {:.3} units at {} km/unit)",
        earth_radius, distance_scale
    );
}

/// Resize the Earth shells for the current distance scale.
///
/// `ScaleSettings` also changes with the time speed; only a new distance
/// scale touches the shells.
pub fn rescale_earth_shells(
    scale: Res<ScaleSettings>,
    mut applied: Local<Option<f64>>,
    mut shells: Query<(&EarthShell, &mut Transform)>,
) {
    let distance_scale = scale.snapshot().distance_scale;
    if *applied == Some(distance_scale) {
        return;
    }
    *applied = Some(distance_scale);
    for (shell, mut transform) in &mut shells {
        transform.scale = Vec3::splat(shell_scale(
            shell.radius_km,
            distance_scale,
            shell.mesh_radius,
        ));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test_utils::bevy_test;

    #[test]
    fn test_shell_scale_identity_at_build_scale() {
        let mesh_radius = km_to_units(EARTH_RADIUS_KM, 1000.0) as f32;
        assert_relative_eq!(
            shell_scale(EARTH_RADIUS_KM, 1000.0, mesh_radius),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_shell_scale_halves_when_scale_doubles() {
        let mesh_radius = km_to_units(EARTH_RADIUS_KM, 1000.0) as f32;
        assert_relative_eq!(
            shell_scale(EARTH_RADIUS_KM, 2000.0, mesh_radius),
            0.5,
            epsilon = 1e-6
        );
    }

    fn app_with_shell() -> (App, Entity) {
        let mut app = bevy_test::headless_app();
        app.insert_resource(ScaleSettings::new(1000.0, 1.0));
        app.add_systems(
            Update,
            rescale_earth_shells.run_if(resource_changed::<ScaleSettings>),
        );

        let atmosphere_km = EARTH_RADIUS_KM * ATMOSPHERE_FACTOR;
        let shell = app
            .world_mut()
            .spawn((
                EarthShell {
                    radius_km: atmosphere_km,
                    mesh_radius: km_to_units(atmosphere_km, 1000.0) as f32,
                },
                Transform::default(),
            ))
            .id();
        app.update();
        (app, shell)
    }

    #[test]
    fn test_rescale_system_follows_settings() {
        let (mut app, shell) = app_with_shell();
        app.world_mut()
            .resource_mut::<ScaleSettings>()
            .set_distance_scale(4000.0);
        app.update();

        let transform = app.world().get::<Transform>(shell).unwrap();
        assert_relative_eq!(transform.scale.x, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_time_speed_change_leaves_shells_alone() {
        let (mut app, shell) = app_with_shell();
        app.world_mut().get_mut::<Transform>(shell).unwrap().scale = Vec3::splat(7.0);

        app.world_mut()
            .resource_mut::<ScaleSettings>()
            .set_time_speed(50.0);
        app.update();

        let transform = app.world().get::<Transform>(shell).unwrap();
        assert_eq!(transform.scale, Vec3::splat(7.0));
    }
}
