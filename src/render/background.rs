//! Clear colour and lighting.

use bevy::prelude::*;

/// Deep-space background.
pub const CLEAR_COLOR: Color = Color::srgb(0.008, 0.024, 0.102);

/// Position of the sun-like directional light.
pub const LIGHT_POSITION: Vec3 = Vec3::new(1.0e6, 0.0, 0.0);

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(CLEAR_COLOR))
            .add_systems(Startup, spawn_lighting);
    }
}

fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        Name::new("Sunlight"),
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Scene lighting initialized");
}
