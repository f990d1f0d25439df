//! NEO Flyby - near-Earth object visualizer
//!
//! Shows near-Earth objects sweeping past Earth on simplified straight
//! flybys, with live scale controls and click-to-inspect details.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use neo_flyby::SimulationPlugin;
use neo_flyby::camera::CameraPlugin;
use neo_flyby::config::{AppConfig, log_config};
use neo_flyby::earth::EarthPlugin;
use neo_flyby::input::InputPlugin;
use neo_flyby::picking::PickingPlugin;
use neo_flyby::registry::ReloadRequest;
use neo_flyby::render::RenderPlugin;
use neo_flyby::ui::UiPlugin;

fn main() {
    let config = AppConfig::from_env();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "NEO Flyby".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(config.scale_settings())
        .insert_resource(config.data_source())
        .insert_resource(config)
        .add_plugins((
            SimulationPlugin,
            EarthPlugin,
            CameraPlugin,
            PickingPlugin,
            RenderPlugin,
            InputPlugin,
            UiPlugin,
        ))
        .add_systems(Startup, (log_config, request_initial_load))
        .run();
}

fn request_initial_load(mut reloads: MessageWriter<ReloadRequest>) {
    reloads.write(ReloadRequest);
}
