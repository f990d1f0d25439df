//! NEO Flyby - near-Earth object visualizer
//!
//! A library crate providing the flyby model, the reload cycle and the
//! Bevy plugins that render them, for testing and integration purposes.

pub mod animation;
pub mod camera;
pub mod config;
pub mod earth;
pub mod input;
pub mod loader;
pub mod neo;
pub mod picking;
pub mod registry;
pub mod render;
pub mod rng;
pub mod trajectory;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

use bevy::prelude::*;

use crate::animation::AnimationPlugin;
use crate::registry::RegistryPlugin;
use crate::rng::NeoRng;
use crate::types::ScaleSettings;

/// Headless core: scale state, randomness, the registry and the animation
/// loop. Needs a [`loader::DataSource`] resource to be inserted by the app.
///
/// Resources already present are kept, so callers can insert configured
/// [`ScaleSettings`] or a seeded [`NeoRng`] before adding the plugin.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScaleSettings>()
            .init_resource::<NeoRng>()
            .add_plugins((RegistryPlugin, AnimationPlugin));
    }
}
