//! Rendering for the flyby scene.
//!
//! Everything here is presentation only. Asteroid entities are spawned by
//! the registry without meshes; this module dresses them up, draws their
//! trails and marks the selection.

mod background;
pub mod highlight;
pub mod markers;
pub mod trails;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::highlight::draw_selection_highlight;
use self::markers::MarkerPlugin;
use self::trails::draw_trails;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((BackgroundPlugin, MarkerPlugin)).add_systems(
            Update,
            (draw_trails, draw_selection_highlight).after(markers::scale_markers_to_screen),
        );
    }
}
