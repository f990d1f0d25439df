//! Keyboard shortcuts.
//!
//! - `R` reloads the asteroid list
//! - `Space` pauses or resumes the animation
//! - `Escape` clears the selection
//! - `[` / `]` halve or double the time speed

use bevy::prelude::*;

use crate::animation::AnimationClock;
use crate::registry::{ReloadRequest, SelectedNeo};
use crate::types::ScaleSettings;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts);
    }
}

/// Handle keyboard shortcuts for the viewer.
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<AnimationClock>,
    mut selected: ResMut<SelectedNeo>,
    mut scale: ResMut<ScaleSettings>,
    mut reloads: MessageWriter<ReloadRequest>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        reloads.write(ReloadRequest);
    }

    if keys.just_pressed(KeyCode::Space) {
        clock.toggle();
        info!(
            "Animation {}",
            if clock.is_running() { "running" } else { "paused" }
        );
    }

    if keys.just_pressed(KeyCode::Escape) {
        selected.entity = None;
    }

    if keys.just_pressed(KeyCode::BracketLeft) {
        let speed = scale.time_speed * 0.5;
        scale.set_time_speed(speed);
        info!("Time speed: {}x", scale.time_speed);
    }

    if keys.just_pressed(KeyCode::BracketRight) {
        let speed = if scale.time_speed > 0.0 {
            scale.time_speed * 2.0
        } else {
            1.0
        };
        scale.set_time_speed(speed);
        info!("Time speed: {}x", scale.time_speed);
    }
}
