//! Per-frame advance of every asteroid along its flyby.
//!
//! Progress moves at the trajectory's speed scaled by the time speed.
//! Past [`WRAP_THRESHOLD`] an asteroid re-enters just before the start of
//! its path at a freshly drawn offset, so the flybys stay staggered
//! instead of looping in lockstep.

use bevy::prelude::*;

use crate::earth::EarthSpin;
use crate::registry::NeoBody;
use crate::rng::{NeoRng, RandomSource};
use crate::trajectory::Trajectory;
use crate::types::ScaleSettings;

/// Progress beyond which an asteroid wraps back to the start.
pub const WRAP_THRESHOLD: f64 = 1.02;

/// Wrapped progress is drawn from `[WRAP_START, WRAP_START + WRAP_SPAN)`.
pub const WRAP_START: f64 = -0.02;
pub const WRAP_SPAN: f64 = 0.08;

/// Stop/resume handle for the animation loop.
#[derive(Resource, Debug)]
pub struct AnimationClock {
    running: bool,
    ticks: u64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            running: true,
            ticks: 0,
        }
    }
}

impl AnimationClock {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Number of ticks executed while running.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Run condition: the animation clock has not been stopped.
pub fn animation_running(clock: Res<AnimationClock>) -> bool {
    clock.is_running()
}

/// Plugin providing the animation loop.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationClock>().add_systems(
            Update,
            (advance_neos, spin_earth).run_if(animation_running),
        );
    }
}

/// Advance `trajectory` by `dt` seconds of effective time.
///
/// Returns `true` if the asteroid wrapped around.
pub fn advance_progress(trajectory: &mut Trajectory, dt: f64, rng: &mut dyn RandomSource) -> bool {
    let length = trajectory.path_length();
    if length > 0.0 {
        trajectory.progress += trajectory.speed_units_per_second * dt / length;
    }
    if trajectory.progress > WRAP_THRESHOLD {
        trajectory.progress = WRAP_START + rng.next_f64() * WRAP_SPAN;
        return true;
    }
    false
}

/// Move every asteroid and sync its transform.
pub fn advance_neos(
    time: Res<Time>,
    scale: Res<ScaleSettings>,
    mut clock: ResMut<AnimationClock>,
    mut rng: ResMut<NeoRng>,
    mut neos: Query<(&mut NeoBody, &mut Transform)>,
) {
    let snapshot = scale.snapshot();
    let dt = time.delta_secs_f64() * snapshot.time_speed;
    clock.ticks += 1;

    for (mut body, mut transform) in &mut neos {
        advance_progress(&mut body.trajectory, dt, rng.source());
        transform.translation = body.trajectory.position().as_vec3();
    }
}

/// Rotate Earth and its atmosphere a little every tick.
pub fn spin_earth(scale: Res<ScaleSettings>, mut shells: Query<(&EarthSpin, &mut Transform)>) {
    let time_speed = scale.snapshot().time_speed as f32;
    for (spin, mut transform) in &mut shells {
        transform.rotate_y(spin.radians_per_tick * time_speed);
    }
}
