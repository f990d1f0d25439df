//! Straight-line flyby trajectories derived from orbital elements.
//!
//! Each asteroid gets a segment passing Earth at its perihelion distance,
//! in a randomly chosen direction. This is a visual approximation only:
//! there is no Kepler solving here. The perihelion stands in for the
//! closest approach to Earth and `sqrt(K / a)` stands in for the speed.
//!
//! All geometry is in render units, i.e. kilometres divided by the
//! distance scale in effect when the trajectory was built.

#[cfg(test)]
mod proptest_trajectory;

use std::f64::consts::{PI, TAU};

use bevy::math::{DVec3, Vec3};

use crate::neo::Asteroid;
use crate::rng::RandomSource;
use crate::types::{
    AU_TO_KM, FALLBACK_SPEED_KMS, MIN_TRAVEL_DISTANCE_KM, ORBITAL_SPEED_CONSTANT,
    ScaleSnapshot, TRAVEL_DISTANCE_FACTOR,
};

/// First helper vector crossed with the approach direction.
pub const PRIMARY_HELPER: DVec3 = DVec3::new(0.3, 0.7, 0.2);

/// Helper used when the direction is (nearly) parallel to [`PRIMARY_HELPER`].
pub const FALLBACK_HELPER: DVec3 = DVec3::new(0.9, 0.1, 0.05);

/// Cross products shorter than this are treated as degenerate.
pub const DEGENERATE_CROSS_LENGTH: f64 = 0.01;

/// Approach inclination is drawn from `[-MAX_INCLINATION, MAX_INCLINATION)`.
pub const MAX_INCLINATION: f64 = PI / 6.0;

/// Initial progress is drawn from `[INITIAL_PROGRESS_MIN, INITIAL_PROGRESS_MIN + INITIAL_PROGRESS_SPAN)`.
pub const INITIAL_PROGRESS_MIN: f64 = 0.1;
pub const INITIAL_PROGRESS_SPAN: f64 = 0.8;

/// Number of segments in a trail polyline.
pub const TRAIL_STEPS: usize = 64;

/// Amplitude of the bow applied to trails.
const TRAIL_CURVE: f64 = 0.02;

/// A flyby path and the asteroid's place on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Where the path begins (render units, Earth at the origin).
    pub start: DVec3,
    /// Where the path ends.
    pub end: DVec3,
    /// Travel speed along the path.
    pub speed_units_per_second: f64,
    /// Interpolation parameter; nominally in `[0, 1]`, briefly outside it
    /// around the loop boundary.
    pub progress: f64,
}

impl Trajectory {
    /// Point at parameter `t`, without clamping.
    ///
    /// Written as a weighted sum so `t = 0` and `t = 1` land exactly on
    /// `start` and `end`.
    pub fn position_at(&self, t: f64) -> DVec3 {
        self.start * (1.0 - t) + self.end * t
    }

    /// Current position.
    pub fn position(&self) -> DVec3 {
        self.position_at(self.progress)
    }

    /// Length of the path in render units.
    pub fn path_length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Unit vector from start to end.
    pub fn direction(&self) -> DVec3 {
        (self.end - self.start).normalize_or_zero()
    }
}

/// Result of [`perpendicular`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perpendicular {
    pub vector: DVec3,
    pub used_fallback: bool,
}

/// Approximate mean orbital speed in km/s for semi-major axis `a` (AU).
pub fn orbital_speed_kms(semi_major_axis_au: f64) -> f64 {
    (ORBITAL_SPEED_CONSTANT / semi_major_axis_au).sqrt()
}

/// Perihelion distance in kilometres.
pub fn perihelion_km(semi_major_axis_au: f64, eccentricity: f64) -> f64 {
    semi_major_axis_au * (1.0 - eccentricity) * AU_TO_KM
}

/// Half-length of the flyby path in kilometres.
pub fn travel_distance_km(perihelion_km: f64) -> f64 {
    (perihelion_km * TRAVEL_DISTANCE_FACTOR).max(MIN_TRAVEL_DISTANCE_KM)
}

/// Unit vector from spherical angles (radians). Y is up.
pub fn approach_direction(azimuth: f64, inclination: f64) -> DVec3 {
    DVec3::new(
        azimuth.cos() * inclination.cos(),
        inclination.sin(),
        azimuth.sin() * inclination.cos(),
    )
    .normalize()
}

/// Draw a random approach direction: azimuth in `[0, 2π)`, inclination in
/// `[-π/6, π/6)`. Consumes two values from `rng`.
pub fn random_direction(rng: &mut dyn RandomSource) -> DVec3 {
    let azimuth = rng.next_f64() * TAU;
    let inclination = (rng.next_f64() - 0.5) * 2.0 * MAX_INCLINATION;
    approach_direction(azimuth, inclination)
}

/// Unit vector perpendicular to `direction`.
pub fn perpendicular(direction: DVec3) -> Perpendicular {
    let primary = direction.cross(PRIMARY_HELPER);
    if primary.length() >= DEGENERATE_CROSS_LENGTH {
        return Perpendicular {
            vector: primary.normalize(),
            used_fallback: false,
        };
    }
    Perpendicular {
        vector: direction.cross(FALLBACK_HELPER).normalize(),
        used_fallback: true,
    }
}

/// Build the trajectory for `asteroid` with a known approach direction.
pub fn build_trajectory_with_direction(
    asteroid: &Asteroid,
    scale: ScaleSnapshot,
    direction: DVec3,
    initial_progress: f64,
) -> Trajectory {
    let a = asteroid.orbit.semi_major_axis();
    let e = asteroid.orbit.eccentricity();

    let v_kms = orbital_speed_kms(a);
    let miss_km = perihelion_km(a, e);

    let offset = perpendicular(direction).vector;
    let closest = offset * scale.km_to_units(miss_km);

    let travel_km = travel_distance_km(miss_km);
    let start = direction * scale.km_to_units(-travel_km) + closest;
    let end = direction * scale.km_to_units(travel_km) + closest;

    let speed = scale.km_to_units(v_kms);
    let speed_units_per_second = if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        scale.km_to_units(FALLBACK_SPEED_KMS)
    };

    Trajectory {
        start,
        end,
        speed_units_per_second,
        progress: initial_progress,
    }
}

/// Build the trajectory for `asteroid`, drawing direction and initial
/// progress from `rng` (three values: azimuth, inclination, progress).
pub fn build_trajectory(
    asteroid: &Asteroid,
    scale: ScaleSnapshot,
    rng: &mut dyn RandomSource,
) -> Trajectory {
    let direction = random_direction(rng);
    let progress = INITIAL_PROGRESS_MIN + rng.next_f64() * INITIAL_PROGRESS_SPAN;
    build_trajectory_with_direction(asteroid, scale, direction, progress)
}

/// Polyline for drawing a trail from `start` to `end`, with a slight bow
/// towards the middle so overlapping trails stay distinguishable.
pub fn trail_points(start: DVec3, end: DVec3, steps: usize) -> Vec<Vec3> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let bow = (t * PI).sin() * TRAIL_CURVE;
            let base = start * (1.0 - t) + end * t;
            let offset = DVec3::new(start.y, start.z, start.x) * bow;
            (base + offset).as_vec3()
        })
        .collect()
}

/// Radius of the marker sphere for an asteroid of the given diameter.
pub fn marker_radius(diameter_m: f64) -> f32 {
    let diameter_km = diameter_m / 1000.0;
    (diameter_km.max(0.5).log10() * 0.75).max(0.6) as f32
}
