//! Core scale types and constants for the flyby visualization.

use bevy::prelude::*;

/// Kilometres per astronomical unit.
pub const AU_TO_KM: f64 = 149_597_871.0;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Atmosphere shell radius as a multiple of the Earth radius.
pub const ATMOSPHERE_FACTOR: f64 = 1.03;

/// Stand-in for the solar gravitational parameter in `v = sqrt(K / a)`.
///
/// Not physically calibrated: with `a` in AU it yields a speed of a few
/// km/s, which is all the animation needs.
pub const ORBITAL_SPEED_CONSTANT: f64 = 30.0;

/// Lower bound on the half-length of a flyby path, in kilometres.
pub const MIN_TRAVEL_DISTANCE_KM: f64 = 500_000.0;

/// Half-length of a flyby path as a multiple of the perihelion distance.
pub const TRAVEL_DISTANCE_FACTOR: f64 = 12.0;

/// Speed used when the orbital speed approximation yields nothing usable.
pub const FALLBACK_SPEED_KMS: f64 = 25.0;

/// Default distance scale (km per render unit).
pub const DEFAULT_DISTANCE_SCALE: f64 = 1000.0;

/// Allowed distance scale range for the UI control.
pub const DISTANCE_SCALE_RANGE: std::ops::RangeInclusive<f64> = 100.0..=200_000.0;

/// Default time speed multiplier.
pub const DEFAULT_TIME_SPEED: f64 = 1.0;

/// Allowed time speed range for the UI control.
pub const TIME_SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1_000_000.0;

/// Convert kilometres to render units at the given distance scale.
#[inline]
pub fn km_to_units(km: f64, distance_scale: f64) -> f64 {
    km / distance_scale
}

/// Live, user-adjustable scale state.
///
/// Systems never hold on to this resource between frames. They take a
/// [`ScaleSnapshot`] at the start of a computation and work from that.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ScaleSettings {
    /// Kilometres represented by one render unit.
    pub distance_scale: f64,
    /// Multiplier applied to elapsed real time.
    pub time_speed: f64,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            distance_scale: DEFAULT_DISTANCE_SCALE,
            time_speed: DEFAULT_TIME_SPEED,
        }
    }
}

impl ScaleSettings {
    /// Create settings, clamping both values into their UI ranges.
    pub fn new(distance_scale: f64, time_speed: f64) -> Self {
        let mut settings = Self::default();
        settings.set_distance_scale(distance_scale);
        settings.set_time_speed(time_speed);
        settings
    }

    /// Set the distance scale. Non-finite values are ignored.
    pub fn set_distance_scale(&mut self, value: f64) {
        if value.is_finite() {
            self.distance_scale =
                value.clamp(*DISTANCE_SCALE_RANGE.start(), *DISTANCE_SCALE_RANGE.end());
        }
    }

    /// Set the time speed. Non-finite values are ignored.
    pub fn set_time_speed(&mut self, value: f64) {
        if value.is_finite() {
            self.time_speed = value.clamp(*TIME_SPEED_RANGE.start(), *TIME_SPEED_RANGE.end());
        }
    }

    /// Immutable copy of the current values.
    pub fn snapshot(&self) -> ScaleSnapshot {
        ScaleSnapshot {
            distance_scale: self.distance_scale,
            time_speed: self.time_speed,
        }
    }
}

/// Immutable view of [`ScaleSettings`] passed into pure computations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSnapshot {
    pub distance_scale: f64,
    pub time_speed: f64,
}

impl ScaleSnapshot {
    pub fn new(distance_scale: f64, time_speed: f64) -> Self {
        Self {
            distance_scale,
            time_speed,
        }
    }

    /// Convert kilometres to render units.
    pub fn km_to_units(&self, km: f64) -> f64 {
        km_to_units(km, self.distance_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_km_to_units() {
        assert_eq!(km_to_units(50_000.0, 50_000.0), 1.0);
        assert_eq!(km_to_units(0.0, 1000.0), 0.0);
        assert_eq!(km_to_units(AU_TO_KM, 1000.0), 149_597.871);
    }

    #[test]
    fn test_scale_settings_default() {
        let settings = ScaleSettings::default();
        assert_eq!(settings.distance_scale, DEFAULT_DISTANCE_SCALE);
        assert_eq!(settings.time_speed, DEFAULT_TIME_SPEED);
    }

    #[test]
    fn test_scale_settings_clamps() {
        let mut settings = ScaleSettings::default();
        settings.set_distance_scale(1.0);
        assert_eq!(settings.distance_scale, 100.0);
        settings.set_time_speed(-5.0);
        assert_eq!(settings.time_speed, 0.0);
    }

    #[test]
    fn test_scale_settings_ignores_nan() {
        let mut settings = ScaleSettings::new(5000.0, 2.0);
        settings.set_distance_scale(f64::NAN);
        settings.set_time_speed(f64::INFINITY);
        assert_eq!(settings.distance_scale, 5000.0);
        assert_eq!(settings.time_speed, 2.0);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut settings = ScaleSettings::new(5000.0, 2.0);
        let snapshot = settings.snapshot();
        settings.set_distance_scale(10_000.0);
        assert_eq!(snapshot.distance_scale, 5000.0);
        assert_eq!(snapshot.km_to_units(10_000.0), 2.0);
    }
}
