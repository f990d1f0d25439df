//! Test utilities for trajectory and registry tests.
//!
//! Provides asteroid fixtures and a headless app builder.

use bevy::math::DVec3;

use crate::neo::{Asteroid, OrbitalElements};
use crate::trajectory::Trajectory;

/// Fixtures for creating test asteroids and trajectories.
pub mod fixtures {
    use super::*;

    /// Asteroid with every optional field missing.
    pub fn asteroid(id: &str) -> Asteroid {
        asteroid_with_elements(id, None, None, None)
    }

    /// Asteroid with the given semi-major axis (AU), eccentricity and
    /// diameter (m).
    pub fn asteroid_with_elements(
        id: &str,
        semi_major_axis_au: Option<f64>,
        eccentricity: Option<f64>,
        diameter_m: Option<f64>,
    ) -> Asteroid {
        Asteroid {
            id: id.to_string(),
            name: format!("Test {id}"),
            diameter_m,
            is_hazardous: false,
            orbit: OrbitalElements {
                semi_major_axis_au,
                eccentricity,
                inclination_deg: None,
            },
        }
    }

    /// `count` asteroids with distinct ids.
    pub fn asteroid_batch(prefix: &str, count: usize) -> Vec<Asteroid> {
        (0..count)
            .map(|i| asteroid(&format!("{prefix}-{i}")))
            .collect()
    }

    /// Trajectory along the x axis from -`half` to +`half`.
    pub fn straight_trajectory(half: f64, speed: f64, progress: f64) -> Trajectory {
        Trajectory {
            start: DVec3::new(-half, 0.0, 0.0),
            end: DVec3::new(half, 0.0, 0.0),
            speed_units_per_second: speed,
            progress,
        }
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_ids_are_distinct() {
        let batch = fixtures::asteroid_batch("n", 3);
        assert_eq!(batch.len(), 3);
        assert_ne!(batch[0].id, batch[1].id);
    }

    #[test]
    fn test_straight_trajectory_length() {
        let trajectory = fixtures::straight_trajectory(5.0, 1.0, 0.0);
        assert_eq!(trajectory.path_length(), 10.0);
    }
}
