//! Property-based tests for trajectory construction using proptest.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::*;
use crate::rng::SequenceRandom;
use crate::test_utils::fixtures;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The travel floor keeps every path non-degenerate.
    #[test]
    fn prop_start_differs_from_end(
        a in prop::option::of(0.05f64..20.0),
        e in prop::option::of(0.0f64..1.5),
        scale in 100.0f64..200_000.0,
        draws in prop::collection::vec(0.0f64..1.0, 3),
    ) {
        let asteroid = fixtures::asteroid_with_elements("p", a, e, None);
        let trajectory = build_trajectory(
            &asteroid,
            ScaleSnapshot::new(scale, 1.0),
            &mut SequenceRandom::new(draws),
        );
        prop_assert_ne!(trajectory.start, trajectory.end);
        prop_assert!(trajectory.path_length() > 0.0);
        prop_assert!(trajectory.speed_units_per_second > 0.0);
        prop_assert!(trajectory.speed_units_per_second.is_finite());
    }

    /// Any approach direction yields a unit perpendicular.
    #[test]
    fn prop_perpendicular_is_unit_and_orthogonal(
        azimuth in 0.0f64..std::f64::consts::TAU,
        inclination in -MAX_INCLINATION..MAX_INCLINATION,
    ) {
        let direction = approach_direction(azimuth, inclination);
        let perp = perpendicular(direction).vector;
        prop_assert!((perp.length() - 1.0).abs() < 1e-9);
        prop_assert!(perp.dot(direction).abs() < 1e-9);
    }

    /// Vectors close to the primary helper still get a valid perpendicular.
    #[test]
    fn prop_perpendicular_near_helper(
        jitter in prop::collection::vec(-1e-4f64..1e-4, 3),
        length in 0.1f64..10.0,
    ) {
        let direction = (PRIMARY_HELPER + DVec3::new(jitter[0], jitter[1], jitter[2])).normalize() * length;
        let result = perpendicular(direction);
        prop_assert!((result.vector.length() - 1.0).abs() < 1e-9);
        prop_assert!(result.vector.dot(direction.normalize()).abs() < 1e-6);
    }

    /// Initial progress stays inside [0.1, 0.9).
    #[test]
    fn prop_initial_progress_range(draws in prop::collection::vec(0.0f64..1.0, 3)) {
        let trajectory = build_trajectory(
            &fixtures::asteroid("p"),
            ScaleSnapshot::new(1000.0, 1.0),
            &mut SequenceRandom::new(draws),
        );
        prop_assert!(trajectory.progress >= 0.1);
        prop_assert!(trajectory.progress < 0.9);
    }

    /// Interpolation hits both endpoints exactly.
    #[test]
    fn prop_lerp_endpoints(
        start in prop::array::uniform3(-1e7f64..1e7),
        end in prop::array::uniform3(-1e7f64..1e7),
    ) {
        let trajectory = Trajectory {
            start: DVec3::from_array(start),
            end: DVec3::from_array(end),
            speed_units_per_second: 1.0,
            progress: 0.5,
        };
        prop_assert_eq!(trajectory.position_at(0.0), trajectory.start);
        prop_assert_eq!(trajectory.position_at(1.0), trajectory.end);
    }

    /// Same draws, same output.
    #[test]
    fn prop_deterministic_given_draws(
        a in 0.5f64..5.0,
        e in 0.0f64..0.9,
        draws in prop::collection::vec(0.0f64..1.0, 3),
    ) {
        let asteroid = fixtures::asteroid_with_elements("d", Some(a), Some(e), None);
        let scale = ScaleSnapshot::new(10_000.0, 1.0);
        let first = build_trajectory(&asteroid, scale, &mut SequenceRandom::new(draws.clone()));
        let second = build_trajectory(&asteroid, scale, &mut SequenceRandom::new(draws));
        prop_assert_eq!(first, second);
    }
}
