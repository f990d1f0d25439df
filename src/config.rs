//! Startup configuration from the environment.
//!
//! | Variable             | Effect                                   |
//! |----------------------|------------------------------------------|
//! | `NEO_DATA_URL`       | HTTP endpoint serving the asteroid list  |
//! | `NEO_DATA_FILE`      | local JSON file, takes precedence        |
//! | `NEO_DISTANCE_SCALE` | initial km per render unit               |
//! | `NEO_TIME_SPEED`     | initial time multiplier                  |
//!
//! Unparseable or out-of-range values are logged and ignored.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::loader::{DataSource, FileSource, HttpSource};
use crate::types::{DEFAULT_DISTANCE_SCALE, DEFAULT_TIME_SPEED, ScaleSettings};

/// Endpoint of the local data proxy.
pub const DEFAULT_DATA_URL: &str = "http://127.0.0.1:5000/asteroids";

pub const ENV_DATA_URL: &str = "NEO_DATA_URL";
pub const ENV_DATA_FILE: &str = "NEO_DATA_FILE";
pub const ENV_DISTANCE_SCALE: &str = "NEO_DISTANCE_SCALE";
pub const ENV_TIME_SPEED: &str = "NEO_TIME_SPEED";

/// Resolved startup settings.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub data_url: String,
    pub data_file: Option<PathBuf>,
    pub distance_scale: f64,
    pub time_speed: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            data_file: None,
            distance_scale: DEFAULT_DISTANCE_SCALE,
            time_speed: DEFAULT_TIME_SPEED,
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(&lookup, ENV_DATA_URL) {
            config.data_url = url;
        }
        if let Some(path) = non_empty(&lookup, ENV_DATA_FILE) {
            config.data_file = Some(PathBuf::from(path));
        }
        if let Some(value) = parse_positive(&lookup, ENV_DISTANCE_SCALE, false) {
            config.distance_scale = value;
        }
        if let Some(value) = parse_positive(&lookup, ENV_TIME_SPEED, true) {
            config.time_speed = value;
        }

        config
    }

    /// Source the asteroid list is fetched from. A file wins over the URL.
    pub fn data_source(&self) -> DataSource {
        match &self.data_file {
            Some(path) => DataSource::new(FileSource::new(path.clone())),
            None => DataSource::new(HttpSource::new(self.data_url.clone())),
        }
    }

    /// Initial scale settings, clamped into the UI ranges.
    pub fn scale_settings(&self) -> ScaleSettings {
        ScaleSettings::new(self.distance_scale, self.time_speed)
    }
}

/// Startup system logging where data comes from.
pub fn log_config(config: Res<AppConfig>) {
    match &config.data_file {
        Some(path) => info!("NEO data file: {}", path.display()),
        None => info!("NEO data URL: {}", config.data_url),
    }
    info!(
        "Initial distance scale {} km/unit, time speed {}x",
        config.distance_scale, config.time_speed
    );
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_positive<F>(lookup: &F, key: &str, allow_zero: bool) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup, key)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0)) => {
            Some(value)
        }
        _ => {
            warn!("Ignoring {}={:?}: expected a positive number", key, raw);
            None
        }
    }
}
