//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use bevy::prelude::*;
use neo_flyby::SimulationPlugin;
use neo_flyby::loader::{AsteroidSource, DataSource, FetchError, PendingLoad};
use neo_flyby::neo::{Asteroid, parse_asteroids};
use neo_flyby::registry::ReloadRequest;
use neo_flyby::rng::{NeoRng, SequenceRandom};

/// Asteroids parsed from a JSON fixture so tests go through the same
/// decoding as the app.
pub fn asteroids(prefix: &str, count: usize) -> Vec<Asteroid> {
    let records: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id": "{prefix}-{i}", "name": "{prefix} {i}", "diameter": 250,
                    "is_hazardous": {hazardous},
                    "orbital_data": {{"a": "1.2", "e": "0.2", "i": "4.5"}}}}"#,
                hazardous = i % 2 == 0
            )
        })
        .collect();
    parse_asteroids(&format!("[{}]", records.join(","))).expect("fixture parses")
}

/// Serves one batch per fetch, in order, repeating the last one.
/// Fetch `i` sleeps for `delays[i]` first, if given.
pub struct ScriptedSource {
    batches: Vec<Vec<Asteroid>>,
    delays: Vec<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(batches: Vec<Vec<Asteroid>>) -> Self {
        Self::with_delays(batches, Vec::new())
    }

    pub fn with_delays(batches: Vec<Vec<Asteroid>>, delays: Vec<Duration>) -> Self {
        Self {
            batches,
            delays,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of fetches started so far, readable after the source is moved.
    pub fn started(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl AsteroidSource for ScriptedSource {
    fn fetch(&self) -> Result<Vec<Asteroid>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(call) {
            thread::sleep(*delay);
        }
        let index = call.min(self.batches.len().saturating_sub(1));
        Ok(self.batches.get(index).cloned().unwrap_or_default())
    }

    fn describe(&self) -> String {
        "scripted source".to_string()
    }
}

/// Headless app running the simulation core against `source`.
pub fn simulation_app(source: impl AsteroidSource + 'static) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DataSource::new(source))
        .insert_resource(NeoRng::new(SequenceRandom::new(vec![0.13, 0.57, 0.42, 0.91])))
        .add_plugins(SimulationPlugin);
    app
}

/// Queue a reload for the next update.
pub fn request_reload(app: &mut App) {
    app.world_mut().write_message(ReloadRequest);
}

/// Update until no fetch is outstanding. Panics after a few seconds.
pub fn settle(app: &mut App) {
    // One update to turn the request into a pending load.
    app.update();
    for _ in 0..500 {
        app.update();
        let pending = app
            .world_mut()
            .query::<&PendingLoad>()
            .iter(app.world())
            .count();
        if pending == 0 {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("load did not finish");
}

/// Block until `done` holds. Panics after a few seconds.
pub fn wait_until(done: impl Fn() -> bool) {
    for _ in 0..500 {
        if done() {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("condition not reached");
}
