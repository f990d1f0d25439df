//! Asteroid data sources and background fetching.
//!
//! Fetches run on Bevy's async compute pool so the frame loop keeps
//! going while a request is outstanding. Each fetch is tagged with the
//! registry generation that requested it; see [`crate::registry`] for how
//! stale results are dropped.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on, futures_lite::future};

use crate::neo::{Asteroid, parse_asteroids};

/// Timeout applied to HTTP requests.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from loading the asteroid collection.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed asteroid data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("data service reported an error: {0}")]
    Upstream(String),
}

/// Something that can produce the current asteroid collection.
///
/// `fetch` blocks; callers run it off the main thread.
pub trait AsteroidSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Asteroid>, FetchError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Fetches JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpSource {
    pub url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl AsteroidSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Asteroid>, FetchError> {
        let response = ureq::get(&self.url)
            .timeout(HTTP_TIMEOUT)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => FetchError::Status(code),
                ureq::Error::Transport(transport) => FetchError::Http(transport.to_string()),
            })?;
        let body = response.into_string()?;
        parse_asteroids(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads JSON from a local file.
#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AsteroidSource for FileSource {
    fn fetch(&self) -> Result<Vec<Asteroid>, FetchError> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_asteroids(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed collection. Used by tests and offline runs.
#[derive(Clone, Debug, Default)]
pub struct StaticSource(pub Vec<Asteroid>);

impl AsteroidSource for StaticSource {
    fn fetch(&self) -> Result<Vec<Asteroid>, FetchError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("{} built-in asteroids", self.0.len())
    }
}

/// Always fails with an upstream error. Used by tests.
#[derive(Clone, Debug)]
pub struct FailingSource(pub String);

impl AsteroidSource for FailingSource {
    fn fetch(&self) -> Result<Vec<Asteroid>, FetchError> {
        Err(FetchError::Upstream(self.0.clone()))
    }

    fn describe(&self) -> String {
        "failing source".to_string()
    }
}

/// Resource holding the active data source.
#[derive(Resource, Clone)]
pub struct DataSource(pub Arc<dyn AsteroidSource>);

impl DataSource {
    pub fn new(source: impl AsteroidSource + 'static) -> Self {
        Self(Arc::new(source))
    }
}

/// An outstanding fetch, tagged with the generation that started it.
#[derive(Component)]
pub struct PendingLoad {
    pub generation: u64,
    pub task: Task<Result<Vec<Asteroid>, FetchError>>,
}

/// Start fetching in the background and track it as a [`PendingLoad`] entity.
pub fn start_fetch(commands: &mut Commands, source: &DataSource, generation: u64) {
    let source = Arc::clone(&source.0);
    info!(
        "Loading asteroids from {} (generation {})",
        source.describe(),
        generation
    );
    let task = AsyncComputeTaskPool::get().spawn(async move { source.fetch() });
    commands.spawn(PendingLoad { generation, task });
}

/// Take the result of a pending load if it has finished.
pub fn poll_load(pending: &mut PendingLoad) -> Option<Result<Vec<Asteroid>, FetchError>> {
    block_on(future::poll_once(&mut pending.task))
}
