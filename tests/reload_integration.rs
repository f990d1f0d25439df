//! Reload cycle integration tests.
//!
//! Drive the registry through real background fetches on a headless app.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use bevy::prelude::*;
use neo_flyby::loader::FailingSource;
use neo_flyby::registry::{LoadStatus, NeoBody, NeoRegistry, SelectedNeo};

use common::{ScriptedSource, asteroids, request_reload, settle, simulation_app, wait_until};

fn live_ids(app: &mut App) -> Vec<String> {
    let mut ids: Vec<String> = app
        .world_mut()
        .query::<&NeoBody>()
        .iter(app.world())
        .map(|body| body.asteroid.id.clone())
        .collect();
    ids.sort();
    ids
}

#[test]
fn test_single_reload_populates_registry() {
    let mut app = simulation_app(ScriptedSource::new(vec![asteroids("a", 5)]));
    request_reload(&mut app);
    settle(&mut app);

    assert_eq!(app.world().resource::<NeoRegistry>().len(), 5);
    assert_eq!(
        *app.world().resource::<LoadStatus>(),
        LoadStatus::Loaded { count: 5 }
    );
    assert_eq!(live_ids(&mut app).len(), 5);
}

#[test]
fn test_second_reload_replaces_first() {
    let mut app = simulation_app(ScriptedSource::new(vec![
        asteroids("first", 7),
        asteroids("second", 3),
    ]));

    request_reload(&mut app);
    settle(&mut app);
    assert_eq!(app.world().resource::<NeoRegistry>().len(), 7);

    request_reload(&mut app);
    settle(&mut app);

    assert_eq!(app.world().resource::<NeoRegistry>().len(), 3);
    let ids = live_ids(&mut app);
    assert_eq!(ids, vec!["second-0", "second-1", "second-2"]);
}

#[test]
fn test_reload_clears_selection() {
    let mut app = simulation_app(ScriptedSource::new(vec![asteroids("a", 2)]));
    request_reload(&mut app);
    settle(&mut app);

    let first = app.world().resource::<NeoRegistry>().entities()[0];
    app.world_mut().resource_mut::<SelectedNeo>().entity = Some(first);

    request_reload(&mut app);
    app.update();
    assert!(app.world().resource::<SelectedNeo>().entity.is_none());
    settle(&mut app);
    assert!(app.world().get_entity(first).is_err());
}

#[test]
fn test_slow_stale_response_is_discarded() {
    // The first fetch answers long after the second one.
    let source = ScriptedSource::with_delays(
        vec![asteroids("stale", 9), asteroids("fresh", 2)],
        vec![Duration::from_millis(300), Duration::ZERO],
    );
    let started = source.started();
    let mut app = simulation_app(source);

    request_reload(&mut app);
    app.update();
    // Generation 1 must be the fetch that draws the slow first batch.
    wait_until(|| started.load(Ordering::SeqCst) >= 1);
    request_reload(&mut app);
    settle(&mut app);

    assert_eq!(app.world().resource::<NeoRegistry>().generation(), 2);
    assert_eq!(live_ids(&mut app), vec!["fresh-0", "fresh-1"]);
}

#[test]
fn test_failed_load_leaves_registry_empty() {
    let mut app = simulation_app(FailingSource("quota exceeded".to_string()));
    request_reload(&mut app);
    settle(&mut app);

    assert!(app.world().resource::<NeoRegistry>().is_empty());
    match app.world().resource::<LoadStatus>() {
        LoadStatus::Failed(message) => assert!(message.contains("quota exceeded")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_empty_payload_is_a_successful_load() {
    let mut app = simulation_app(ScriptedSource::new(vec![Vec::new()]));
    request_reload(&mut app);
    settle(&mut app);

    assert!(app.world().resource::<NeoRegistry>().is_empty());
    assert_eq!(
        *app.world().resource::<LoadStatus>(),
        LoadStatus::Loaded { count: 0 }
    );
}
