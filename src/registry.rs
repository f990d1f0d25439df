//! Live collection of asteroid entities and the reload cycle.
//!
//! A reload clears the registry first, then fetches in the background and
//! repopulates in a single system run once the data arrives. Between the
//! two the animation loop simply sees no asteroids.
//!
//! Every reload bumps the generation counter. A fetch result is applied
//! only if its generation is still current, so a slow response from an
//! earlier reload can never overwrite a newer one.

use bevy::prelude::*;

use crate::loader::{DataSource, PendingLoad, poll_load, start_fetch};
use crate::neo::Asteroid;
use crate::rng::{NeoRng, RandomSource};
use crate::trajectory::{TRAIL_STEPS, Trajectory, build_trajectory, marker_radius, trail_points};
use crate::types::{ScaleSettings, ScaleSnapshot};

/// Request to discard all asteroids and load a fresh collection.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ReloadRequest;

/// An asteroid in the scene: its record and its flyby.
#[derive(Component, Clone, Debug)]
pub struct NeoBody {
    pub asteroid: Asteroid,
    pub trajectory: Trajectory,
}

/// Pickable marker sphere of an asteroid.
#[derive(Component, Clone, Copy, Debug)]
pub struct NeoMarker {
    /// Radius in render units before screen-space scaling.
    pub base_radius: f32,
}

/// Trail polyline, fixed at spawn time.
#[derive(Component, Clone, Debug)]
pub struct NeoTrail {
    pub points: Vec<Vec3>,
}

/// Currently selected asteroid, if any.
#[derive(Resource, Default, Debug)]
pub struct SelectedNeo {
    pub entity: Option<Entity>,
}

/// Progress of the most recent load, for the UI.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading { generation: u64 },
    Loaded { count: usize },
    Failed(String),
}

/// Owner of all live asteroid entities.
#[derive(Resource, Default, Debug)]
pub struct NeoRegistry {
    entities: Vec<Entity>,
    generation: u64,
}

impl NeoRegistry {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether results tagged with `generation` may still be applied.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Start a new generation. Returns it along with the entities that
    /// belonged to the previous one, which the caller must despawn.
    pub fn begin_reload(&mut self) -> (u64, Vec<Entity>) {
        self.generation += 1;
        (self.generation, std::mem::take(&mut self.entities))
    }

    fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }
}

/// Plugin owning the registry and the reload cycle.
pub struct RegistryPlugin;

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NeoRegistry>()
            .init_resource::<SelectedNeo>()
            .init_resource::<LoadStatus>()
            .add_message::<ReloadRequest>()
            .add_systems(
                Update,
                (handle_reload_requests, poll_pending_loads).chain(),
            );
    }
}

/// Spawn one asteroid entity and register it.
pub fn spawn_neo(
    commands: &mut Commands,
    registry: &mut NeoRegistry,
    asteroid: Asteroid,
    scale: ScaleSnapshot,
    rng: &mut dyn RandomSource,
) -> Entity {
    let trajectory = build_trajectory(&asteroid, scale, rng);
    let points = trail_points(trajectory.start, trajectory.end, TRAIL_STEPS);
    let marker = NeoMarker {
        base_radius: marker_radius(asteroid.diameter()),
    };
    let translation = trajectory.position().as_vec3();

    let entity = commands
        .spawn((
            Name::new(asteroid.display_name().to_string()),
            NeoBody {
                asteroid,
                trajectory,
            },
            marker,
            NeoTrail { points },
            Transform::from_translation(translation),
            Visibility::default(),
        ))
        .id();
    registry.push(entity);
    entity
}

/// Populate the registry from a completed load of `generation`.
///
/// Returns `false` without touching anything if the generation is stale.
pub fn populate_registry(
    commands: &mut Commands,
    registry: &mut NeoRegistry,
    generation: u64,
    asteroids: Vec<Asteroid>,
    scale: ScaleSnapshot,
    rng: &mut dyn RandomSource,
) -> bool {
    if !registry.is_current(generation) {
        return false;
    }
    for asteroid in asteroids {
        spawn_neo(commands, registry, asteroid, scale, rng);
    }
    true
}

/// Clear the registry and start a fetch for every burst of reload requests.
pub fn handle_reload_requests(
    mut commands: Commands,
    mut requests: MessageReader<ReloadRequest>,
    mut registry: ResMut<NeoRegistry>,
    mut selected: ResMut<SelectedNeo>,
    mut status: ResMut<LoadStatus>,
    source: Res<DataSource>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let (generation, previous) = registry.begin_reload();
    for entity in previous {
        commands.entity(entity).despawn();
    }
    selected.entity = None;

    start_fetch(&mut commands, &source, generation);
    *status = LoadStatus::Loading { generation };
}

/// Apply finished loads. Stale results are dropped; failures leave the
/// registry empty and surface through [`LoadStatus::Failed`].
pub fn poll_pending_loads(
    mut commands: Commands,
    mut pending: Query<(Entity, &mut PendingLoad)>,
    mut registry: ResMut<NeoRegistry>,
    mut status: ResMut<LoadStatus>,
    mut rng: ResMut<NeoRng>,
    scale: Res<ScaleSettings>,
) {
    for (entity, mut load) in &mut pending {
        let Some(result) = poll_load(&mut load) else {
            continue;
        };
        commands.entity(entity).despawn();

        let generation = load.generation;
        if !registry.is_current(generation) {
            info!(
                "Discarding stale asteroid load (generation {}, current {})",
                generation,
                registry.generation()
            );
            continue;
        }

        match result {
            Ok(asteroids) => {
                let count = asteroids.len();
                populate_registry(
                    &mut commands,
                    &mut registry,
                    generation,
                    asteroids,
                    scale.snapshot(),
                    rng.source(),
                );
                info!("NEOs loaded: {}", count);
                *status = LoadStatus::Loaded { count };
            }
            Err(err) => {
                error!("Failed to load NEOs: {}", err);
                *status = LoadStatus::Failed(err.to_string());
            }
        }
    }
}
