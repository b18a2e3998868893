//! Actor construction: squads, hostile population and replication offspring
//!
//! Every actor gets its id from the caller's `IdAllocator`, so ids are
//! monotonically increasing within one simulation and never shared between two.

use crate::core::rng::SimRng;
use crate::core::types::IdAllocator;
use crate::entity::actor::{Actor, ActorKind};
use crate::entity::archetype::{MalwareType, ProcessArchetype};
use crate::sector::constants::MALWARE_MIN_SPAWN_DISTANCE;
use crate::sector::grid::Grid;
use crate::sector::position::Position;
use crate::sector::profile::DifficultyProfile;
use crate::sector::tile::TileType;

/// Create a process with its archetype's base stats
pub fn spawn_process(ids: &mut IdAllocator, archetype: ProcessArchetype, position: Position) -> Actor {
    let kind = ActorKind::Process(archetype);
    Actor::new(ids.allocate(), kind, position, kind.base_stats())
}

/// Create a malware actor, its durable stats scaled by the difficulty multiplier
pub fn spawn_malware(
    ids: &mut IdAllocator,
    malware_type: MalwareType,
    position: Position,
    stat_multiplier: f64,
) -> Actor {
    let kind = ActorKind::Malware(malware_type);
    let stats = kind.base_stats().scaled(stat_multiplier);
    Actor::new(ids.allocate(), kind, position, stats)
}

/// Place one process per archetype on the spawn points, round-robin
///
/// Returns an empty squad when the sector has no spawn points.
pub fn deploy_squad(
    grid: &mut Grid,
    ids: &mut IdAllocator,
    archetypes: &[ProcessArchetype],
    spawn_points: &[Position],
) -> Vec<Actor> {
    if spawn_points.is_empty() {
        return Vec::new();
    }

    archetypes
        .iter()
        .enumerate()
        .map(|(i, archetype)| {
            let position = spawn_points[i % spawn_points.len()];
            let actor = spawn_process(ids, *archetype, position);
            grid.add_occupant(position, actor.id);
            actor
        })
        .collect()
}

/// Number of hostiles a sector starts with
pub fn hostile_count(grid: &Grid, profile: &DifficultyProfile) -> usize {
    let target = (grid.walkable_count() as f64 * profile.hostile_density).round() as usize;
    target.max(1).min(profile.malware_population_cap.max(1))
}

/// Scatter the starting hostiles over empty tiles far from every spawn
///
/// Best-effort: a sector with fewer eligible tiles than the target gets fewer
/// hostiles.
pub fn populate_malware(
    grid: &mut Grid,
    ids: &mut IdAllocator,
    profile: &DifficultyProfile,
    spawn_points: &[Position],
    rng: &mut SimRng,
) -> Vec<Actor> {
    let target = hostile_count(grid, profile);
    let mut candidates: Vec<Position> = grid
        .positions()
        .filter(|p| {
            grid.tile_type(*p) == Some(TileType::Empty)
                && grid.get(*p).is_some_and(|t| !t.is_occupied())
                && spawn_points
                    .iter()
                    .all(|s| s.distance(p) >= MALWARE_MIN_SPAWN_DISTANCE)
        })
        .collect();

    let types = MalwareType::all();
    let mut hostiles = Vec::with_capacity(target);
    while hostiles.len() < target && !candidates.is_empty() {
        let position = candidates.swap_remove(rng.index(candidates.len()));
        let malware_type = types[rng.index(types.len())];
        let actor = spawn_malware(ids, malware_type, position, profile.malware_stat_multiplier);
        grid.add_occupant(position, actor.id);
        hostiles.push(actor);
    }

    tracing::debug!(target, placed = hostiles.len(), "populated malware");
    hostiles
}

/// Offspring of a self-replicating parent: same type, fresh health
pub fn replicate(ids: &mut IdAllocator, parent: &Actor, position: Position) -> Actor {
    let mut stats = parent.stats;
    stats.health = stats.max_health;
    stats.action_points = stats.max_action_points;
    Actor::new(ids.allocate(), parent.kind, position, stats)
}
