//! Phase 3: pickups, hazard exposure and malware replication

use crate::entity::actor::Actor;
use crate::entity::factory::replicate;
use crate::entity::stats::StatusEffect;
use crate::sector::position::Position;
use crate::sector::tile::TileType;
use crate::simulation::events::{EventLog, SimEventType};
use crate::simulation::state::SimulationState;

/// Processes standing on a cache collect it; the tile becomes empty
///
/// Returns the number of caches collected.
pub fn collect_pickups(state: &mut SimulationState, events: &mut EventLog) -> u32 {
    let tick = state.tick;
    let mut collected = 0;

    for process in state.processes.iter_mut().filter(|a| a.is_alive()) {
        if state.sector.grid.tile_type(process.position) != Some(TileType::Pickup) {
            continue;
        }
        state.sector.grid.set_tile_type(process.position, TileType::Empty);
        process.apply_effect(StatusEffect::overclocked());
        collected += 1;
        events.push(
            SimEventType::CacheCollected {
                actor: process.id,
                position: process.position,
            },
            format!("{} collected a cache at {}", process.id, process.position),
            tick,
        );
    }

    state.caches_collected += collected;
    collected
}

/// Hazard damage for a tile of the given level
pub fn hazard_damage(level: u8, divisor: u32) -> u32 {
    (level as u32 / divisor.max(1)).max(1)
}

/// Processes standing on hazard tiles take damage and get corrupted
pub fn apply_hazards(state: &mut SimulationState, events: &mut EventLog) {
    let tick = state.tick;
    let divisor = state.config.hazard_damage_divisor;

    for process in state.processes.iter_mut().filter(|a| a.is_alive()) {
        let Some(tile) = state.sector.grid.get(process.position) else {
            continue;
        };
        if tile.tile_type != TileType::Hazard {
            continue;
        }

        let damage = hazard_damage(tile.hazard_level, divisor);
        let destroyed = process.take_damage(damage);
        events.push(
            SimEventType::HazardExposure {
                actor: process.id,
                damage,
            },
            format!("{} took {} hazard damage at {}", process.id, damage, process.position),
            tick,
        );

        if destroyed {
            state.sector.grid.remove_occupant(process.position, process.id);
            events.push(
                SimEventType::ActorDestroyed { actor: process.id },
                format!("{} was destroyed by corruption", process.id),
                tick,
            );
        } else {
            process.apply_effect(StatusEffect::corrupted());
        }
    }
}

/// Free tiles next to `origin` where offspring can appear
fn free_neighbors(state: &SimulationState, origin: Position) -> Vec<Position> {
    origin
        .neighbors()
        .into_iter()
        .filter(|p| {
            state.sector.grid.is_walkable(*p)
                && state.sector.grid.get(*p).is_some_and(|t| !t.is_occupied())
        })
        .collect()
}

/// Self-replicating malware count down and split into a free neighbor tile
///
/// Replication is capped by the difficulty's population limit. A parent that
/// is due but blocked (no room, cap reached) tries again next tick. Offspring
/// join the roster after every parent has been considered.
///
/// Returns the number of offspring created.
pub fn replicate_malware(state: &mut SimulationState, events: &mut EventLog) -> usize {
    let tick = state.tick;
    let cap = state.sector.config.profile.malware_population_cap;
    let mut living = state.living_malware().count();
    let mut offspring: Vec<Actor> = Vec::new();

    for index in 0..state.malware.len() {
        let parent = &mut state.malware[index];
        if !parent.is_alive() {
            continue;
        }
        let Some(interval) = parent.kind.malware_type().and_then(|t| t.replication_interval()) else {
            continue;
        };
        let cooldown = parent.replication_cooldown.unwrap_or(interval).saturating_sub(1);
        parent.replication_cooldown = Some(cooldown);
        if cooldown > 0 || living >= cap {
            continue;
        }

        let origin = parent.position;
        let room: Vec<Position> = free_neighbors(state, origin)
            .into_iter()
            .filter(|p| offspring.iter().all(|o| o.position != *p))
            .collect();
        if room.is_empty() {
            continue;
        }

        let position = room[state.rng.index(room.len())];
        let child = replicate(&mut state.ids, &state.malware[index], position);
        state.malware[index].replication_cooldown = Some(interval);
        state.sector.grid.add_occupant(position, child.id);
        events.push(
            SimEventType::MalwareReplicated {
                parent: state.malware[index].id,
                offspring: child.id,
            },
            format!(
                "{} {} replicated into {} at {}",
                child.kind.name(),
                state.malware[index].id,
                child.id,
                position
            ),
            tick,
        );
        offspring.push(child);
        living += 1;
    }

    let created = offspring.len();
    state.malware.extend(offspring);
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::core::rng::SimRng;
    use crate::core::types::IdAllocator;
    use crate::entity::actor::ActorStatus;
    use crate::entity::archetype::{MalwareType, ProcessArchetype};
    use crate::entity::factory::{spawn_malware, spawn_process};
    use crate::sector::grid::Grid;
    use crate::sector::profile::{Difficulty, SectorSize};
    use crate::sector::state::{Sector, SectorConfig, SectorEdges};

    fn state_with(processes: &[(ProcessArchetype, Position)], malware: &[(MalwareType, Position)]) -> SimulationState {
        let mut ids = IdAllocator::new();
        let mut grid = Grid::new(8, 8);
        let processes: Vec<Actor> = processes
            .iter()
            .map(|(a, p)| spawn_process(&mut ids, *a, *p))
            .collect();
        let malware: Vec<Actor> = malware
            .iter()
            .map(|(t, p)| spawn_malware(&mut ids, *t, *p, 1.0))
            .collect();
        for actor in processes.iter().chain(malware.iter()) {
            grid.add_occupant(actor.position, actor.id);
        }
        let sector = Sector::new(
            SectorConfig::new(SectorSize::Small, Difficulty::Normal.profile(), 1),
            grid,
            SectorEdges::default(),
        );
        SimulationState::new(
            sector,
            processes,
            malware,
            EngineConfig::default(),
            SimRng::seed_from_u64(1),
            ids,
        )
    }

    #[test]
    fn test_pickup_collected_once() {
        let at = Position::new(2, 2);
        let mut state = state_with(&[(ProcessArchetype::Striker, at)], &[]);
        state.sector.grid.set_tile_type(at, TileType::Pickup);
        let mut events = EventLog::new();

        assert_eq!(collect_pickups(&mut state, &mut events), 1);
        assert_eq!(state.sector.grid.tile_type(at), Some(TileType::Empty));
        assert!(state.processes[0].has_effect("overclocked"));
        assert_eq!(collect_pickups(&mut state, &mut events), 0);
        assert_eq!(state.caches_collected, 1);
    }

    #[test]
    fn test_hazard_damage_floor() {
        assert_eq!(hazard_damage(10, 25), 1);
        assert_eq!(hazard_damage(80, 25), 3);
        assert_eq!(hazard_damage(0, 25), 1);
    }

    #[test]
    fn test_hazard_exposure_corrupts() {
        let at = Position::new(3, 3);
        let mut state = state_with(&[(ProcessArchetype::Striker, at)], &[]);
        state.sector.grid.set_tile_type(at, TileType::Hazard);
        state.sector.grid.set_hazard_level(at, 50);
        let mut events = EventLog::new();

        apply_hazards(&mut state, &mut events);
        assert_eq!(state.processes[0].stats.health, 28);
        assert!(state.processes[0].has_effect("corrupted"));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_hazard_can_destroy() {
        let at = Position::new(3, 3);
        let mut state = state_with(&[(ProcessArchetype::Scout, at)], &[]);
        state.sector.grid.set_tile_type(at, TileType::Hazard);
        state.sector.grid.set_hazard_level(at, 75);
        state.processes[0].stats.health = 2;
        let mut events = EventLog::new();

        apply_hazards(&mut state, &mut events);
        assert_eq!(state.processes[0].status, ActorStatus::Destroyed);
        assert!(state.sector.grid.get(at).is_some_and(|t| t.occupants.is_empty()));
    }

    #[test]
    fn test_worm_replicates_on_schedule() {
        let mut state = state_with(&[], &[(MalwareType::Worm, Position::new(4, 4))]);
        let mut events = EventLog::new();

        for _ in 0..3 {
            assert_eq!(replicate_malware(&mut state, &mut events), 0);
        }
        assert_eq!(replicate_malware(&mut state, &mut events), 1);
        assert_eq!(state.malware.len(), 2);
        assert_eq!(state.malware[0].replication_cooldown, Some(4));

        let child = &state.malware[1];
        assert_eq!(child.position.distance(&Position::new(4, 4)), 1);
        assert!(state.sector.grid.get(child.position).is_some_and(|t| t.occupants.contains(&child.id)));
    }

    #[test]
    fn test_population_cap_holds() {
        let mut state = state_with(&[], &[(MalwareType::Worm, Position::new(4, 4))]);
        state.sector.config.profile.malware_population_cap = 1;
        let mut events = EventLog::new();

        for _ in 0..12 {
            replicate_malware(&mut state, &mut events);
        }
        assert_eq!(state.malware.len(), 1);
        assert_eq!(state.malware[0].replication_cooldown, Some(0));
    }

    #[test]
    fn test_non_replicators_never_split() {
        let mut state = state_with(&[], &[(MalwareType::Trojan, Position::new(4, 4))]);
        let mut events = EventLog::new();
        for _ in 0..20 {
            replicate_malware(&mut state, &mut events);
        }
        assert_eq!(state.malware.len(), 1);
    }
}
