//! Tick orchestrator
//!
//! One call to [`step`] is one atomic state transition. Phases run in a fixed
//! order and each finishes before the next begins:
//!
//! 1. upkeep (action points, effect durations)
//! 2. behavior: every living actor picks and starts one command
//! 3. combat: attacking actors strike their target if still in range
//! 4. side effects: pickups, hazard exposure, replication
//! 5. fog of war and explored percentage
//! 6. terminal evaluation
//!
//! Processes act before malware, each roster in order.

use crate::behavior::actions::Command;
use crate::behavior::engine::{can_act, evaluate, Decision};
use crate::behavior::world_view::WorldView;
use crate::combat::log::CombatLogEntry;
use crate::combat::resolution::{is_in_range, strike, CombatResult};
use crate::core::types::Tick;
use crate::entity::actor::{Actor, ActorKind, ActorStatus, Faction};
use crate::sector::fog::update_visibility;
use crate::sector::grid::Grid;
use crate::sector::position::Position;
use crate::simulation::events::{EventLog, SimEventType};
use crate::simulation::movement::advance;
use crate::simulation::outcome::evaluate_outcome;
use crate::simulation::side_effects::{apply_hazards, collect_pickups, replicate_malware};
use crate::simulation::state::{SimulationState, TickReport};

const FACTION_ORDER: [Faction; 2] = [Faction::Process, Faction::Malware];

/// Advance the simulation by one tick
///
/// A sector that has already resolved is returned untouched with an empty
/// report.
pub fn step(mut state: SimulationState) -> (SimulationState, TickReport) {
    let tick = state.tick;
    if state.is_resolved() {
        tracing::warn!(tick, status = ?state.status(), "step called on a resolved sector");
        return (state, TickReport::empty(tick));
    }

    let mut events = EventLog::new();

    phase_upkeep(&mut state);
    phase_behavior(&mut state, &mut events);
    let malware_destroyed = phase_combat(&mut state, &mut events);
    let caches_collected = collect_pickups(&mut state, &mut events);
    apply_hazards(&mut state, &mut events);
    let offspring = replicate_malware(&mut state, &mut events);
    phase_fog(&mut state);

    let expedition_result = evaluate_outcome(&state);
    if let Some(status) = expedition_result {
        state.sector.status = status;
        events.push(
            SimEventType::SectorResolved { status },
            format!("sector resolved: {:?}", status),
            tick,
        );
        tracing::info!(
            tick,
            ?status,
            explored = state.sector.explored_percent,
            caches = state.caches_collected,
            "sector resolved"
        );
    }

    tracing::debug!(
        tick,
        events = events.len(),
        malware_destroyed,
        caches_collected,
        offspring,
        "tick complete"
    );

    state.tick += 1;
    let report = TickReport {
        tick,
        events: events.into_events(),
        caches_collected,
        malware_destroyed,
        expedition_result,
    };
    (state, report)
}

/// Step until the sector resolves or `max_ticks` have run
pub fn run(mut state: SimulationState, max_ticks: u64) -> (SimulationState, Vec<TickReport>) {
    let mut reports = Vec::new();
    for _ in 0..max_ticks {
        if state.is_resolved() {
            break;
        }
        let (next, report) = step(state);
        state = next;
        reports.push(report);
    }
    (state, reports)
}

fn phase_upkeep(state: &mut SimulationState) {
    for actor in state
        .processes
        .iter_mut()
        .chain(state.malware.iter_mut())
        .filter(|a| a.is_alive())
    {
        actor.reset_action_points();
        actor.tick_effects();
    }
}

fn decide(state: &mut SimulationState, actor: &Actor, tick: Tick) -> Option<Decision> {
    let SimulationState {
        sector,
        processes,
        malware,
        behavior_rules,
        malware_rules,
        config,
        ..
    } = state;

    let rules = match actor.kind {
        ActorKind::Process(_) => behavior_rules.as_mut_slice(),
        ActorKind::Malware(malware_type) => malware_rules.get_mut(&malware_type)?.as_mut_slice(),
    };
    let world = WorldView::new(
        &sector.grid,
        processes.as_slice(),
        malware.as_slice(),
        &sector.edges,
        config,
    );
    evaluate(actor, rules, &world, tick)
}

fn apply_decision(
    grid: &mut Grid,
    actor: &mut Actor,
    decision: Option<Decision>,
    enemy_positions: &[Position],
    events: &mut EventLog,
    tick: Tick,
) {
    let Some(decision) = decision else {
        actor.clear_path();
        actor.target = None;
        actor.status = ActorStatus::Idle;
        return;
    };

    events.push(
        SimEventType::RuleTriggered {
            actor: actor.id,
            rule_id: decision.rule_id.clone(),
        },
        format!("{} {} -> {}", actor.kind.name(), actor.id, decision.rule_id),
        tick,
    );

    match decision.command {
        Command::Attack { target } => {
            actor.clear_path();
            actor.target = Some(target);
            actor.status = ActorStatus::Attacking;
        }
        Command::Move { path, status } => {
            actor.target = None;
            actor.set_path(path);
            actor.status = status;
            advance(grid, actor, enemy_positions, events, tick);
        }
        Command::Hold { status } => {
            actor.clear_path();
            actor.target = None;
            actor.status = status;
        }
    }
}

fn phase_behavior(state: &mut SimulationState, events: &mut EventLog) {
    let tick = state.tick;

    for faction in FACTION_ORDER {
        for index in 0..state.roster(faction).len() {
            let actor = state.roster(faction)[index].clone();
            if !can_act(&actor) {
                continue;
            }

            let decision = decide(state, &actor, tick);
            let enemy_positions: Vec<Position> = state
                .roster(faction.opposing())
                .iter()
                .filter(|a| a.is_alive())
                .map(|a| a.position)
                .collect();

            let SimulationState {
                sector,
                processes,
                malware,
                ..
            } = &mut *state;
            let actor = match faction {
                Faction::Process => &mut processes[index],
                Faction::Malware => &mut malware[index],
            };
            apply_decision(&mut sector.grid, actor, decision, &enemy_positions, events, tick);
        }
    }
}

/// Strike the attacker's target if it is alive and in range
fn resolve_engagement(
    state: &mut SimulationState,
    attacker: &Actor,
    tick: Tick,
) -> Option<CombatResult> {
    let target = attacker.target?;
    let SimulationState {
        sector,
        processes,
        malware,
        combat_log,
        config,
        rng,
        ..
    } = state;

    let defenders = match attacker.faction {
        Faction::Process => malware,
        Faction::Malware => processes,
    };
    let defender = defenders
        .iter_mut()
        .find(|d| d.id == target && d.is_alive())?;
    if !is_in_range(attacker.position, defender.position, config.attack_range) {
        return None;
    }

    let result = strike(attacker, defender, config.combat_variance, rng);
    combat_log.push(CombatLogEntry::from_result(tick, &result), config.combat_log_limit);
    if result.defender_destroyed {
        sector.grid.remove_occupant(defender.position, defender.id);
    }
    Some(result)
}

/// Returns the number of malware destroyed
fn phase_combat(state: &mut SimulationState, events: &mut EventLog) -> u32 {
    let tick = state.tick;
    let mut malware_destroyed = 0;

    for faction in FACTION_ORDER {
        for index in 0..state.roster(faction).len() {
            let attacker = state.roster(faction)[index].clone();
            if !attacker.is_alive() || attacker.status != ActorStatus::Attacking {
                continue;
            }

            let Some(result) = resolve_engagement(state, &attacker, tick) else {
                // Target gone or out of reach
                let actor = &mut state.roster_mut(faction)[index];
                actor.status = ActorStatus::Idle;
                actor.target = None;
                continue;
            };

            events.push(
                SimEventType::AttackResolved {
                    attacker: result.attacker,
                    defender: result.defender,
                    damage: result.damage,
                },
                format!("{} hit {} for {}", result.attacker, result.defender, result.damage),
                tick,
            );
            if result.defender_destroyed {
                events.push(
                    SimEventType::ActorDestroyed {
                        actor: result.defender,
                    },
                    format!("{} destroyed by {}", result.defender, result.attacker),
                    tick,
                );
                if faction == Faction::Process {
                    malware_destroyed += 1;
                }
            }
        }
    }

    state.malware_destroyed += malware_destroyed;
    malware_destroyed
}

fn phase_fog(state: &mut SimulationState) {
    let viewers = state.fog_viewers();
    update_visibility(&mut state.sector.grid, &viewers);
    state.sector.refresh_explored();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::rules::{Action, BehaviorRule, Condition, TargetPriority};
    use crate::core::config::EngineConfig;
    use crate::core::rng::SimRng;
    use crate::core::types::{EntityId, IdAllocator};
    use crate::entity::archetype::{MalwareType, ProcessArchetype};
    use crate::entity::factory::{spawn_malware, spawn_process};
    use crate::sector::profile::{Difficulty, SectorSize};
    use crate::sector::state::{Sector, SectorConfig, SectorEdges, SectorStatus};

    fn duel(process_at: Position, malware_at: Position) -> SimulationState {
        let mut ids = IdAllocator::new();
        let mut grid = Grid::new(8, 8);
        let process = spawn_process(&mut ids, ProcessArchetype::Guardian, process_at);
        let malware = spawn_malware(&mut ids, MalwareType::Trojan, malware_at, 1.0);
        grid.add_occupant(process.position, process.id);
        grid.add_occupant(malware.position, malware.id);
        let sector = Sector::new(
            SectorConfig::new(SectorSize::Small, Difficulty::Normal.profile(), 4),
            grid,
            SectorEdges {
                spawn_points: vec![Position::new(0, 3)],
                exit_points: vec![Position::new(7, 3)],
            },
        );
        SimulationState::new(
            sector,
            vec![process],
            vec![malware],
            EngineConfig::default(),
            SimRng::seed_from_u64(4),
            ids,
        )
    }

    #[test]
    fn test_step_advances_tick_and_fog() {
        let state = duel(Position::new(1, 3), Position::new(6, 3));
        let (state, report) = step(state);
        assert_eq!(report.tick, 0);
        assert_eq!(state.tick, 1);
        assert!(state.sector.explored_percent > 0.0);
    }

    #[test]
    fn test_adjacent_actors_trade_blows() {
        let state = duel(Position::new(3, 3), Position::new(4, 3));
        let (state, report) = step(state);

        let attacks = report
            .events
            .iter()
            .filter(|e| matches!(e.event_type, SimEventType::AttackResolved { .. }))
            .count();
        assert_eq!(attacks, 2);
        assert_eq!(state.combat_log.len(), 2);
        assert!(state.processes[0].stats.health < state.processes[0].stats.max_health);
        assert!(state.malware[0].stats.health < state.malware[0].stats.max_health);
    }

    #[test]
    fn test_resolved_sector_is_untouched() {
        let mut state = duel(Position::new(3, 3), Position::new(4, 3));
        state.sector.status = SectorStatus::Failed;
        let before = state.clone();

        let (after, report) = step(state);
        assert_eq!(after, before);
        assert!(report.events.is_empty());
        assert_eq!(report.expedition_result, None);
    }

    #[test]
    fn test_identical_states_step_identically() {
        let a = duel(Position::new(2, 3), Position::new(5, 3));
        let b = a.clone();
        let (a, report_a) = run(a, 6);
        let (b, report_b) = run(b, 6);
        assert_eq!(a, b);
        assert_eq!(report_a, report_b);
    }

    #[test]
    fn test_out_of_range_attack_is_dropped() {
        let mut state = duel(Position::new(1, 3), Position::new(6, 3));
        state.processes[0].status = ActorStatus::Attacking;
        state.processes[0].target = Some(EntityId(2));
        let mut events = EventLog::new();

        assert_eq!(phase_combat(&mut state, &mut events), 0);
        assert_eq!(state.processes[0].status, ActorStatus::Idle);
        assert!(events.is_empty());
    }

    #[test]
    fn test_upkeep_resets_points_and_ages_effects() {
        let mut state = duel(Position::new(1, 3), Position::new(6, 3));
        state.processes[0].stats.action_points = 0;
        state.processes[0].apply_effect(crate::entity::stats::StatusEffect::corrupted());

        phase_upkeep(&mut state);
        assert_eq!(state.processes[0].stats.action_points, state.processes[0].stats.max_action_points);
        assert_eq!(state.processes[0].status_effects[0].remaining_duration, 2);
    }

    #[test]
    fn test_killing_blow_is_counted() {
        let mut state = duel(Position::new(3, 3), Position::new(4, 3));
        state.malware[0].stats.health = 1;
        state.behavior_rules = vec![BehaviorRule::new(
            "strike",
            1,
            Condition::EnemyAdjacent,
            Action::Attack {
                target: TargetPriority::Nearest,
            },
        )];

        let (state, report) = step(state);
        assert_eq!(report.malware_destroyed, 1);
        assert_eq!(report.expedition_result, Some(SectorStatus::Success));
        assert_eq!(state.status(), SectorStatus::Success);
        assert_eq!(state.malware_destroyed, 1);
        assert!(state
            .sector
            .grid
            .get(Position::new(4, 3))
            .is_some_and(|t| t.occupants.is_empty()));
    }

    #[test]
    fn test_malware_reveal_their_own_tiles() {
        let mut state = duel(Position::new(0, 0), Position::new(7, 7));
        state.behavior_rules = vec![BehaviorRule::new("stand", 1, Condition::Always, Action::Hold)];
        let mut processes_only = state.clone();
        processes_only.config.fog_viewers = crate::core::config::FogViewers::Processes;

        let (state, _) = step(state);
        assert_eq!(state.malware[0].position, Position::new(7, 7));
        assert!(crate::sector::fog::is_visible(&state.sector.grid, Position::new(7, 7)));

        let (processes_only, _) = step(processes_only);
        assert_eq!(
            processes_only.sector.grid.visibility(Position::new(7, 7)),
            Some(crate::sector::tile::Visibility::Hidden)
        );
    }
}
