//! Terminal condition evaluation

use crate::entity::actor::ActorStatus;
use crate::sector::state::SectorStatus;
use crate::simulation::state::SimulationState;

/// Decide whether the sector resolves this tick
///
/// Only an active sector can resolve. Victory is checked before defeat, and
/// both before a full retreat.
pub fn evaluate_outcome(state: &SimulationState) -> Option<SectorStatus> {
    if state.is_resolved() {
        return None;
    }

    if state.living_malware().next().is_none() {
        return Some(SectorStatus::Success);
    }

    if state.living_processes().next().is_none() {
        return Some(SectorStatus::Failed);
    }

    let exits = state.sector.exit_points();
    let all_extracted = state
        .living_processes()
        .all(|p| p.status == ActorStatus::Retreating && exits.contains(&p.position));
    if all_extracted {
        return Some(SectorStatus::Retreated);
    }

    None
}
