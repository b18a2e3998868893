//! The simulation state bundle
//!
//! Everything a tick reads or writes lives here, including the RNG stream and
//! the id allocator, so a state restored from JSON continues exactly where
//! the saved one left off.

use serde::{Deserialize, Serialize};

use crate::behavior::presets::{default_malware_rule_books, default_process_rules, MalwareRuleBooks};
use crate::behavior::rules::BehaviorRule;
use crate::combat::log::CombatLog;
use crate::core::config::{EngineConfig, FogViewers};
use crate::core::error::{Result, SimError};
use crate::core::rng::SimRng;
use crate::core::types::{EntityId, IdAllocator, Tick};
use crate::entity::actor::{Actor, Faction};
use crate::sector::fog::Viewer;
use crate::sector::state::{Sector, SectorStatus};
use crate::simulation::events::SimEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub sector: Sector,
    pub processes: Vec<Actor>,
    pub malware: Vec<Actor>,
    pub combat_log: CombatLog,
    /// Shared rule book for every process
    pub behavior_rules: Vec<BehaviorRule>,
    pub malware_rules: MalwareRuleBooks,
    /// Next tick to be simulated
    pub tick: Tick,
    pub config: EngineConfig,
    pub rng: SimRng,
    pub ids: IdAllocator,
    /// Running totals across the expedition
    pub caches_collected: u32,
    pub malware_destroyed: u32,
}

impl SimulationState {
    /// Bundle a sector and its actors with the default rule books
    pub fn new(
        sector: Sector,
        processes: Vec<Actor>,
        malware: Vec<Actor>,
        config: EngineConfig,
        rng: SimRng,
        ids: IdAllocator,
    ) -> Self {
        Self {
            sector,
            processes,
            malware,
            combat_log: CombatLog::new(),
            behavior_rules: default_process_rules(),
            malware_rules: default_malware_rule_books(),
            tick: 0,
            config,
            rng,
            ids,
            caches_collected: 0,
            malware_destroyed: 0,
        }
    }

    pub fn with_behavior_rules(mut self, rules: Vec<BehaviorRule>) -> Self {
        self.behavior_rules = rules;
        self
    }

    pub fn with_malware_rules(mut self, rules: MalwareRuleBooks) -> Self {
        self.malware_rules = rules;
        self
    }

    pub fn status(&self) -> SectorStatus {
        self.sector.status
    }

    pub fn is_resolved(&self) -> bool {
        self.sector.is_resolved()
    }

    pub fn roster(&self, faction: Faction) -> &[Actor] {
        match faction {
            Faction::Process => &self.processes,
            Faction::Malware => &self.malware,
        }
    }

    pub fn roster_mut(&mut self, faction: Faction) -> &mut Vec<Actor> {
        match faction {
            Faction::Process => &mut self.processes,
            Faction::Malware => &mut self.malware,
        }
    }

    pub fn living_processes(&self) -> impl Iterator<Item = &Actor> {
        self.processes.iter().filter(|a| a.is_alive())
    }

    pub fn living_malware(&self) -> impl Iterator<Item = &Actor> {
        self.malware.iter().filter(|a| a.is_alive())
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.processes
            .iter()
            .chain(self.malware.iter())
            .find(|a| a.id == id)
    }

    /// Living actors that reveal the player's fog this tick
    pub fn fog_viewers(&self) -> Vec<Viewer> {
        let to_viewer = |a: &Actor| Viewer::new(a.position, a.effective_stats().sight_range);
        match self.config.fog_viewers {
            FogViewers::Processes => self.living_processes().map(to_viewer).collect(),
            FogViewers::AllActors => self
                .living_processes()
                .chain(self.living_malware())
                .map(to_viewer)
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a snapshot
    ///
    /// Well-formed JSON that does not describe a consistent state (for
    /// example a grid whose tile count disagrees with its dimensions) is
    /// rejected as `InvalidConfig`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                SimError::InvalidConfig(e.to_string())
            } else {
                SimError::SerdeError(e)
            }
        })
    }
}

/// What one call to `step` produced
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// The tick that was simulated
    pub tick: Tick,
    pub events: Vec<SimEvent>,
    /// Caches collected during this tick
    pub caches_collected: u32,
    /// Malware destroyed during this tick
    pub malware_destroyed: u32,
    /// Set on the tick the sector resolved
    pub expedition_result: Option<SectorStatus>,
}

impl TickReport {
    pub fn empty(tick: Tick) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::archetype::{MalwareType, ProcessArchetype};
    use crate::entity::factory::{spawn_malware, spawn_process};
    use crate::sector::grid::Grid;
    use crate::sector::position::Position;
    use crate::sector::profile::{Difficulty, SectorSize};
    use crate::sector::state::{SectorConfig, SectorEdges};

    fn state() -> SimulationState {
        let mut ids = IdAllocator::new();
        let processes = vec![spawn_process(&mut ids, ProcessArchetype::Scout, Position::new(0, 1))];
        let malware = vec![spawn_malware(&mut ids, MalwareType::Worm, Position::new(4, 1), 1.0)];
        let sector = Sector::new(
            SectorConfig::new(SectorSize::Small, Difficulty::Normal.profile(), 9),
            Grid::new(6, 3),
            SectorEdges::default(),
        );
        SimulationState::new(
            sector,
            processes,
            malware,
            EngineConfig::default(),
            SimRng::seed_from_u64(9),
            ids,
        )
    }

    #[test]
    fn test_json_round_trip_keeps_rng_stream() {
        let mut original = state();
        original.rng.next_f64();
        let mut restored = SimulationState::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.rng.next_f64(), original.rng.next_f64());
    }

    #[test]
    fn test_truncated_grid_is_rejected() {
        let mut snapshot: serde_json::Value = serde_json::from_str(&state().to_json().unwrap()).unwrap();
        let tiles = snapshot["sector"]["grid"]["tiles"].as_array_mut().unwrap();
        tiles.truncate(10);

        let restored = SimulationState::from_json(&snapshot.to_string());
        assert!(matches!(restored, Err(SimError::InvalidConfig(msg)) if msg.contains("18 tiles")));
    }

    #[test]
    fn test_garbage_snapshot_is_a_serde_error() {
        assert!(matches!(
            SimulationState::from_json("{not json"),
            Err(SimError::SerdeError(_))
        ));
    }

    #[test]
    fn test_actor_lookup_spans_rosters() {
        let state = state();
        assert_eq!(state.actor(EntityId(1)).map(|a| a.faction), Some(Faction::Process));
        assert_eq!(state.actor(EntityId(2)).map(|a| a.faction), Some(Faction::Malware));
        assert!(state.actor(EntityId(3)).is_none());
    }

    #[test]
    fn test_fog_viewer_selection() {
        let mut state = state();
        assert_eq!(state.fog_viewers().len(), 2);
        state.config.fog_viewers = FogViewers::Processes;
        assert_eq!(state.fog_viewers().len(), 1);
        state.config.fog_viewers = FogViewers::AllActors;
        state.malware[0].take_damage(1000);
        assert_eq!(state.fog_viewers().len(), 1);
    }
}
