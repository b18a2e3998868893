//! Expedition launch: from a seed to a ready-to-step simulation state

use serde::{Deserialize, Serialize};

use crate::behavior::rules::BehaviorRule;
use crate::core::config::EngineConfig;
use crate::core::rng::SimRng;
use crate::core::types::IdAllocator;
use crate::entity::archetype::ProcessArchetype;
use crate::entity::factory::{deploy_squad, populate_malware};
use crate::sector::constants::SPAWN_REVEAL_RADIUS;
use crate::sector::fog::{reveal_area, update_visibility};
use crate::sector::generator::generate;
use crate::sector::profile::{Difficulty, DifficultyProfile, SectorSize};
use crate::sector::state::SectorConfig;
use crate::simulation::state::SimulationState;

/// Mixed into the sector seed so the simulation stream differs from the
/// generation stream
const SIMULATION_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Everything needed to start an expedition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchOptions {
    pub size: SectorSize,
    pub profile: DifficultyProfile,
    pub seed: u64,
    pub squad: Vec<ProcessArchetype>,
}

impl LaunchOptions {
    /// One process of every archetype
    pub fn new(size: SectorSize, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            size,
            profile: difficulty.profile(),
            seed,
            squad: ProcessArchetype::all().to_vec(),
        }
    }

    pub fn with_squad(mut self, squad: Vec<ProcessArchetype>) -> Self {
        self.squad = squad;
        self
    }

    pub fn with_profile(mut self, profile: DifficultyProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn sector_config(&self) -> SectorConfig {
        SectorConfig::new(self.size, self.profile, self.seed)
    }
}

/// Generate the sector, deploy the squad, seed the hostiles and open the fog
/// around the spawns
pub fn launch(
    options: &LaunchOptions,
    config: EngineConfig,
    process_rules: Vec<BehaviorRule>,
) -> SimulationState {
    let mut sector = generate(&options.sector_config());
    let mut rng = SimRng::seed_from_u64(options.seed ^ SIMULATION_SEED_SALT);
    let mut ids = IdAllocator::new();

    let spawns = sector.edges.spawn_points.clone();
    let processes = deploy_squad(&mut sector.grid, &mut ids, &options.squad, &spawns);
    let malware = populate_malware(&mut sector.grid, &mut ids, &options.profile, &spawns, &mut rng);

    for spawn in &spawns {
        reveal_area(&mut sector.grid, *spawn, SPAWN_REVEAL_RADIUS);
    }

    let mut state = SimulationState::new(sector, processes, malware, config, rng, ids)
        .with_behavior_rules(process_rules);
    let viewers = state.fog_viewers();
    update_visibility(&mut state.sector.grid, &viewers);
    state.sector.refresh_explored();

    tracing::info!(
        seed = options.seed,
        size = ?options.size,
        processes = state.processes.len(),
        malware = state.malware.len(),
        explored = state.sector.explored_percent,
        "expedition launched"
    );
    state
}
