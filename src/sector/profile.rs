//! Sector size presets and difficulty profiles

use serde::{Deserialize, Serialize};

use crate::sector::constants::{
    BASE_PICKUPS_LARGE, BASE_PICKUPS_MEDIUM, BASE_PICKUPS_SMALL, LARGE_SECTOR, MEDIUM_SECTOR,
    SMALL_SECTOR,
};

/// Fixed width x height presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SectorSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl SectorSize {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SectorSize::Small => SMALL_SECTOR,
            SectorSize::Medium => MEDIUM_SECTOR,
            SectorSize::Large => LARGE_SECTOR,
        }
    }

    /// Pickup count before the difficulty multiplier
    pub fn base_pickups(&self) -> u32 {
        match self {
            SectorSize::Small => BASE_PICKUPS_SMALL,
            SectorSize::Medium => BASE_PICKUPS_MEDIUM,
            SectorSize::Large => BASE_PICKUPS_LARGE,
        }
    }
}

/// Density and multiplier parameters consumed by generation and the tick loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Fraction of tiles seeded as blocked before clustering
    pub blocked_density: f64,
    /// Fraction of tiles seeded as hazard sources before spreading
    pub hazard_density: f64,
    /// Hostiles per walkable tile at deployment
    pub hostile_density: f64,
    pub pickup_multiplier: f64,
    /// Applied to malware health, attack and defense
    pub malware_stat_multiplier: f64,
    /// Hard ceiling on living malware, replication included
    pub malware_population_cap: usize,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::Normal.profile()
    }
}

/// Named difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                blocked_density: 0.10,
                hazard_density: 0.01,
                hostile_density: 0.015,
                pickup_multiplier: 1.5,
                malware_stat_multiplier: 0.8,
                malware_population_cap: 12,
            },
            Difficulty::Normal => DifficultyProfile {
                blocked_density: 0.15,
                hazard_density: 0.02,
                hostile_density: 0.025,
                pickup_multiplier: 1.0,
                malware_stat_multiplier: 1.0,
                malware_population_cap: 20,
            },
            Difficulty::Hard => DifficultyProfile {
                blocked_density: 0.20,
                hazard_density: 0.035,
                hostile_density: 0.04,
                pickup_multiplier: 0.75,
                malware_stat_multiplier: 1.3,
                malware_population_cap: 32,
            },
        }
    }
}
