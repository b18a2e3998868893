//! Engine configuration with documented constants
//!
//! The config travels inside the simulation state instead of living in a
//! global, so two simulations can run side by side with different tuning.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Which actors contribute to the player's fog-of-war each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FogViewers {
    /// Only living processes reveal tiles
    Processes,
    /// Every living actor with a sight range reveals tiles
    #[default]
    AllActors,
}

/// Configuration for the simulation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === PATHFINDING ===
    /// Maximum A* node expansions before a search gives up
    ///
    /// An exhausted search is reported exactly like "no path". The largest
    /// preset sector has 768 tiles, so 2000 is never hit on a solvable map.
    pub max_path_expansions: usize,

    /// Breadth-first radius used when looking for unexplored tiles
    pub explore_search_radius: u32,

    // === BEHAVIOR ===
    /// Tiles a fleeing actor tries to put between itself and the threat centroid
    pub flee_distance: i32,

    /// Manhattan range at which an attack can land
    pub attack_range: u32,

    // === COMBAT ===
    /// Symmetric damage variance as a fraction of attack (0.2 = +/-20%)
    pub combat_variance: f64,

    /// Newest combat log entries kept in the state
    pub combat_log_limit: usize,

    // === HAZARDS ===
    /// Hazard damage per tick is `hazard_level / hazard_damage_divisor`, min 1
    pub hazard_damage_divisor: u32,

    // === FOG ===
    pub fog_viewers: FogViewers,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_path_expansions: 2000,
            explore_search_radius: 24,
            flee_distance: 3,
            attack_range: 1,
            combat_variance: 0.2,
            combat_log_limit: 100,
            hazard_damage_divisor: 25,
            fog_viewers: FogViewers::AllActors,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_path_expansions == 0 {
            return Err(SimError::InvalidConfig(
                "max_path_expansions must be positive".into(),
            ));
        }

        if !(0.0..1.0).contains(&self.combat_variance) {
            return Err(SimError::InvalidConfig(format!(
                "combat_variance ({}) must be in [0, 1)",
                self.combat_variance
            )));
        }

        if self.hazard_damage_divisor == 0 {
            return Err(SimError::InvalidConfig(
                "hazard_damage_divisor must be positive".into(),
            ));
        }

        if self.attack_range == 0 || self.flee_distance <= 0 {
            return Err(SimError::InvalidConfig(
                "attack_range and flee_distance must be positive".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("combat_variance = 0.0\nfog_viewers = \"processes\"")
            .unwrap();
        assert_eq!(config.combat_variance, 0.0);
        assert_eq!(config.fog_viewers, FogViewers::Processes);
        assert_eq!(config.max_path_expansions, 2000);
    }

    #[test]
    fn test_variance_out_of_range_rejected() {
        let config = EngineConfig {
            combat_variance: 1.5,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(EngineConfig::from_toml_str("max_path_expansions = \"lots\"").is_err());
    }
}
