//! Sector: one generated grid plus its edges and expedition status

use serde::{Deserialize, Serialize};

use crate::sector::grid::Grid;
use crate::sector::position::Position;
use crate::sector::profile::{DifficultyProfile, SectorSize};

/// Everything needed to regenerate a sector bit-for-bit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorConfig {
    pub size: SectorSize,
    pub profile: DifficultyProfile,
    pub seed: u64,
}

impl SectorConfig {
    pub fn new(size: SectorSize, profile: DifficultyProfile, seed: u64) -> Self {
        Self {
            size,
            profile,
            seed,
        }
    }
}

/// Expedition status of a sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SectorStatus {
    #[default]
    Active,
    Success,
    Failed,
    Retreated,
}

impl SectorStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SectorStatus::Active)
    }
}

/// Spawn and exit points, handed to behaviors that path toward edges
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectorEdges {
    pub spawn_points: Vec<Position>,
    pub exit_points: Vec<Position>,
}

/// A generated sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub config: SectorConfig,
    pub grid: Grid,
    pub edges: SectorEdges,
    pub explored_percent: f32,
    pub status: SectorStatus,
}

impl Sector {
    pub fn new(config: SectorConfig, grid: Grid, edges: SectorEdges) -> Self {
        Self {
            config,
            grid,
            edges,
            explored_percent: 0.0,
            status: SectorStatus::Active,
        }
    }

    pub fn spawn_points(&self) -> &[Position] {
        &self.edges.spawn_points
    }

    pub fn exit_points(&self) -> &[Position] {
        &self.edges.exit_points
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn refresh_explored(&mut self) {
        self.explored_percent = self.grid.explored_percent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::profile::Difficulty;

    #[test]
    fn test_new_sector_is_active() {
        let config = SectorConfig::new(SectorSize::Small, Difficulty::Normal.profile(), 1);
        let sector = Sector::new(config, Grid::new(4, 4), SectorEdges::default());
        assert_eq!(sector.status, SectorStatus::Active);
        assert!(!sector.is_resolved());
        assert_eq!(sector.explored_percent, 0.0);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!SectorStatus::Active.is_terminal());
        assert!(SectorStatus::Success.is_terminal());
        assert!(SectorStatus::Failed.is_terminal());
        assert!(SectorStatus::Retreated.is_terminal());
    }
}
