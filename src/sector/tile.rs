//! Tile types and per-tile state

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::EntityId;
use crate::sector::constants::MAX_HAZARD_LEVEL;

/// What occupies a tile's terrain slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    #[default]
    Empty,
    Blocked, // Impassable and blocks line of sight
    Hazard,  // Walkable below MAX_HAZARD_LEVEL, damages processes
    Pickup,  // Data cache, collected by stepping on it
    Spawn,
    Exit,
}

impl TileType {
    /// Does this terrain block line of sight?
    pub fn blocks_los(&self) -> bool {
        matches!(self, TileType::Blocked)
    }
}

/// Fog-of-war state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Hidden,   // Never seen
    Revealed, // Seen before, not currently observed
    Visible,  // Currently observed
}

/// A single grid tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tile {
    pub tile_type: TileType,
    pub visibility: Visibility,
    /// 0-100; a tile at MAX_HAZARD_LEVEL is impassable
    pub hazard_level: u8,
    pub occupants: BTreeSet<EntityId>,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            ..Self::default()
        }
    }

    pub fn is_walkable(&self) -> bool {
        self.tile_type != TileType::Blocked && self.hazard_level < MAX_HAZARD_LEVEL
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_defaults() {
        let tile = Tile::new(TileType::Empty);
        assert_eq!(tile.visibility, Visibility::Hidden);
        assert_eq!(tile.hazard_level, 0);
        assert!(!tile.is_occupied());
    }

    #[test]
    fn test_walkability() {
        assert!(Tile::new(TileType::Empty).is_walkable());
        assert!(Tile::new(TileType::Pickup).is_walkable());
        assert!(!Tile::new(TileType::Blocked).is_walkable());

        let mut hazard = Tile::new(TileType::Hazard);
        hazard.hazard_level = 99;
        assert!(hazard.is_walkable());
        hazard.hazard_level = 100;
        assert!(!hazard.is_walkable());
    }

    #[test]
    fn test_only_blocked_blocks_los() {
        assert!(TileType::Blocked.blocks_los());
        assert!(!TileType::Hazard.blocks_los());
        assert!(!TileType::Exit.blocks_los());
    }
}
