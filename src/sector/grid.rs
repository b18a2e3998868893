//! Sector grid: a fixed-size row-major matrix of tiles
//!
//! Dimensions never change after creation; only tile contents mutate.

use serde::{Deserialize, Serialize};

use crate::core::error::SimError;
use crate::core::types::EntityId;
use crate::sector::position::Position;
use crate::sector::tile::{Tile, TileType, Visibility};

/// The full tile grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

/// Serialized grid shape, checked before it becomes a `Grid`
#[derive(Deserialize)]
struct RawGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = SimError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = raw.width as u64 * raw.height as u64;
        if raw.tiles.len() as u64 != expected {
            return Err(SimError::InvalidConfig(format!(
                "grid {}x{} needs {} tiles, found {}",
                raw.width,
                raw.height,
                expected,
                raw.tiles.len()
            )));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            tiles: raw.tiles,
        })
    }
}

impl Grid {
    /// Create an all-empty, all-hidden grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(TileType::Empty); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check if coordinate is within grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.key(self.width) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        let i = self.index(pos)?;
        Some(&mut self.tiles[i])
    }

    /// Walkable tiles are in bounds, not blocked, and below max hazard
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Tile::is_walkable)
    }

    /// Out-of-bounds positions never block sight (the line just stops mattering)
    pub fn blocks_los(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|t| t.tile_type.blocks_los())
    }

    pub fn tile_type(&self, pos: Position) -> Option<TileType> {
        self.get(pos).map(|t| t.tile_type)
    }

    pub fn visibility(&self, pos: Position) -> Option<Visibility> {
        self.get(pos).map(|t| t.visibility)
    }

    pub fn set_tile_type(&mut self, pos: Position, tile_type: TileType) {
        if let Some(tile) = self.get_mut(pos) {
            tile.tile_type = tile_type;
            if tile_type != TileType::Hazard {
                tile.hazard_level = 0;
            }
        }
    }

    pub fn set_hazard_level(&mut self, pos: Position, level: u8) {
        if let Some(tile) = self.get_mut(pos) {
            tile.hazard_level = level.min(crate::sector::constants::MAX_HAZARD_LEVEL);
        }
    }

    /// Set fog state; a seen tile can never go back to hidden
    pub fn set_visibility(&mut self, pos: Position, visibility: Visibility) {
        if let Some(tile) = self.get_mut(pos) {
            if visibility == Visibility::Hidden && tile.visibility != Visibility::Hidden {
                return;
            }
            tile.visibility = visibility;
        }
    }

    pub fn add_occupant(&mut self, pos: Position, id: EntityId) {
        if let Some(tile) = self.get_mut(pos) {
            tile.occupants.insert(id);
        }
    }

    pub fn remove_occupant(&mut self, pos: Position, id: EntityId) {
        if let Some(tile) = self.get_mut(pos) {
            tile.occupants.remove(&id);
        }
    }

    /// Move an occupant between tiles
    pub fn relocate_occupant(&mut self, from: Position, to: Position, id: EntityId) {
        self.remove_occupant(from, id);
        self.add_occupant(to, id);
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Positions of every tile of the given type, row-major
    pub fn positions_of_type(&self, tile_type: TileType) -> Vec<Position> {
        self.positions()
            .filter(|p| self.tile_type(*p) == Some(tile_type))
            .collect()
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }

    /// Share of walkable tiles that are no longer hidden, as a percentage
    pub fn explored_percent(&self) -> f32 {
        let walkable = self.walkable_count();
        if walkable == 0 {
            return 0.0;
        }
        let seen = self
            .tiles
            .iter()
            .filter(|t| t.is_walkable() && t.visibility != Visibility::Hidden)
            .count();
        seen as f32 * 100.0 / walkable as f32
    }
}
