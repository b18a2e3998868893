//! Sector model - the tile grid, its generation, and spatial queries
//!
//! Sectors are small and dense: blocked tiles shape every route, sight lines
//! are short, and hazards punish careless paths.

pub mod constants;
pub mod fog;
pub mod generator;
pub mod grid;
pub mod pathfinding;
pub mod position;
pub mod profile;
pub mod state;
pub mod tile;

// Re-exports for convenient access
pub use fog::{is_visible, reveal_area, update_visibility, Viewer};
pub use generator::generate;
pub use grid::Grid;
pub use pathfinding::{
    find_path, get_next_step, get_reachable_positions, get_visible_positions, has_line_of_sight,
    is_reachable,
};
pub use position::Position;
pub use profile::{Difficulty, DifficultyProfile, SectorSize};
pub use state::{Sector, SectorConfig, SectorEdges, SectorStatus};
pub use tile::{Tile, TileType, Visibility};
