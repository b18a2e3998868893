//! Fog of war
//!
//! Recomputed from scratch every tick: sectors are small, so there is no
//! incremental bookkeeping to get wrong.

use serde::{Deserialize, Serialize};

use crate::sector::grid::Grid;
use crate::sector::pathfinding::get_visible_positions;
use crate::sector::position::Position;
use crate::sector::tile::Visibility;

/// Anything that sees: a position plus a sight range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub position: Position,
    pub sight_range: u32,
}

impl Viewer {
    pub fn new(position: Position, sight_range: u32) -> Self {
        Self {
            position,
            sight_range,
        }
    }
}

/// Demote stale `visible` tiles to `revealed`, then mark what viewers see now
pub fn update_visibility(grid: &mut Grid, viewers: &[Viewer]) {
    let currently_visible: Vec<Position> = grid
        .positions()
        .filter(|p| grid.visibility(*p) == Some(Visibility::Visible))
        .collect();
    for pos in currently_visible {
        grid.set_visibility(pos, Visibility::Revealed);
    }

    for viewer in viewers {
        grid.set_visibility(viewer.position, Visibility::Visible);
        for pos in get_visible_positions(grid, viewer.position, viewer.sight_range) {
            grid.set_visibility(pos, Visibility::Visible);
        }
    }
}

/// One-shot reveal of every tile within Manhattan `radius`, ignoring sight lines
///
/// Tiles that are already `visible` stay visible.
pub fn reveal_area(grid: &mut Grid, center: Position, radius: u32) {
    for pos in center.positions_in_range(radius) {
        if grid.visibility(pos) == Some(Visibility::Hidden) {
            grid.set_visibility(pos, Visibility::Revealed);
        }
    }
}

/// Is this tile observed right now?
pub fn is_visible(grid: &Grid, pos: Position) -> bool {
    grid.visibility(pos) == Some(Visibility::Visible)
}
