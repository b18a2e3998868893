//! Integer grid coordinates (4-connected)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tile coordinate on a sector grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance (|dx| + |dy|)
    pub fn distance(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbors in fixed order: up, right, down, left
    pub fn neighbors(&self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y),
            Position::new(self.x, self.y + 1),
            Position::new(self.x - 1, self.y),
        ]
    }

    /// Row-major integer key for a grid of the given width
    pub fn key(&self, width: u32) -> i64 {
        self.y as i64 * width as i64 + self.x as i64
    }

    /// Offset by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Integer Bresenham line from self to other (inclusive)
    pub fn line_to(&self, other: &Self) -> Vec<Position> {
        let dx = (other.x - self.x).abs();
        let dy = -(other.y - self.y).abs();
        let sx = if self.x < other.x { 1 } else { -1 };
        let sy = if self.y < other.y { 1 } else { -1 };

        let mut points = Vec::with_capacity((dx - dy + 1) as usize);
        let mut err = dx + dy;
        let (mut x, mut y) = (self.x, self.y);

        loop {
            points.push(Position::new(x, y));
            if x == other.x && y == other.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        points
    }

    /// All positions within Manhattan `range` (inclusive), unbounded by any grid
    pub fn positions_in_range(&self, range: u32) -> Vec<Position> {
        let range = range as i32;
        let mut results = Vec::new();
        for dy in -range..=range {
            let span = range - dy.abs();
            for dx in -span..=span {
                results.push(self.offset(dx, dy));
            }
        }
        results
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
