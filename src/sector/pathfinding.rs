//! A* pathfinding, reachability and line-of-sight queries
//!
//! 4-connected movement with unit step costs and a Manhattan heuristic
//! (admissible and consistent on this topology). Open-set ties are broken by
//! lower heuristic, then by insertion order; any consistent tie-break yields
//! a shortest path, so callers must not rely on which one.

use ahash::{AHashMap, AHashSet};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::sector::grid::Grid;
use crate::sector::position::Position;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    pos: Position,
    f_cost: u32, // g_cost + heuristic
    h_cost: u32,
    order: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path using A*
///
/// Returns the full path including `start` and `end`, or `None` when either
/// endpoint is out of bounds, `end` is not walkable, no route exists, or the
/// search expands more than `max_expansions` nodes.
pub fn find_path(
    grid: &Grid,
    start: Position,
    end: Position,
    max_expansions: usize,
) -> Option<Vec<Position>> {
    if !grid.in_bounds(start) || !grid.in_bounds(end) || !grid.is_walkable(end) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<Position, Position> = AHashMap::new();
    let mut g_scores: AHashMap<Position, u32> = AHashMap::new();
    let mut closed: AHashSet<Position> = AHashSet::new();
    let mut order = 0u64;
    let mut expansions = 0usize;

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        pos: start,
        f_cost: start.distance(&end),
        h_cost: start.distance(&end),
        order,
    });

    while let Some(current) = open_set.pop() {
        if current.pos == end {
            return Some(reconstruct_path(&came_from, current.pos));
        }
        if !closed.insert(current.pos) {
            continue; // Stale heap entry
        }

        expansions += 1;
        if expansions > max_expansions {
            tracing::trace!(%start, %end, max_expansions, "path search exhausted");
            return None;
        }

        let current_g = g_scores.get(&current.pos).copied().unwrap_or(u32::MAX);

        for neighbor in current.pos.neighbors() {
            if !grid.is_walkable(neighbor) || closed.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.pos);
                g_scores.insert(neighbor, tentative_g);

                order += 1;
                let h_cost = neighbor.distance(&end);
                open_set.push(PathNode {
                    pos: neighbor,
                    f_cost: tentative_g + h_cost,
                    h_cost,
                    order,
                });
            }
        }
    }

    None // No path found
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &AHashMap<Position, Position>, mut current: Position) -> Vec<Position> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// The tile to move into next on the way from `start` to `end`
pub fn get_next_step(
    grid: &Grid,
    start: Position,
    end: Position,
    max_expansions: usize,
) -> Option<Position> {
    find_path(grid, start, end, max_expansions).and_then(|path| path.get(1).copied())
}

/// Bounded breadth-first exploration over walkable tiles
///
/// Returns every position reachable within `max_distance` steps, `start`
/// included, in non-decreasing step distance.
pub fn get_reachable_positions(grid: &Grid, start: Position, max_distance: u32) -> Vec<Position> {
    if !grid.in_bounds(start) {
        return Vec::new();
    }

    let mut visited: AHashSet<Position> = AHashSet::new();
    let mut queue = VecDeque::new();
    let mut result = Vec::new();

    visited.insert(start);
    queue.push_back((start, 0u32));

    while let Some((pos, dist)) = queue.pop_front() {
        result.push(pos);
        if dist >= max_distance {
            continue;
        }
        for neighbor in pos.neighbors() {
            if grid.is_walkable(neighbor) && visited.insert(neighbor) {
                queue.push_back((neighbor, dist + 1));
            }
        }
    }

    result
}

/// Unbounded reachability test between two tiles
pub fn is_reachable(grid: &Grid, from: Position, to: Position) -> bool {
    if !grid.in_bounds(from) || !grid.is_walkable(to) {
        return false;
    }

    let mut visited: AHashSet<Position> = AHashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);

    while let Some(pos) = queue.pop_front() {
        if pos == to {
            return true;
        }
        for neighbor in pos.neighbors() {
            if grid.is_walkable(neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    false
}

/// Bresenham line-of-sight check
///
/// Only tiles strictly between the endpoints can block: the viewer's own tile
/// is exempt, and a blocked target is itself visible.
pub fn has_line_of_sight(grid: &Grid, from: Position, to: Position) -> bool {
    let line = from.line_to(&to);

    for pos in line.iter().skip(1).take(line.len().saturating_sub(2)) {
        if grid.blocks_los(*pos) {
            return false;
        }
    }

    true
}

/// Positions within Manhattan `range` that also have line of sight from `from`
pub fn get_visible_positions(grid: &Grid, from: Position, range: u32) -> Vec<Position> {
    from.positions_in_range(range)
        .into_iter()
        .filter(|pos| grid.in_bounds(*pos) && has_line_of_sight(grid, from, *pos))
        .collect()
}
