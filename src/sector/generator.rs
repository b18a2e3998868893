//! Procedural sector generation
//!
//! Everything is drawn from one `SimRng` seeded by the config, in a fixed
//! order, so the same (size, profile, seed) always yields the same grid.
//! Placement passes are best-effort: a cramped sector simply ends up with
//! fewer blocked tiles, hazards or pickups than targeted.

use crate::core::rng::SimRng;
use crate::sector::constants::{
    CLUSTER_CHANCE, EDGE_JITTER, EXIT_POINT_COUNT, HAZARD_BASE_LEVEL_MAX, HAZARD_BASE_LEVEL_MIN,
    HAZARD_MIN_SPAWN_DISTANCE, HAZARD_SPREAD_CHANCE, HAZARD_SPREAD_FALLOFF,
    PICKUP_ATTEMPTS_PER_TARGET, PICKUP_MIN_EDGE_DISTANCE, SPAWN_POINT_COUNT,
};
use crate::sector::grid::Grid;
use crate::sector::pathfinding::is_reachable;
use crate::sector::position::Position;
use crate::sector::state::{Sector, SectorConfig, SectorEdges};
use crate::sector::tile::TileType;

/// Hazard intensity below which spreading stops
const MIN_SPREAD_LEVEL: f64 = 10.0;

/// Generate a sector from its config
pub fn generate(config: &SectorConfig) -> Sector {
    let (width, height) = config.size.dimensions();
    let mut rng = SimRng::seed_from_u64(config.seed);
    let mut grid = Grid::new(width, height);

    scatter_blocked(&mut grid, config.profile.blocked_density, &mut rng);

    let spawn_points = place_edge_points(&mut grid, 0, SPAWN_POINT_COUNT, TileType::Spawn, &mut rng);
    let exit_points = place_edge_points(
        &mut grid,
        width as i32 - 1,
        EXIT_POINT_COUNT,
        TileType::Exit,
        &mut rng,
    );

    let hazards = place_hazards(&mut grid, config.profile.hazard_density, &spawn_points, &mut rng);

    let pickup_target =
        (config.size.base_pickups() as f64 * config.profile.pickup_multiplier).round().max(1.0) as u32;
    let pickups = place_pickups(&mut grid, pickup_target, &spawn_points, &exit_points, &mut rng);

    let carved = ensure_connectivity(&mut grid, spawn_points[0], exit_points[0]);

    tracing::debug!(
        seed = config.seed,
        width,
        height,
        blocked = grid.positions_of_type(TileType::Blocked).len(),
        hazards,
        pickups,
        carved,
        "generated sector"
    );

    Sector::new(
        *config,
        grid,
        SectorEdges {
            spawn_points,
            exit_points,
        },
    )
}

fn random_position(grid: &Grid, rng: &mut SimRng) -> Position {
    Position::new(
        rng.range_inclusive(0, grid.width() as i32 - 1),
        rng.range_inclusive(0, grid.height() as i32 - 1),
    )
}

/// Scatter blocked tiles; each placement may drag one neighbor along with it
fn scatter_blocked(grid: &mut Grid, density: f64, rng: &mut SimRng) {
    let target = (grid.tiles().len() as f64 * density).round() as usize;
    let max_attempts = target * 10;
    let mut placed = 0;
    let mut attempts = 0;

    while placed < target && attempts < max_attempts {
        attempts += 1;
        let pos = random_position(grid, rng);
        if grid.tile_type(pos) != Some(TileType::Empty) {
            continue;
        }
        grid.set_tile_type(pos, TileType::Blocked);
        placed += 1;

        if placed < target && rng.chance(CLUSTER_CHANCE) {
            let neighbor = pos.neighbors()[rng.index(4)];
            if grid.tile_type(neighbor) == Some(TileType::Empty) {
                grid.set_tile_type(neighbor, TileType::Blocked);
                placed += 1;
            }
        }
    }
}

/// Evenly spaced points down one vertical edge, jittered and kept off the corners
fn place_edge_points(
    grid: &mut Grid,
    x: i32,
    count: u32,
    tile_type: TileType,
    rng: &mut SimRng,
) -> Vec<Position> {
    let height = grid.height() as i32;
    let (min_y, max_y) = if height >= 3 { (1, height - 2) } else { (0, height - 1) };
    let count = count.max(1) as i32;

    let mut points = Vec::with_capacity(count as usize);
    for i in 0..count {
        let base_y = (i + 1) * height / (count + 1);
        let y = (base_y + rng.range_inclusive(-EDGE_JITTER, EDGE_JITTER)).clamp(min_y, max_y);
        let pos = Position::new(x, y);
        if points.contains(&pos) {
            continue;
        }
        grid.set_tile_type(pos, tile_type);
        points.push(pos);
    }
    points
}

fn far_from_all(pos: Position, anchors: &[Position], min_distance: u32) -> bool {
    anchors.iter().all(|a| a.distance(&pos) >= min_distance)
}

/// Hazard sources away from spawns, spreading outward at falling intensity
///
/// Returns the number of hazard tiles created.
fn place_hazards(grid: &mut Grid, density: f64, spawns: &[Position], rng: &mut SimRng) -> usize {
    let target = (grid.tiles().len() as f64 * density).round() as usize;
    let max_attempts = target * 20;
    let mut sources = 0;
    let mut attempts = 0;
    let mut created = 0;

    while sources < target && attempts < max_attempts {
        attempts += 1;
        let pos = random_position(grid, rng);
        if grid.tile_type(pos) != Some(TileType::Empty)
            || !far_from_all(pos, spawns, HAZARD_MIN_SPAWN_DISTANCE)
        {
            continue;
        }

        let level = rng.range_inclusive(HAZARD_BASE_LEVEL_MIN, HAZARD_BASE_LEVEL_MAX) as f64;
        grid.set_tile_type(pos, TileType::Hazard);
        grid.set_hazard_level(pos, level as u8);
        sources += 1;
        created += 1;

        let mut frontier = vec![(pos, level)];
        while let Some((origin, origin_level)) = frontier.pop() {
            let spread_level = origin_level * HAZARD_SPREAD_FALLOFF;
            if spread_level < MIN_SPREAD_LEVEL {
                continue;
            }
            for neighbor in origin.neighbors() {
                if !rng.chance(HAZARD_SPREAD_CHANCE) {
                    continue;
                }
                if grid.tile_type(neighbor) != Some(TileType::Empty)
                    || !far_from_all(neighbor, spawns, HAZARD_MIN_SPAWN_DISTANCE)
                {
                    continue;
                }
                grid.set_tile_type(neighbor, TileType::Hazard);
                grid.set_hazard_level(neighbor, spread_level as u8);
                created += 1;
                frontier.push((neighbor, spread_level));
            }
        }
    }

    created
}

/// Pickups away from both edges, bounded by an attempts guard
fn place_pickups(
    grid: &mut Grid,
    target: u32,
    spawns: &[Position],
    exits: &[Position],
    rng: &mut SimRng,
) -> u32 {
    let max_attempts = target * PICKUP_ATTEMPTS_PER_TARGET;
    let mut placed = 0;
    let mut attempts = 0;

    while placed < target && attempts < max_attempts {
        attempts += 1;
        let pos = random_position(grid, rng);
        if grid.tile_type(pos) != Some(TileType::Empty)
            || !far_from_all(pos, spawns, PICKUP_MIN_EDGE_DISTANCE)
            || !far_from_all(pos, exits, PICKUP_MIN_EDGE_DISTANCE)
        {
            continue;
        }
        grid.set_tile_type(pos, TileType::Pickup);
        placed += 1;
    }

    placed
}

/// Carve an L-shaped corridor (horizontal, then vertical) if the exit is cut off
///
/// Returns the number of blocked tiles cleared.
fn ensure_connectivity(grid: &mut Grid, from: Position, to: Position) -> usize {
    if is_reachable(grid, from, to) {
        return 0;
    }

    let mut cleared = 0;
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();

    let mut cursor = from;
    let mut carve = |grid: &mut Grid, pos: Position| {
        if grid.tile_type(pos) == Some(TileType::Blocked) {
            grid.set_tile_type(pos, TileType::Empty);
            cleared += 1;
        }
    };

    carve(grid, cursor);
    while cursor.x != to.x {
        cursor = cursor.offset(step_x, 0);
        carve(grid, cursor);
    }
    while cursor.y != to.y {
        cursor = cursor.offset(0, step_y);
        carve(grid, cursor);
    }

    cleared
}
