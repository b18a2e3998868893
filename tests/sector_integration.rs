//! Sector generation, pathfinding and fog integration tests

use sector_sim::sector::*;

fn sector(size: SectorSize, difficulty: Difficulty, seed: u64) -> Sector {
    generate(&SectorConfig::new(size, difficulty.profile(), seed))
}

#[test]
fn test_generated_sector_round_trip() {
    let config = SectorConfig::new(SectorSize::Medium, Difficulty::Hard.profile(), 1234);
    let first = generate(&config);
    let second = generate(&config);
    assert_eq!(first, second);

    let json = serde_json::to_string(&first).unwrap();
    let restored: Sector = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, first);
}

#[test]
fn test_every_preset_is_traversable() {
    for size in [SectorSize::Small, SectorSize::Medium, SectorSize::Large] {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            for seed in 0..5 {
                let sector = sector(size, difficulty, seed);
                let (width, height) = size.dimensions();
                assert_eq!(sector.grid.width(), width);
                assert_eq!(sector.grid.height(), height);

                let spawn = sector.spawn_points()[0];
                let exit = sector.exit_points()[0];
                let path = find_path(&sector.grid, spawn, exit, 2000)
                    .unwrap_or_else(|| panic!("{:?}/{:?}/{} has no route", size, difficulty, seed));
                assert_eq!(path.first(), Some(&spawn));
                assert_eq!(path.last(), Some(&exit));
            }
        }
    }
}

#[test]
fn test_edges_sit_on_the_correct_columns() {
    let sector = sector(SectorSize::Large, Difficulty::Normal, 77);
    let right = sector.grid.width() as i32 - 1;
    for spawn in sector.spawn_points() {
        assert_eq!(spawn.x, 0);
        assert_eq!(sector.grid.tile_type(*spawn), Some(TileType::Spawn));
    }
    for exit in sector.exit_points() {
        assert_eq!(exit.x, right);
        assert_eq!(sector.grid.tile_type(*exit), Some(TileType::Exit));
    }
}

#[test]
fn test_open_grid_scenarios() {
    let grid = Grid::new(10, 10);

    let path = find_path(&grid, Position::new(0, 0), Position::new(3, 4), 2000).unwrap();
    assert_eq!(path.len(), 8);
    for pair in path.windows(2) {
        assert_eq!(pair[0].distance(&pair[1]), 1);
    }

    let same = find_path(&grid, Position::new(5, 5), Position::new(5, 5), 2000).unwrap();
    assert_eq!(same, vec![Position::new(5, 5)]);
}

#[test]
fn test_walled_off_goal() {
    let mut grid = Grid::new(10, 10);
    let goal = Position::new(5, 5);
    for wall in goal.neighbors() {
        grid.set_tile_type(wall, TileType::Blocked);
    }

    assert_eq!(find_path(&grid, Position::new(0, 0), goal, 2000), None);
    assert!(!is_reachable(&grid, Position::new(0, 0), goal));
    assert!(!get_reachable_positions(&grid, Position::new(0, 0), 20).contains(&goal));
}

#[test]
fn test_saturated_hazard_blocks_path() {
    let mut grid = Grid::new(5, 3);
    for y in 0..3 {
        grid.set_tile_type(Position::new(2, y), TileType::Hazard);
        grid.set_hazard_level(Position::new(2, y), 100);
    }
    assert_eq!(find_path(&grid, Position::new(0, 1), Position::new(4, 1), 2000), None);

    grid.set_hazard_level(Position::new(2, 1), 60);
    let path = find_path(&grid, Position::new(0, 1), Position::new(4, 1), 2000).unwrap();
    assert!(path.contains(&Position::new(2, 1)));
}

#[test]
fn test_fog_follows_a_walking_viewer() {
    let mut grid = Grid::new(12, 5);
    grid.set_tile_type(Position::new(6, 0), TileType::Blocked);
    grid.set_tile_type(Position::new(6, 1), TileType::Blocked);
    grid.set_tile_type(Position::new(6, 3), TileType::Blocked);
    grid.set_tile_type(Position::new(6, 4), TileType::Blocked);

    let route = find_path(&grid, Position::new(0, 2), Position::new(11, 2), 2000).unwrap();
    let mut ever_seen = Vec::new();

    for pos in &route {
        update_visibility(&mut grid, &[Viewer::new(*pos, 3)]);
        assert!(is_visible(&grid, *pos));

        for seen in &ever_seen {
            assert_ne!(grid.visibility(*seen), Some(Visibility::Hidden));
        }
        ever_seen.extend(
            grid.positions()
                .filter(|p| grid.visibility(*p) != Some(Visibility::Hidden)),
        );
    }

    // The start is long out of sight but stays remembered
    assert_eq!(grid.visibility(Position::new(0, 2)), Some(Visibility::Revealed));
    assert!(grid.explored_percent() > 50.0);
}

#[test]
fn test_walls_hide_what_is_behind_them() {
    let mut grid = Grid::new(7, 1);
    grid.set_tile_type(Position::new(3, 0), TileType::Blocked);
    update_visibility(&mut grid, &[Viewer::new(Position::new(0, 0), 6)]);

    assert!(is_visible(&grid, Position::new(2, 0)));
    assert!(is_visible(&grid, Position::new(3, 0)));
    assert_eq!(grid.visibility(Position::new(4, 0)), Some(Visibility::Hidden));
    assert!(!has_line_of_sight(&grid, Position::new(0, 0), Position::new(6, 0)));
}

#[test]
fn test_reveal_area_does_not_grant_sight() {
    let mut sector = sector(SectorSize::Small, Difficulty::Easy, 3);
    let spawn = sector.spawn_points()[0];
    reveal_area(&mut sector.grid, spawn, 2);

    assert_eq!(sector.grid.visibility(spawn), Some(Visibility::Revealed));
    assert!(!is_visible(&sector.grid, spawn));
    sector.refresh_explored();
    assert!(sector.explored_percent > 0.0);
}
