//! Sector constants - all tunable generation values in one place

// Tiles
pub const MAX_HAZARD_LEVEL: u8 = 100;

// Size presets (width x height)
pub const SMALL_SECTOR: (u32, u32) = (16, 12);
pub const MEDIUM_SECTOR: (u32, u32) = (24, 18);
pub const LARGE_SECTOR: (u32, u32) = (32, 24);

// Blocked terrain
pub const CLUSTER_CHANCE: f64 = 0.4;

// Edges
pub const SPAWN_POINT_COUNT: u32 = 3;
pub const EXIT_POINT_COUNT: u32 = 2;
pub const EDGE_JITTER: i32 = 1;

// Hazards
pub const HAZARD_MIN_SPAWN_DISTANCE: u32 = 4;
pub const HAZARD_BASE_LEVEL_MIN: i32 = 40;
pub const HAZARD_BASE_LEVEL_MAX: i32 = 80;
pub const HAZARD_SPREAD_CHANCE: f64 = 0.5;
pub const HAZARD_SPREAD_FALLOFF: f64 = 0.6;

// Pickups
pub const BASE_PICKUPS_SMALL: u32 = 4;
pub const BASE_PICKUPS_MEDIUM: u32 = 6;
pub const BASE_PICKUPS_LARGE: u32 = 9;
pub const PICKUP_MIN_EDGE_DISTANCE: u32 = 3;
pub const PICKUP_ATTEMPTS_PER_TARGET: u32 = 50;

// Hostiles
pub const MALWARE_MIN_SPAWN_DISTANCE: u32 = 6;

// Initial reveal around spawn points
pub const SPAWN_REVEAL_RADIUS: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_ordering() {
        assert!(SMALL_SECTOR.0 * SMALL_SECTOR.1 < MEDIUM_SECTOR.0 * MEDIUM_SECTOR.1);
        assert!(MEDIUM_SECTOR.0 * MEDIUM_SECTOR.1 < LARGE_SECTOR.0 * LARGE_SECTOR.1);
    }

    #[test]
    fn test_hazard_levels_stay_walkable() {
        assert!(HAZARD_BASE_LEVEL_MAX < MAX_HAZARD_LEVEL as i32);
        assert!(HAZARD_BASE_LEVEL_MIN <= HAZARD_BASE_LEVEL_MAX);
    }
}
