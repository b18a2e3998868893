//! Stateless combat resolution and the combat log

pub mod log;
pub mod resolution;

pub use log::{CombatLog, CombatLogEntry};
pub use resolution::{damage_for_roll, is_in_range, resolve_attack, strike, CombatResult, MIN_DAMAGE};
