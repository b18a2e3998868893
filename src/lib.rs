//! Sector Sim - deterministic tile-grid expedition simulator
//!
//! Processes (the player's squad) and malware share a procedurally generated
//! sector. Everything advances in discrete ticks through [`simulation::step`].

pub mod behavior;
pub mod combat;
pub mod core;
pub mod entity;
pub mod sector;
pub mod simulation;
