//! Actors: processes, malware, their stats and how they come into being

pub mod actor;
pub mod archetype;
pub mod factory;
pub mod stats;

pub use actor::{Actor, ActorKind, ActorStatus, Faction};
pub use archetype::{MalwareType, ProcessArchetype};
pub use factory::{deploy_squad, populate_malware, replicate, spawn_malware, spawn_process};
pub use stats::{StatModifiers, StatusEffect, Stats};
