//! Bounded combat log

use serde::{Deserialize, Serialize};

use crate::combat::resolution::CombatResult;
use crate::core::types::{EntityId, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub tick: Tick,
    pub attacker: EntityId,
    pub defender: EntityId,
    pub damage: u32,
    pub defender_destroyed: bool,
}

impl CombatLogEntry {
    pub fn from_result(tick: Tick, result: &CombatResult) -> Self {
        Self {
            tick,
            attacker: result.attacker,
            defender: result.defender,
            damage: result.damage,
            defender_destroyed: result.defender_destroyed,
        }
    }
}

/// Newest-last log of attacks; the oldest entries fall off past the limit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: CombatLogEntry, limit: usize) {
        self.entries.push(entry);
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
        }
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded during one tick
    pub fn for_tick(&self, tick: Tick) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter().filter(move |e| e.tick == tick)
    }
}
