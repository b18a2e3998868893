//! Actors: processes and malware on the sector grid

use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;
use crate::entity::archetype::{MalwareType, ProcessArchetype};
use crate::entity::stats::{apply_modifiers, StatModifiers, StatusEffect, Stats};
use crate::sector::position::Position;

/// Which side an actor fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Process,
    Malware,
}

impl Faction {
    pub fn opposing(&self) -> Faction {
        match self {
            Faction::Process => Faction::Malware,
            Faction::Malware => Faction::Process,
        }
    }
}

/// Archetype or malware type, depending on faction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Process(ProcessArchetype),
    Malware(MalwareType),
}

impl ActorKind {
    pub fn faction(&self) -> Faction {
        match self {
            ActorKind::Process(_) => Faction::Process,
            ActorKind::Malware(_) => Faction::Malware,
        }
    }

    pub fn base_stats(&self) -> Stats {
        match self {
            ActorKind::Process(archetype) => archetype.base_stats(),
            ActorKind::Malware(malware_type) => malware_type.base_stats(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActorKind::Process(archetype) => archetype.name(),
            ActorKind::Malware(malware_type) => malware_type.name(),
        }
    }

    pub fn malware_type(&self) -> Option<MalwareType> {
        match self {
            ActorKind::Malware(malware_type) => Some(*malware_type),
            ActorKind::Process(_) => None,
        }
    }
}

/// What an actor is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActorStatus {
    #[default]
    Idle,
    Moving,
    Attacking,
    Retreating,
    Dormant,
    Disabled,
    Destroyed,
}

/// A process or a piece of malware
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub kind: ActorKind,
    pub faction: Faction,
    pub position: Position,
    pub stats: Stats,
    pub status: ActorStatus,
    /// Planned route, starting with the tile the plan was made from
    pub path: Vec<Position>,
    /// Index into `path` of the tile the actor stands on
    pub path_index: usize,
    pub status_effects: Vec<StatusEffect>,
    /// Attack target picked by the last attack decision
    pub target: Option<EntityId>,
    /// Ticks until the next replication (self-replicating malware only)
    pub replication_cooldown: Option<u32>,
}

impl Actor {
    pub fn new(id: EntityId, kind: ActorKind, position: Position, stats: Stats) -> Self {
        Self {
            id,
            kind,
            faction: kind.faction(),
            position,
            stats,
            status: ActorStatus::Idle,
            path: Vec::new(),
            path_index: 0,
            status_effects: Vec::new(),
            target: None,
            replication_cooldown: kind.malware_type().and_then(|t| t.replication_interval()),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status != ActorStatus::Destroyed && self.stats.health > 0
    }

    pub fn is_process(&self) -> bool {
        self.faction == Faction::Process
    }

    /// Apply damage; the actor is destroyed exactly when health reaches zero
    ///
    /// Returns true if this hit destroyed it.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.stats.health = self.stats.health.saturating_sub(amount);
        if self.stats.health == 0 {
            self.status = ActorStatus::Destroyed;
            self.path.clear();
            self.path_index = 0;
            self.target = None;
            return true;
        }
        false
    }

    /// Sum of all active effect modifiers
    pub fn total_modifiers(&self) -> StatModifiers {
        self.status_effects
            .iter()
            .fold(StatModifiers::default(), |acc, e| acc.combine(&e.modifiers))
    }

    /// Stats with status effects applied
    pub fn effective_stats(&self) -> Stats {
        apply_modifiers(&self.stats, &self.total_modifiers())
    }

    /// Add an effect, refreshing the duration of one with the same name
    pub fn apply_effect(&mut self, effect: StatusEffect) {
        match self
            .status_effects
            .iter_mut()
            .find(|e| e.name == effect.name)
        {
            Some(existing) => {
                existing.remaining_duration = existing.remaining_duration.max(effect.remaining_duration);
                existing.modifiers = effect.modifiers;
            }
            None => self.status_effects.push(effect),
        }
    }

    pub fn has_effect(&self, name: &str) -> bool {
        self.status_effects.iter().any(|e| e.name == name)
    }

    /// Count effect durations down by one tick, dropping expired effects
    pub fn tick_effects(&mut self) {
        for effect in &mut self.status_effects {
            effect.remaining_duration = effect.remaining_duration.saturating_sub(1);
        }
        self.status_effects.retain(|e| !e.is_expired());
    }

    pub fn reset_action_points(&mut self) {
        self.stats.action_points = self.stats.max_action_points;
    }

    /// Replace the current plan
    pub fn set_path(&mut self, path: Vec<Position>) {
        self.path = path;
        self.path_index = 0;
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.path_index = 0;
    }

    /// Next tile of the plan, if any remains
    pub fn next_waypoint(&self) -> Option<Position> {
        self.path.get(self.path_index + 1).copied()
    }

    pub fn has_path(&self) -> bool {
        self.next_waypoint().is_some()
    }
}
