//! Actor stats and timed status effects

use serde::{Deserialize, Serialize};

/// Combat and movement stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    /// Tiles moved per tick, at most
    pub speed: u32,
    pub sight_range: u32,
    pub action_points: u32,
    pub max_action_points: u32,
}

impl Stats {
    /// Full-health stats with action points equal to speed
    pub fn new(max_health: u32, attack: u32, defense: u32, speed: u32, sight_range: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            attack,
            defense,
            speed,
            sight_range,
            action_points: speed,
            max_action_points: speed,
        }
    }

    /// Health as a percentage of max (0-100)
    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }

    /// Scale the durable combat stats (health, attack, defense)
    pub fn scaled(&self, multiplier: f64) -> Self {
        let scale = |v: u32| ((v as f64 * multiplier).round() as u32).max(1);
        let max_health = scale(self.max_health);
        Self {
            health: max_health,
            max_health,
            attack: scale(self.attack),
            defense: (self.defense as f64 * multiplier).round() as u32,
            ..*self
        }
    }
}

/// Signed per-stat adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatModifiers {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub sight_range: i32,
}

impl StatModifiers {
    pub fn combine(&self, other: &StatModifiers) -> StatModifiers {
        StatModifiers {
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            speed: self.speed + other.speed,
            sight_range: self.sight_range + other.sight_range,
        }
    }
}

/// A timed buff or debuff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    pub modifiers: StatModifiers,
    /// Ticks left; the effect drops off when this reaches zero
    pub remaining_duration: u32,
}

impl StatusEffect {
    pub fn new(name: impl Into<String>, modifiers: StatModifiers, duration: u32) -> Self {
        Self {
            name: name.into(),
            modifiers,
            remaining_duration: duration,
        }
    }

    /// Hazard exposure debuff
    pub fn corrupted() -> Self {
        Self::new(
            "corrupted",
            StatModifiers {
                defense: -2,
                sight_range: -1,
                ..StatModifiers::default()
            },
            3,
        )
    }

    /// Granted by collecting a data cache
    pub fn overclocked() -> Self {
        Self::new(
            "overclocked",
            StatModifiers {
                attack: 3,
                ..StatModifiers::default()
            },
            5,
        )
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_duration == 0
    }
}

fn apply(base: u32, delta: i32, floor: u32) -> u32 {
    (base as i64 + delta as i64).max(floor as i64) as u32
}

/// Apply modifiers: attack/defense floor at 0, speed/sight floor at 1
pub fn apply_modifiers(stats: &Stats, modifiers: &StatModifiers) -> Stats {
    Stats {
        attack: apply(stats.attack, modifiers.attack, 0),
        defense: apply(stats.defense, modifiers.defense, 0),
        speed: apply(stats.speed, modifiers.speed, 1),
        sight_range: apply(stats.sight_range, modifiers.sight_range, 1),
        ..*stats
    }
}
