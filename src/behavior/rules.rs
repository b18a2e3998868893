//! Behavior rule definitions
//!
//! Conditions and actions are closed sets: each variant carries exactly the
//! fields its kind needs, so a loaded rule is well-formed by construction.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// How an attack picks among enemies in range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetPriority {
    #[default]
    Nearest,
    /// Lowest current health
    Weakest,
    /// Highest current health
    Strongest,
}

/// Destination picked by a move action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    NearestEnemy,
    NearestPickup,
    NearestExit,
    NearestSpawn,
}

/// When a rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Always,
    /// Health percentage strictly below the threshold
    HealthBelow { percent: u32 },
    /// Health percentage strictly above the threshold
    HealthAbove { percent: u32 },
    EnemyAdjacent,
    EnemyInRange { range: u32 },
    /// No enemy is perceived at all
    NoEnemyVisible,
    AllyInRange { range: u32 },
    IsIdle,
    IsMoving,
    NearExit { range: u32 },
    NearPickup { range: u32 },
}

/// What a rule does when its condition holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Attack {
        #[serde(default)]
        target: TargetPriority,
    },
    MoveTo { target: MoveTarget },
    /// Step away from the centroid of perceived enemies
    Flee,
    FollowAlly,
    /// Head for the nearest unexplored walkable tile
    Explore,
    /// Head for the nearest exit and stay there
    Retreat,
    Hold,
    GoDormant,
}

fn default_enabled() -> bool {
    true
}

/// A prioritized condition/action pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Lower is evaluated first
    pub priority: i32,
    pub condition: Condition,
    pub action: Action,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Ticks that must pass after a trigger before the rule can fire again
    #[serde(default)]
    pub cooldown: u64,
    #[serde(default)]
    pub last_triggered_tick: Option<Tick>,
}

impl BehaviorRule {
    pub fn new(id: impl Into<String>, priority: i32, condition: Condition, action: Action) -> Self {
        let id = id.into();
        Self {
            name: id.replace('_', " "),
            id,
            priority,
            condition,
            action,
            enabled: true,
            cooldown: 0,
            last_triggered_tick: None,
        }
    }

    pub fn with_cooldown(mut self, cooldown: u64) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Has the cooldown elapsed since the last trigger?
    pub fn is_ready(&self, tick: Tick) -> bool {
        match self.last_triggered_tick {
            None => true,
            Some(last) => tick.saturating_sub(last) >= self.cooldown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_gate() {
        let mut rule = BehaviorRule::new("burst", 1, Condition::Always, Action::Hold).with_cooldown(3);
        assert!(rule.is_ready(0));
        rule.last_triggered_tick = Some(10);
        assert!(!rule.is_ready(10));
        assert!(!rule.is_ready(12));
        assert!(rule.is_ready(13));
    }

    #[test]
    fn test_zero_cooldown_always_ready() {
        let mut rule = BehaviorRule::new("hold", 1, Condition::Always, Action::Hold);
        rule.last_triggered_tick = Some(5);
        assert!(rule.is_ready(5));
    }

    #[test]
    fn test_tagged_json_shape() {
        let json = serde_json::to_value(Action::Attack {
            target: TargetPriority::Weakest,
        })
        .unwrap();
        assert_eq!(json["type"], "attack");
        assert_eq!(json["target"], "weakest");

        let condition: Condition =
            serde_json::from_str(r#"{"type":"health_below","percent":30}"#).unwrap();
        assert_eq!(condition, Condition::HealthBelow { percent: 30 });
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!(serde_json::from_str::<Condition>(r#"{"type":"moon_is_full"}"#).is_err());
    }
}
