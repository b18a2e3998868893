//! Built-in rule books
//!
//! The process book is mirrored by `data/rules/default_process_rules.toml`.

use std::collections::BTreeMap;

use crate::behavior::rules::{Action, BehaviorRule, Condition, MoveTarget, TargetPriority};
use crate::entity::archetype::MalwareType;

/// Rule books for malware, one per type
pub type MalwareRuleBooks = BTreeMap<MalwareType, Vec<BehaviorRule>>;

/// Default squad behavior: survive, fight what is adjacent, push into the fog,
/// and head for an exit once nothing is left to find
pub fn default_process_rules() -> Vec<BehaviorRule> {
    vec![
        BehaviorRule::new(
            "retreat_when_critical",
            1,
            Condition::HealthBelow { percent: 25 },
            Action::Retreat,
        ),
        BehaviorRule::new(
            "attack_adjacent",
            2,
            Condition::EnemyAdjacent,
            Action::Attack {
                target: TargetPriority::Weakest,
            },
        ),
        BehaviorRule::new(
            "engage_visible",
            3,
            Condition::HealthAbove { percent: 50 },
            Action::MoveTo {
                target: MoveTarget::NearestEnemy,
            },
        ),
        BehaviorRule::new(
            "break_contact",
            4,
            Condition::EnemyInRange { range: 3 },
            Action::Flee,
        ),
        BehaviorRule::new(
            "collect_cache",
            5,
            Condition::NearPickup { range: 8 },
            Action::MoveTo {
                target: MoveTarget::NearestPickup,
            },
        ),
        BehaviorRule::new("explore", 6, Condition::Always, Action::Explore),
        BehaviorRule::new("extract", 7, Condition::NoEnemyVisible, Action::Retreat),
        BehaviorRule::new("hold", 99, Condition::Always, Action::Hold),
    ]
}

fn attack_adjacent(target: TargetPriority) -> BehaviorRule {
    BehaviorRule::new(
        "attack_adjacent",
        1,
        Condition::EnemyAdjacent,
        Action::Attack { target },
    )
}

fn hunt(condition: Condition) -> BehaviorRule {
    BehaviorRule::new(
        "hunt",
        2,
        condition,
        Action::MoveTo {
            target: MoveTarget::NearestEnemy,
        },
    )
}

/// Rule book for one malware type
pub fn malware_rules(malware_type: MalwareType) -> Vec<BehaviorRule> {
    match malware_type {
        MalwareType::Virus => vec![
            attack_adjacent(TargetPriority::Nearest),
            hunt(Condition::Always),
            BehaviorRule::new("idle", 10, Condition::Always, Action::Hold),
        ],
        MalwareType::Worm => vec![
            attack_adjacent(TargetPriority::Weakest),
            hunt(Condition::Always),
            BehaviorRule::new("swarm", 3, Condition::Always, Action::FollowAlly),
            BehaviorRule::new("idle", 10, Condition::Always, Action::Hold),
        ],
        MalwareType::Trojan => vec![
            attack_adjacent(TargetPriority::Strongest),
            hunt(Condition::HealthAbove { percent: 30 }),
            BehaviorRule::new("idle", 10, Condition::Always, Action::Hold),
        ],
        // Sits dormant until something walks into reach
        MalwareType::Rootkit => vec![
            attack_adjacent(TargetPriority::Strongest),
            hunt(Condition::EnemyInRange { range: 2 }),
            BehaviorRule::new("lurk", 10, Condition::Always, Action::GoDormant),
        ],
    }
}

pub fn default_malware_rule_books() -> MalwareRuleBooks {
    MalwareType::all()
        .into_iter()
        .map(|t| (t, malware_rules(t)))
        .collect()
}
