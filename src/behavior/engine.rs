//! Rule evaluation: first satisfied rule whose action can be set up wins

use serde::{Deserialize, Serialize};

use crate::behavior::actions::{plan, Command};
use crate::behavior::conditions::check;
use crate::behavior::rules::BehaviorRule;
use crate::behavior::world_view::WorldView;
use crate::core::types::Tick;
use crate::entity::actor::{Actor, ActorStatus};

/// The rule that fired and the command it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub rule_id: String,
    pub command: Command,
}

/// Can this actor take a decision this tick?
pub fn can_act(actor: &Actor) -> bool {
    actor.is_alive() && actor.status != ActorStatus::Disabled && actor.stats.action_points > 0
}

/// Evaluate `rules` for `actor`
///
/// Rules are tried in ascending priority (stable for equal priorities).
/// Disabled rules and rules still cooling down are skipped. A rule whose
/// condition holds but whose action cannot be planned does not stop the scan.
/// The winning rule gets `last_triggered_tick` stamped.
pub fn evaluate(
    actor: &Actor,
    rules: &mut [BehaviorRule],
    world: &WorldView,
    tick: Tick,
) -> Option<Decision> {
    if !can_act(actor) {
        return None;
    }

    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&i| rules[i].priority);

    for i in order {
        let rule = &rules[i];
        if !rule.enabled || !rule.is_ready(tick) {
            continue;
        }
        if !check(&rule.condition, actor, world) {
            continue;
        }
        if let Some(command) = plan(&rule.action, actor, world) {
            let rule = &mut rules[i];
            rule.last_triggered_tick = Some(tick);
            return Some(Decision {
                rule_id: rule.id.clone(),
                command,
            });
        }
    }

    None
}
