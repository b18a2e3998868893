//! Condition checks against the world view
//!
//! Range and adjacency checks use every living enemy: a blade at your side is
//! felt whether or not the fog shows it. Only `NoEnemyVisible` goes through
//! perception.

use crate::behavior::rules::Condition;
use crate::behavior::world_view::WorldView;
use crate::entity::actor::{Actor, ActorStatus};

/// Does `condition` hold for `actor` right now?
pub fn check(condition: &Condition, actor: &Actor, world: &WorldView) -> bool {
    match *condition {
        Condition::Always => true,
        Condition::HealthBelow { percent } => actor.stats.health_percent() < percent,
        Condition::HealthAbove { percent } => actor.stats.health_percent() > percent,
        Condition::EnemyAdjacent => !world.enemies_within(actor, 1).is_empty(),
        Condition::EnemyInRange { range } => !world.enemies_within(actor, range).is_empty(),
        Condition::NoEnemyVisible => world.perceived_enemies(actor).is_empty(),
        Condition::AllyInRange { range } => world
            .allies(actor)
            .iter()
            .any(|a| a.position.distance(&actor.position) <= range),
        Condition::IsIdle => actor.status == ActorStatus::Idle,
        Condition::IsMoving => actor.status == ActorStatus::Moving,
        Condition::NearExit { range } => world
            .edges
            .exit_points
            .iter()
            .any(|e| e.distance(&actor.position) <= range),
        Condition::NearPickup { range } => world
            .perceived_pickups(actor)
            .iter()
            .any(|p| p.distance(&actor.position) <= range),
    }
}
