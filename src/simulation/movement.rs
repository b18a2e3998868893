//! Step-by-step movement along a planned path
//!
//! Each step costs one action point. A step that cannot be taken refunds its
//! point and ends the chain; the rest of the path is kept for next tick.

use crate::core::types::Tick;
use crate::entity::actor::{Actor, ActorStatus};
use crate::sector::grid::Grid;
use crate::sector::position::Position;
use crate::simulation::events::{EventLog, SimEventType};

/// Can `actor` step from where it stands into `next`?
fn can_step(grid: &Grid, actor: &Actor, next: Position, enemy_positions: &[Position]) -> bool {
    actor.position.distance(&next) == 1
        && grid.is_walkable(next)
        && !enemy_positions.contains(&next)
}

/// Advance `actor` along its path, at most `speed` steps
///
/// Returns the number of steps taken.
pub fn advance(
    grid: &mut Grid,
    actor: &mut Actor,
    enemy_positions: &[Position],
    events: &mut EventLog,
    tick: Tick,
) -> u32 {
    let speed = actor.effective_stats().speed;
    let mut taken = 0;

    while taken < speed && actor.stats.action_points > 0 {
        let Some(next) = actor.next_waypoint() else {
            break;
        };

        actor.stats.action_points -= 1;
        if !can_step(grid, actor, next, enemy_positions) {
            actor.stats.action_points += 1;
            break;
        }

        let from = actor.position;
        grid.relocate_occupant(from, next, actor.id);
        actor.position = next;
        actor.path_index += 1;
        taken += 1;

        events.push(
            SimEventType::ActorMoved {
                actor: actor.id,
                from,
                to: next,
            },
            format!("{} {} moved {} -> {}", actor.kind.name(), actor.id, from, next),
            tick,
        );
    }

    if !actor.has_path() {
        actor.clear_path();
        if actor.status == ActorStatus::Moving {
            actor.status = ActorStatus::Idle;
        }
    }

    taken
}
