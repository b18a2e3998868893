//! Turning a rule's action into a concrete command
//!
//! Planning never mutates anything. It returns `None` when the action cannot
//! be set up (no target, no path), which lets the engine fall through to the
//! next rule.

use serde::{Deserialize, Serialize};

use crate::behavior::rules::{Action, MoveTarget, TargetPriority};
use crate::behavior::world_view::WorldView;
use crate::core::types::EntityId;
use crate::entity::actor::{Actor, ActorStatus};
use crate::sector::pathfinding::{find_path, get_reachable_positions};
use crate::sector::position::Position;
use crate::sector::tile::Visibility;

/// What an actor will do this tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Engage an enemy already in attack range
    Attack { target: EntityId },
    /// Follow `path` (starting at the actor's tile) with the given status
    Move {
        path: Vec<Position>,
        status: ActorStatus,
    },
    /// Stay put
    Hold { status: ActorStatus },
}

/// Plan `action` for `actor`
pub fn plan(action: &Action, actor: &Actor, world: &WorldView) -> Option<Command> {
    match *action {
        Action::Attack { target } => plan_attack(actor, target, world),
        Action::MoveTo { target } => plan_move_to(actor, target, world),
        Action::Flee => plan_flee(actor, world),
        Action::FollowAlly => plan_follow(actor, world),
        Action::Explore => plan_explore(actor, world),
        Action::Retreat => plan_retreat(actor, world),
        Action::Hold => Some(Command::Hold {
            status: ActorStatus::Idle,
        }),
        Action::GoDormant => Some(Command::Hold {
            status: ActorStatus::Dormant,
        }),
    }
}

/// Pick among candidates; strict comparisons keep the first on ties
pub fn select_target<'a>(
    actor: &Actor,
    candidates: &[&'a Actor],
    priority: TargetPriority,
) -> Option<&'a Actor> {
    let mut best: Option<&'a Actor> = None;
    for &candidate in candidates {
        let better = match best {
            None => true,
            Some(current) => match priority {
                TargetPriority::Nearest => {
                    candidate.position.distance(&actor.position)
                        < current.position.distance(&actor.position)
                }
                TargetPriority::Weakest => candidate.stats.health < current.stats.health,
                TargetPriority::Strongest => candidate.stats.health > current.stats.health,
            },
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

fn plan_attack(actor: &Actor, priority: TargetPriority, world: &WorldView) -> Option<Command> {
    let in_range = world.enemies_within(actor, world.config.attack_range);
    select_target(actor, &in_range, priority).map(|target| Command::Attack { target: target.id })
}

/// Goals sorted by Manhattan distance, stable on ties
fn by_distance(origin: Position, mut goals: Vec<Position>) -> Vec<Position> {
    goals.sort_by_key(|g| g.distance(&origin));
    goals
}

/// Path to the first reachable goal, optionally stopping one tile short
///
/// Fails when the resulting path has no step to take.
fn path_to_nearest(
    actor: &Actor,
    goals: Vec<Position>,
    stop_adjacent: bool,
    world: &WorldView,
) -> Option<Vec<Position>> {
    for goal in by_distance(actor.position, goals) {
        if let Some(mut path) = find_path(
            world.grid,
            actor.position,
            goal,
            world.config.max_path_expansions,
        ) {
            if stop_adjacent {
                path.pop();
            }
            if path.len() >= 2 {
                return Some(path);
            }
        }
    }
    None
}

fn moving(path: Vec<Position>) -> Command {
    Command::Move {
        path,
        status: ActorStatus::Moving,
    }
}

fn plan_move_to(actor: &Actor, target: MoveTarget, world: &WorldView) -> Option<Command> {
    let (goals, stop_adjacent) = match target {
        MoveTarget::NearestEnemy => (
            world
                .perceived_enemies(actor)
                .iter()
                .map(|e| e.position)
                .collect(),
            true,
        ),
        MoveTarget::NearestPickup => (world.perceived_pickups(actor), false),
        MoveTarget::NearestExit => (world.edges.exit_points.clone(), false),
        MoveTarget::NearestSpawn => (world.edges.spawn_points.clone(), false),
    };
    path_to_nearest(actor, goals, stop_adjacent, world).map(moving)
}

/// Step `flee_distance` tiles straight away from the centroid of perceived threats
fn plan_flee(actor: &Actor, world: &WorldView) -> Option<Command> {
    let threats = world.perceived_enemies(actor);
    if threats.is_empty() {
        return None;
    }

    let count = threats.len() as f64;
    let cx = threats.iter().map(|t| t.position.x as f64).sum::<f64>() / count;
    let cy = threats.iter().map(|t| t.position.y as f64).sum::<f64>() / count;
    let dx = actor.position.x as f64 - cx;
    let dy = actor.position.y as f64 - cy;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return None;
    }

    let flee = world.config.flee_distance as f64;
    let destination = Position::new(
        ((actor.position.x as f64 + dx / length * flee).round() as i32)
            .clamp(0, world.grid.width() as i32 - 1),
        ((actor.position.y as f64 + dy / length * flee).round() as i32)
            .clamp(0, world.grid.height() as i32 - 1),
    );

    let centroid_distance = |p: Position| (p.x as f64 - cx).abs() + (p.y as f64 - cy).abs();
    if centroid_distance(destination) <= centroid_distance(actor.position) {
        return None;
    }

    find_path(
        world.grid,
        actor.position,
        destination,
        world.config.max_path_expansions,
    )
    .filter(|p| p.len() >= 2)
    .map(moving)
}

fn plan_follow(actor: &Actor, world: &WorldView) -> Option<Command> {
    let allies = world.allies(actor);
    let nearest = select_target(actor, &allies, TargetPriority::Nearest)?;
    path_to_nearest(actor, vec![nearest.position], true, world).map(moving)
}

/// Walk toward the closest still-hidden walkable tile
fn plan_explore(actor: &Actor, world: &WorldView) -> Option<Command> {
    let frontier = get_reachable_positions(
        world.grid,
        actor.position,
        world.config.explore_search_radius,
    )
    .into_iter()
    .find(|p| world.grid.visibility(*p) == Some(Visibility::Hidden))?;

    find_path(
        world.grid,
        actor.position,
        frontier,
        world.config.max_path_expansions,
    )
    .filter(|p| p.len() >= 2)
    .map(moving)
}

fn plan_retreat(actor: &Actor, world: &WorldView) -> Option<Command> {
    if world.edges.exit_points.contains(&actor.position) {
        return Some(Command::Hold {
            status: ActorStatus::Retreating,
        });
    }
    path_to_nearest(actor, world.edges.exit_points.clone(), false, world).map(|path| {
        Command::Move {
            path,
            status: ActorStatus::Retreating,
        }
    })
}
