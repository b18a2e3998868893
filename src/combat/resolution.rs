//! Damage resolution
//!
//! Damage = floor(attack * (1 + roll)) - defense, with roll drawn uniformly from
//! [-variance, variance]. Every hit deals at least 1.

use serde::{Deserialize, Serialize};

use crate::core::rng::SimRng;
use crate::core::types::EntityId;
use crate::entity::actor::Actor;
use crate::sector::position::Position;

/// Minimum damage of any landed attack
pub const MIN_DAMAGE: u32 = 1;

/// Outcome of one attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub damage: u32,
    pub defender_destroyed: bool,
}

/// Damage of a single attack
pub fn resolve_attack(attack: u32, defense: u32, variance: f64, rng: &mut SimRng) -> u32 {
    let roll = rng.symmetric(variance);
    damage_for_roll(attack, defense, roll)
}

/// Damage for a known variance roll
pub fn damage_for_roll(attack: u32, defense: u32, roll: f64) -> u32 {
    let raw = (attack as f64 * (1.0 + roll)).floor() as i64;
    (raw - defense as i64).max(MIN_DAMAGE as i64) as u32
}

/// Manhattan distance within `range`
pub fn is_in_range(a: Position, b: Position, range: u32) -> bool {
    a.distance(&b) <= range
}

/// One actor strikes another using their effective stats
pub fn strike(attacker: &Actor, defender: &mut Actor, variance: f64, rng: &mut SimRng) -> CombatResult {
    let damage = resolve_attack(
        attacker.effective_stats().attack,
        defender.effective_stats().defense,
        variance,
        rng,
    );
    let defender_destroyed = defender.take_damage(damage);

    CombatResult {
        attacker: attacker.id,
        defender: defender.id,
        damage,
        defender_destroyed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::actor::{ActorKind, ActorStatus};
    use crate::entity::archetype::{MalwareType, ProcessArchetype};
    use crate::entity::stats::Stats;

    #[test]
    fn test_damage_floor() {
        let mut rng = SimRng::seed_from_u64(0);
        assert_eq!(resolve_attack(1, 1000, 0.0, &mut rng), 1);
        assert_eq!(resolve_attack(0, 0, 0.0, &mut rng), 1);
    }

    #[test]
    fn test_no_variance_is_exact() {
        let mut rng = SimRng::seed_from_u64(0);
        assert_eq!(resolve_attack(18, 3, 0.0, &mut rng), 15);
    }

    #[test]
    fn test_roll_is_floored() {
        assert_eq!(damage_for_roll(10, 0, 0.19), 11);
        assert_eq!(damage_for_roll(10, 0, -0.15), 8);
        assert_eq!(damage_for_roll(10, 2, -0.25), 5);
    }

    #[test]
    fn test_variance_bounds() {
        let mut rng = SimRng::seed_from_u64(42);
        for _ in 0..200 {
            let damage = resolve_attack(20, 0, 0.2, &mut rng);
            assert!((15..=24).contains(&damage));
        }
    }

    #[test]
    fn test_range() {
        let a = Position::new(2, 2);
        assert!(is_in_range(a, Position::new(2, 3), 1));
        assert!(!is_in_range(a, Position::new(3, 3), 1));
        assert!(is_in_range(a, Position::new(3, 3), 2));
        assert!(is_in_range(a, a, 1));
    }

    #[test]
    fn test_strike_destroys() {
        let mut rng = SimRng::seed_from_u64(3);
        let striker_kind = ActorKind::Process(ProcessArchetype::Striker);
        let attacker = Actor::new(
            EntityId(1),
            striker_kind,
            Position::new(0, 0),
            Stats::new(30, 18, 0, 2, 4),
        );
        let mut defender = Actor::new(
            EntityId(2),
            ActorKind::Malware(MalwareType::Virus),
            Position::new(1, 0),
            Stats::new(10, 1, 0, 1, 3),
        );

        let result = strike(&attacker, &mut defender, 0.2, &mut rng);
        assert!(result.damage >= 14);
        assert!(result.defender_destroyed);
        assert_eq!(defender.status, ActorStatus::Destroyed);
    }
}
