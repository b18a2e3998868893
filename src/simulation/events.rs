//! Per-tick delta log

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick};
use crate::sector::position::Position;
use crate::sector::state::SectorStatus;

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEventType {
    RuleTriggered { actor: EntityId, rule_id: String },
    ActorMoved { actor: EntityId, from: Position, to: Position },
    AttackResolved { attacker: EntityId, defender: EntityId, damage: u32 },
    ActorDestroyed { actor: EntityId },
    CacheCollected { actor: EntityId, position: Position },
    HazardExposure { actor: EntityId, damage: u32 },
    MalwareReplicated { parent: EntityId, offspring: EntityId },
    SectorResolved { status: SectorStatus },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: Tick,
    pub event_type: SimEventType,
    pub description: String,
}

/// Events from a single tick, in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    pub events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: SimEventType, description: String, tick: Tick) {
        self.events.push(SimEvent {
            tick,
            event_type,
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<SimEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut log = EventLog::new();
        log.push(
            SimEventType::ActorDestroyed { actor: EntityId(4) },
            "#4 destroyed".into(),
            3,
        );
        log.push(
            SimEventType::SectorResolved {
                status: SectorStatus::Success,
            },
            "sector cleared".into(),
            3,
        );
        assert_eq!(log.len(), 2);
        assert!(matches!(
            log.events[1].event_type,
            SimEventType::SectorResolved { .. }
        ));
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = SimEventType::HazardExposure {
            actor: EntityId(2),
            damage: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "hazard_exposure");
        assert_eq!(json["damage"], 3);
    }
}
