//! Process archetypes and malware types with their base stats

use serde::{Deserialize, Serialize};

use crate::entity::stats::Stats;

/// Player unit roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessArchetype {
    /// Fast, fragile, sees far
    Scout,
    /// Balanced damage dealer
    #[default]
    Striker,
    /// Slow and durable
    Guardian,
    /// Long-lived background worker, modest everywhere
    Daemon,
}

impl ProcessArchetype {
    pub fn base_stats(&self) -> Stats {
        match self {
            // Stats::new(max_health, attack, defense, speed, sight_range)
            ProcessArchetype::Scout => Stats::new(20, 5, 1, 3, 6),
            ProcessArchetype::Striker => Stats::new(30, 10, 2, 2, 4),
            ProcessArchetype::Guardian => Stats::new(50, 6, 5, 1, 3),
            ProcessArchetype::Daemon => Stats::new(35, 7, 3, 2, 4),
        }
    }

    pub fn all() -> [ProcessArchetype; 4] {
        [
            ProcessArchetype::Scout,
            ProcessArchetype::Striker,
            ProcessArchetype::Guardian,
            ProcessArchetype::Daemon,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProcessArchetype::Scout => "scout",
            ProcessArchetype::Striker => "striker",
            ProcessArchetype::Guardian => "guardian",
            ProcessArchetype::Daemon => "daemon",
        }
    }
}

/// Hostile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalwareType {
    Virus,   // Replicates slowly
    Worm,    // Replicates quickly, weak
    Trojan,  // Hits hard
    Rootkit, // Lies dormant until something comes close
}

impl MalwareType {
    pub fn base_stats(&self) -> Stats {
        match self {
            MalwareType::Virus => Stats::new(12, 4, 1, 1, 4),
            MalwareType::Worm => Stats::new(8, 3, 0, 2, 3),
            MalwareType::Trojan => Stats::new(25, 8, 2, 1, 4),
            MalwareType::Rootkit => Stats::new(30, 7, 4, 1, 3),
        }
    }

    /// Ticks between replications; `None` for types that never replicate
    pub fn replication_interval(&self) -> Option<u32> {
        match self {
            MalwareType::Virus => Some(6),
            MalwareType::Worm => Some(4),
            MalwareType::Trojan | MalwareType::Rootkit => None,
        }
    }

    pub fn is_self_replicating(&self) -> bool {
        self.replication_interval().is_some()
    }

    pub fn all() -> [MalwareType; 4] {
        [
            MalwareType::Virus,
            MalwareType::Worm,
            MalwareType::Trojan,
            MalwareType::Rootkit,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MalwareType::Virus => "virus",
            MalwareType::Worm => "worm",
            MalwareType::Trojan => "trojan",
            MalwareType::Rootkit => "rootkit",
        }
    }
}
