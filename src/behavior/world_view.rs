//! Read-only view of the world handed to behavior evaluation
//!
//! Processes only know what the player's fog shows them. Malware ignore fog
//! and sense processes within their own sight range.

use crate::core::config::EngineConfig;
use crate::entity::actor::{Actor, Faction};
use crate::sector::grid::Grid;
use crate::sector::position::Position;
use crate::sector::state::SectorEdges;
use crate::sector::tile::{TileType, Visibility};

pub struct WorldView<'a> {
    pub grid: &'a Grid,
    pub processes: &'a [Actor],
    pub malware: &'a [Actor],
    pub edges: &'a SectorEdges,
    pub config: &'a EngineConfig,
}

impl<'a> WorldView<'a> {
    pub fn new(
        grid: &'a Grid,
        processes: &'a [Actor],
        malware: &'a [Actor],
        edges: &'a SectorEdges,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            grid,
            processes,
            malware,
            edges,
            config,
        }
    }

    fn roster(&self, faction: Faction) -> &'a [Actor] {
        match faction {
            Faction::Process => self.processes,
            Faction::Malware => self.malware,
        }
    }

    /// Living actors of the opposing faction, perceived or not
    pub fn living_enemies(&self, actor: &Actor) -> Vec<&'a Actor> {
        self.roster(actor.faction.opposing())
            .iter()
            .filter(|a| a.is_alive())
            .collect()
    }

    /// Living actors of the same faction, excluding `actor`
    pub fn allies(&self, actor: &Actor) -> Vec<&'a Actor> {
        self.roster(actor.faction)
            .iter()
            .filter(|a| a.is_alive() && a.id != actor.id)
            .collect()
    }

    /// Living enemies within Manhattan `range`
    pub fn enemies_within(&self, actor: &Actor, range: u32) -> Vec<&'a Actor> {
        let origin = actor.position;
        self.living_enemies(actor)
            .into_iter()
            .filter(|e| e.position.distance(&origin) <= range)
            .collect()
    }

    /// Enemies this actor knows about
    pub fn perceived_enemies(&self, actor: &Actor) -> Vec<&'a Actor> {
        match actor.faction {
            Faction::Process => self
                .living_enemies(actor)
                .into_iter()
                .filter(|e| self.grid.visibility(e.position) == Some(Visibility::Visible))
                .collect(),
            Faction::Malware => {
                let sight = actor.effective_stats().sight_range;
                self.enemies_within(actor, sight)
            }
        }
    }

    /// Pickups this actor knows about, in row-major order
    pub fn perceived_pickups(&self, actor: &Actor) -> Vec<Position> {
        let pickups = self.grid.positions_of_type(TileType::Pickup);
        match actor.faction {
            Faction::Process => pickups
                .into_iter()
                .filter(|p| self.grid.visibility(*p) != Some(Visibility::Hidden))
                .collect(),
            Faction::Malware => {
                let sight = actor.effective_stats().sight_range;
                pickups
                    .into_iter()
                    .filter(|p| p.distance(&actor.position) <= sight)
                    .collect()
            }
        }
    }

    /// Is `pos` held by a living actor hostile to `faction`?
    pub fn is_held_by_enemy(&self, pos: Position, faction: Faction) -> bool {
        self.roster(faction.opposing())
            .iter()
            .any(|a| a.is_alive() && a.position == pos)
    }
}
