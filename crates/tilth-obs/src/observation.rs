//! The agent-visible snapshot types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tilth_core::{Direction, Position, Terrain, TurnId};

/// What an agent may know about one tile: its terrain, nothing more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileView {
    /// Terrain of the tile.
    pub terrain: Terrain,
}

/// How many seeds the drone carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedSupply {
    /// Planting never runs out.
    #[default]
    Unlimited,
}

/// The drone's inventory as seen by the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    /// Seed supply.
    pub seeds: SeedSupply,
}

/// Read-only snapshot handed to an agent for one turn.
///
/// `tiles` holds the drone's tile first, then each in-bounds neighbour in
/// RIGHT, DOWN, LEFT, UP order. It never holds anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Drone position.
    pub position: Position,
    /// Visible tiles keyed by position.
    pub tiles: IndexMap<Position, TileView>,
    /// Turns completed so far.
    pub turn: TurnId,
    /// Turns left before the limit, if one is set.
    pub time_remaining: Option<u64>,
    /// Field width.
    pub width: u32,
    /// Field height.
    pub height: u32,
    /// Drone inventory.
    pub inventory: Inventory,
}

impl Observation {
    /// Terrain at `pos`, if it is visible.
    pub fn terrain_at(&self, pos: Position) -> Option<Terrain> {
        self.tiles.get(&pos).map(|t| t.terrain)
    }

    /// Terrain under the drone.
    pub fn current(&self) -> Option<Terrain> {
        self.terrain_at(self.position)
    }

    /// The neighbour in `direction` and its terrain, or `None` if that
    /// side is off the grid.
    pub fn neighbour(&self, direction: Direction) -> Option<(Position, Terrain)> {
        let pos = self.position.offset(direction);
        self.terrain_at(pos).map(|t| (pos, t))
    }

    /// Whether `pos` is part of this observation.
    pub fn contains(&self, pos: Position) -> bool {
        self.tiles.contains_key(&pos)
    }

    /// Iterate visible tiles in observation order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Terrain)> + '_ {
        self.tiles.iter().map(|(&p, v)| (p, v.terrain))
    }
}
