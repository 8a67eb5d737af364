//! Projection from field state to an [`Observation`].

use crate::observation::{Inventory, Observation, TileView};
use indexmap::IndexMap;
use tilth_core::TurnId;
use tilth_space::Field;

/// Build the observation for the current drone position.
///
/// Pure: reads `field` and nothing else. `max_turns` only feeds
/// `time_remaining`.
///
/// # Examples
///
/// ```
/// use tilth_core::{GrowthThresholds, Position, Terrain, TurnId};
/// use tilth_obs::build_observation;
/// use tilth_space::{Field, Layout};
///
/// let plan = Layout::Open.resolve(3, 3, None, Some(Position::new(1, 1))).unwrap();
/// let field = Field::new(&plan, GrowthThresholds::default()).unwrap();
/// let obs = build_observation(&field, TurnId(4), Some(10));
///
/// assert_eq!(obs.tiles.len(), 5);
/// assert_eq!(obs.current(), Some(Terrain::Seed));
/// assert_eq!(obs.time_remaining, Some(6));
/// assert!(!obs.contains(Position::new(0, 0)));
/// ```
pub fn build_observation(field: &Field, turn: TurnId, max_turns: Option<u64>) -> Observation {
    let position = field.drone();
    let mut tiles = IndexMap::with_capacity(5);
    let visible = std::iter::once(position).chain(field.neighbours(position));
    for pos in visible {
        if let Some(terrain) = field.terrain(pos) {
            tiles.insert(pos, TileView { terrain });
        }
    }

    Observation {
        position,
        tiles,
        turn,
        time_remaining: max_turns.map(|max| max.saturating_sub(turn.0)),
        width: field.width(),
        height: field.height(),
        inventory: Inventory::default(),
    }
}
