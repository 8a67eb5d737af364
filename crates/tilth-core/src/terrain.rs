//! Tile state and the crop growth state machine.
//!
//! Terrain is a closed enum; every transition goes through
//! [`advance_growth`] or [`Tile::seeded`], both of which match
//! exhaustively so a new terrain kind cannot slip through unhandled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical state of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Farmable soil with nothing planted.
    Empty,
    /// A freshly planted seed.
    Seed,
    /// A crop part-way to maturity.
    Growing,
    /// A fully grown crop. Absorbing: never changes again.
    Ready,
    /// Impassable, never farmable.
    Obstacle,
    /// The launch pad. Passable, never farmable.
    Base,
}

impl Terrain {
    /// Whether the drone may stand on this terrain.
    pub fn is_passable(self) -> bool {
        !matches!(self, Terrain::Obstacle)
    }

    /// Whether this terrain is a soil plot (planted or not).
    pub fn is_farmable(self) -> bool {
        match self {
            Terrain::Empty | Terrain::Seed | Terrain::Growing | Terrain::Ready => true,
            Terrain::Obstacle | Terrain::Base => false,
        }
    }

    /// Whether this terrain carries a growth timer.
    pub fn is_growing_stage(self) -> bool {
        matches!(self, Terrain::Seed | Terrain::Growing)
    }

    /// Position along the crop lifecycle (`Empty` = 0 .. `Ready` = 3).
    ///
    /// `None` for terrain that is not soil. A tile's rank never decreases.
    pub fn stage_rank(self) -> Option<u8> {
        match self {
            Terrain::Empty => Some(0),
            Terrain::Seed => Some(1),
            Terrain::Growing => Some(2),
            Terrain::Ready => Some(3),
            Terrain::Obstacle | Terrain::Base => None,
        }
    }

    /// Single-character glyph used by text renderers.
    pub fn symbol(self) -> char {
        match self {
            Terrain::Empty => '.',
            Terrain::Seed => 's',
            Terrain::Growing => 'g',
            Terrain::Ready => 'F',
            Terrain::Obstacle => 'T',
            Terrain::Base => 'B',
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Empty => "empty",
            Terrain::Seed => "seed",
            Terrain::Growing => "growing",
            Terrain::Ready => "ready",
            Terrain::Obstacle => "obstacle",
            Terrain::Base => "base",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many growth advances each crop stage lasts.
///
/// # Examples
///
/// ```
/// use tilth_core::GrowthThresholds;
///
/// let t = GrowthThresholds::default();
/// assert_eq!(t.seed_to_growing_turns, 2);
/// assert_eq!(t.growing_to_ready_turns, 3);
/// assert!(GrowthThresholds::new(0, 3).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthThresholds {
    /// Advances a seed needs before it becomes a growing crop. Default: 2.
    pub seed_to_growing_turns: u32,
    /// Advances a growing crop needs before it is ready. Default: 3.
    pub growing_to_ready_turns: u32,
}

impl GrowthThresholds {
    /// Build thresholds from explicit turn counts.
    pub fn new(seed_to_growing_turns: u32, growing_to_ready_turns: u32) -> Self {
        Self {
            seed_to_growing_turns,
            growing_to_ready_turns,
        }
    }

    /// Reject zero-length stages.
    ///
    /// Returns the name of the first offending threshold.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.seed_to_growing_turns == 0 {
            return Err("seed_to_growing_turns");
        }
        if self.growing_to_ready_turns == 0 {
            return Err("growing_to_ready_turns");
        }
        Ok(())
    }
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self {
            seed_to_growing_turns: 2,
            growing_to_ready_turns: 3,
        }
    }
}

/// One cell of the field.
///
/// `growth_timer` counts the advances left before the next stage. It is
/// `Some` exactly when `terrain` is [`Terrain::Seed`] or
/// [`Terrain::Growing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    terrain: Terrain,
    growth_timer: Option<u32>,
}

impl Tile {
    /// Unplanted soil.
    pub const fn empty() -> Self {
        Self {
            terrain: Terrain::Empty,
            growth_timer: None,
        }
    }

    /// An impassable obstacle.
    pub const fn obstacle() -> Self {
        Self {
            terrain: Terrain::Obstacle,
            growth_timer: None,
        }
    }

    /// The launch pad.
    pub const fn base() -> Self {
        Self {
            terrain: Terrain::Base,
            growth_timer: None,
        }
    }

    /// A freshly planted seed with a full timer.
    pub fn seeded(thresholds: &GrowthThresholds) -> Self {
        Self {
            terrain: Terrain::Seed,
            growth_timer: Some(thresholds.seed_to_growing_turns),
        }
    }

    /// Current terrain.
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Advances left in the current stage, if the tile is growing.
    pub fn growth_timer(&self) -> Option<u32> {
        self.growth_timer
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::empty()
    }
}

/// Advance one tile by one turn of growth.
///
/// Pure: the input is not modified and nothing outside the returned tile
/// changes. Seed and Growing timers count down; reaching zero moves the
/// tile to the next stage. All other terrain is returned unchanged.
pub fn advance_growth(tile: Tile, thresholds: &GrowthThresholds) -> Tile {
    match tile.terrain {
        Terrain::Seed => match tile.growth_timer.unwrap_or(0).saturating_sub(1) {
            0 => Tile {
                terrain: Terrain::Growing,
                growth_timer: Some(thresholds.growing_to_ready_turns),
            },
            left => Tile {
                terrain: Terrain::Seed,
                growth_timer: Some(left),
            },
        },
        Terrain::Growing => match tile.growth_timer.unwrap_or(0).saturating_sub(1) {
            0 => Tile {
                terrain: Terrain::Ready,
                growth_timer: None,
            },
            left => Tile {
                terrain: Terrain::Growing,
                growth_timer: Some(left),
            },
        },
        Terrain::Empty | Terrain::Ready | Terrain::Obstacle | Terrain::Base => tile,
    }
}
