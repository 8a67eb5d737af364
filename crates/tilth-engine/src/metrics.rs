//! Coverage metrics and the end-of-run summary.

use serde::{Deserialize, Serialize};

/// Aggregate coverage counters, recomputed after every step.
///
/// Tile counts describe the field after the step; `planted_total` and
/// `blocked_moves` are cumulative since construction or reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetrics {
    /// Turns elapsed.
    pub turns: u64,
    /// Distinct tiles the drone has occupied, start included.
    pub visited_tiles: usize,
    /// Tiles currently Ready (the `grown_plots` score).
    pub ready_tiles: usize,
    /// Tiles currently Seed.
    pub seeded_tiles: usize,
    /// Tiles currently Growing.
    pub growing_tiles: usize,
    /// Plantings so far, including the start tile.
    pub planted_total: u64,
    /// Soil tiles on the field.
    pub farmable_tiles: usize,
    /// Distinct farmable tiles ever occupied or matured to Ready.
    pub coverage: usize,
    /// Moves refused because the target was an obstacle or off the grid.
    pub blocked_moves: u64,
}

impl CoverageMetrics {
    /// Fraction of farmable tiles covered, or 0 on a field without soil.
    pub fn coverage_ratio(&self) -> f64 {
        if self.farmable_tiles == 0 {
            0.0
        } else {
            self.coverage as f64 / self.farmable_tiles as f64
        }
    }

    /// Whether every farmable tile is Ready. False when there is no soil.
    pub fn fully_grown(&self) -> bool {
        self.farmable_tiles > 0 && self.ready_tiles == self.farmable_tiles
    }
}

/// Serializable end-of-run summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Turns elapsed.
    pub turn: u64,
    /// Tiles currently Ready.
    pub grown_plots: usize,
    /// Distinct tiles the drone has occupied.
    pub visited_tiles: usize,
    /// Distinct farmable tiles ever occupied or Ready.
    pub coverage: usize,
    /// Soil tiles on the field.
    pub farmable_tiles: usize,
    /// Configured Seed stage length.
    pub seed_turns: u32,
    /// Configured Growing stage length.
    pub growing_turns: u32,
    /// Obstacles on the field.
    pub obstacle_count: usize,
    /// Whether the run has ended.
    pub terminated: bool,
}
