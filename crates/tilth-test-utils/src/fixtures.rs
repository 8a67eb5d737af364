//! Reusable fields and action scripts.
//!
//! Layout constants use the ASCII map syntax of
//! [`Layout::Ascii`](tilth_space::Layout::Ascii).

use tilth_core::{Action, GrowthThresholds};
use tilth_space::{Field, Layout};

/// A single base tile: nothing is ever farmable.
pub const BASE_ONLY: &[&str] = &["B"];

/// Three empty tiles in a row, drone at the left end.
pub const STRIP_3X1: &[&str] = &["S.."];

/// A corridor whose far end is cut off by one tree.
///
/// Three tiles are reachable from the start; `(4, 0)` is not.
pub const WALLED_CORRIDOR: &[&str] = &["S..#."];

/// A field whose right side, base included, is walled off from the start.
pub const POCKET: &[&str] = &[
    "S...#..",
    ".##.#..",
    ".#..#..",
    ".#.##..",
    "...#..B",
];

/// A larger map for benches and agent runs.
pub const FARM_12X8: &[&str] = &[
    "S...........",
    "..##....#...",
    "..#.....#...",
    "......###...",
    ".T..........",
    ".T...##...T.",
    ".T........T.",
    "...........B",
];

/// Build an obstacle-free field with the drone at `(0, 0)`.
pub fn open_field(width: u32, height: u32) -> Field {
    let plan = Layout::Open
        .resolve(width, height, None, None)
        .expect("open layout resolves");
    Field::new(&plan, GrowthThresholds::default()).expect("open field is valid")
}

/// Build a field from ASCII rows.
pub fn field_from_ascii(rows: &[&str], thresholds: GrowthThresholds) -> Field {
    let layout = ascii_layout(rows);
    let (width, height) = layout.dimensions().expect("ascii layout has dimensions");
    let plan = layout
        .resolve(width, height, None, None)
        .expect("fixture layout resolves");
    Field::new(&plan, thresholds).expect("fixture field is valid")
}

/// Wrap ASCII rows in a [`Layout`].
pub fn ascii_layout(rows: &[&str]) -> Layout {
    Layout::Ascii {
        rows: rows.iter().map(|r| r.to_string()).collect(),
    }
}

/// Parse a whitespace-separated action script, e.g. `"w r r d"`.
///
/// Tokens use the short forms accepted by `Action::from_str`.
pub fn script(text: &str) -> Vec<Action> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse()
                .unwrap_or_else(|e| panic!("bad script token '{tok}': {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilth_core::{Direction, Terrain};

    #[test]
    fn every_fixture_builds() {
        for rows in [BASE_ONLY, STRIP_3X1, WALLED_CORRIDOR, POCKET, FARM_12X8] {
            let field = field_from_ascii(rows, GrowthThresholds::default());
            assert!(field.is_passable(field.drone()));
        }
    }

    #[test]
    fn base_only_has_no_soil() {
        let field = field_from_ascii(BASE_ONLY, GrowthThresholds::default());
        assert_eq!(field.farmable_count(), 0);
        assert_eq!(field.terrain(field.drone()), Some(Terrain::Base));
    }

    #[test]
    fn script_parses_short_forms() {
        assert_eq!(
            script("w r d"),
            vec![
                Action::Wait,
                Action::Move(Direction::Right),
                Action::Move(Direction::Down)
            ]
        );
    }
}
