//! Grid positions and cardinal directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the field.
///
/// `x` grows to the right and `y` grows downward, so `(0, 0)` is the
/// top-left corner. Coordinates are signed so that stepping off the edge
/// produces a representable (but out-of-bounds) position rather than an
/// underflow.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Position {
    /// Create a position from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one step away in `direction`. No bounds checking.
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether this position lies inside a `width × height` grid.
    pub fn in_bounds(self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as i64) < width as i64
            && (self.y as i64) < height as i64
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The direction that moves from `self` to the adjacent `other`,
    /// or `None` if the two positions are not 4-neighbours.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.offset(d) == other)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction for drone movement.
///
/// The declaration order is the tie-break priority used by the reference
/// agent's search: RIGHT, DOWN, LEFT, UP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    /// One cell right (x + 1).
    Right = 0,
    /// One cell down (y + 1).
    Down = 1,
    /// One cell left (x - 1).
    Left = 2,
    /// One cell up (y - 1).
    Up = 3,
}

impl Direction {
    /// All four directions in search priority order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Returns the `(dx, dy)` unit displacement for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    /// Wire code used by [`RawAction`](crate::RawAction).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a wire code. Returns `None` for codes outside `0..=3`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Right),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Up),
            _ => None,
        }
    }

    /// Lowercase name, as used in logs and text input.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Up => "up",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deltas_are_unit_cardinals() {
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Up.delta(), (0, -1));
    }

    #[test]
    fn priority_order_is_right_down_left_up() {
        assert_eq!(
            Direction::ALL,
            [
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up
            ]
        );
    }

    #[test]
    fn codes_round_trip_and_reject_unknown() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_code(d.code()), Some(d));
        }
        assert_eq!(Direction::from_code(4), None);
        assert_eq!(Direction::from_code(255), None);
    }

    #[test]
    fn bounds_check_edges() {
        assert!(Position::new(0, 0).in_bounds(3, 1));
        assert!(Position::new(2, 0).in_bounds(3, 1));
        assert!(!Position::new(3, 0).in_bounds(3, 1));
        assert!(!Position::new(0, 1).in_bounds(3, 1));
        assert!(!Position::new(-1, 0).in_bounds(3, 1));
    }

    #[test]
    fn direction_to_adjacent_only() {
        let p = Position::new(2, 2);
        assert_eq!(p.direction_to(Position::new(3, 2)), Some(Direction::Right));
        assert_eq!(p.direction_to(Position::new(2, 1)), Some(Direction::Up));
        assert_eq!(p.direction_to(Position::new(3, 3)), None);
        assert_eq!(p.direction_to(p), None);
    }

    #[test]
    fn serde_uses_lowercase_direction_names() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
    }

    proptest! {
        #[test]
        fn offset_then_opposite_is_identity(x in -50i32..50, y in -50i32..50, d in 0u8..4) {
            let dir = Direction::from_code(d).unwrap();
            let p = Position::new(x, y);
            prop_assert_eq!(p.offset(dir).offset(dir.opposite()), p);
            prop_assert_eq!(p.manhattan(p.offset(dir)), 1);
        }
    }
}
