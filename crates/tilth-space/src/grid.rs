//! Shared helpers for the row-major 2D tile grid.

use smallvec::SmallVec;
use std::collections::VecDeque;
use tilth_core::{Direction, Position};

/// Flat row-major index of `pos`, or `None` if it is out of bounds.
pub(crate) fn flat_index(pos: Position, width: u32, height: u32) -> Option<usize> {
    if !pos.in_bounds(width, height) {
        return None;
    }
    Some(pos.y as usize * width as usize + pos.x as usize)
}

/// Inverse of [`flat_index`].
pub(crate) fn position_of(index: usize, width: u32) -> Position {
    let w = width as usize;
    Position::new((index % w) as i32, (index / w) as i32)
}

/// In-bounds 4-neighbours of `pos` in RIGHT, DOWN, LEFT, UP order.
pub(crate) fn neighbours(pos: Position, width: u32, height: u32) -> SmallVec<[Position; 4]> {
    Direction::ALL
        .into_iter()
        .map(|d| pos.offset(d))
        .filter(|p| p.in_bounds(width, height))
        .collect()
}

/// Breadth-first flood fill from `start` over cells for which `passable`
/// returns true. Returns a row-major visited mask.
///
/// `start` is always marked, even if `passable(start)` is false; callers
/// validate the start tile separately.
pub(crate) fn flood_fill(
    start: Position,
    width: u32,
    height: u32,
    passable: impl Fn(usize) -> bool,
) -> Vec<bool> {
    let n = (width as usize) * (height as usize);
    let mut visited = vec![false; n];
    let Some(start_idx) = flat_index(start, width, height) else {
        return visited;
    };
    let mut queue = VecDeque::new();
    visited[start_idx] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in neighbours(current, width, height) {
            let Some(i) = flat_index(next, width, height) else {
                continue;
            };
            if !visited[i] && passable(i) {
                visited[i] = true;
                queue.push_back(next);
            }
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_round_trips() {
        for i in 0..12 {
            let p = position_of(i, 4);
            assert_eq!(flat_index(p, 4, 3), Some(i));
        }
        assert_eq!(flat_index(Position::new(4, 0), 4, 3), None);
        assert_eq!(flat_index(Position::new(0, -1), 4, 3), None);
    }

    #[test]
    fn neighbours_corner_and_interior() {
        let corner = neighbours(Position::new(0, 0), 3, 3);
        assert_eq!(corner.as_slice(), &[Position::new(1, 0), Position::new(0, 1)]);

        let centre = neighbours(Position::new(1, 1), 3, 3);
        assert_eq!(
            centre.as_slice(),
            &[
                Position::new(2, 1),
                Position::new(1, 2),
                Position::new(0, 1),
                Position::new(1, 0),
            ]
        );
    }

    #[test]
    fn neighbours_single_row() {
        let n = neighbours(Position::new(1, 0), 3, 1);
        assert_eq!(n.as_slice(), &[Position::new(2, 0), Position::new(0, 0)]);
    }

    #[test]
    fn flood_fill_stops_at_walls() {
        // .#.
        // .#.
        // ...
        let walls = [1usize, 4];
        let seen = flood_fill(Position::new(0, 0), 3, 3, |i| !walls.contains(&i));
        assert!(seen.iter().enumerate().all(|(i, &s)| s != walls.contains(&i)));

        // Close the bottom gap: right column becomes unreachable.
        let walls = [1usize, 4, 7];
        let seen = flood_fill(Position::new(0, 0), 3, 3, |i| !walls.contains(&i));
        assert!(!seen[2] && !seen[5] && !seen[8]);
        assert!(seen[0] && seen[3] && seen[6]);
    }
}
