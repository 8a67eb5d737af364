//! Obstacle layouts and their resolution into concrete positions.

use crate::error::FieldError;
use crate::field::Field;
use crate::grid;
use indexmap::IndexSet;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tilth_core::Position;

/// How the obstacle layout of a field is produced.
///
/// A layout is resolved once, at construction, into a [`ResolvedLayout`].
/// The field never changes its obstacles afterwards.
///
/// # Examples
///
/// ```
/// use tilth_core::Position;
/// use tilth_space::Layout;
///
/// let layout = Layout::from_ascii("S.#\n..B\n");
/// assert_eq!(layout.dimensions(), Some((3, 2)));
///
/// let plan = layout.resolve(3, 2, None, None).unwrap();
/// assert_eq!(plan.start, Position::new(0, 0));
/// assert_eq!(plan.base, Some(Position::new(2, 1)));
/// assert!(plan.obstacles.contains(&Position::new(2, 0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    /// No obstacles at all.
    Open,
    /// An explicit list of obstacle positions.
    Explicit {
        /// Obstacle positions. Duplicates collapse.
        obstacles: Vec<Position>,
    },
    /// A text map, one string per row.
    ///
    /// `#` or `T` is an obstacle, `B` the base, `S` the drone start,
    /// `.` or a space is empty soil.
    Ascii {
        /// Map rows, top to bottom.
        rows: Vec<String>,
    },
    /// A fixed tree pattern: every third column of the middle row, plus
    /// every fourth row of the middle column starting at row 2. Fields
    /// smaller than 4×4 get no trees.
    #[default]
    Scattered,
    /// Obstacles drawn from a seeded RNG. Every passable tile stays
    /// reachable from the start.
    Generated {
        /// RNG seed.
        seed: u64,
        /// Target fraction of tiles to block, in `[0, 1)`.
        density: f64,
    },
}

/// A layout with every position decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLayout {
    /// Grid width.
    pub width: u32,
    /// Grid height.
    pub height: u32,
    /// Obstacle positions in insertion order.
    pub obstacles: IndexSet<Position>,
    /// Base position, if any.
    pub base: Option<Position>,
    /// Drone start position.
    pub start: Position,
}

impl Layout {
    /// Build a [`Layout::Ascii`] from multi-line text.
    ///
    /// Fully empty lines are skipped so trailing newlines do not count as
    /// rows. A line of spaces is a row of empty soil.
    pub fn from_ascii(text: &str) -> Self {
        Layout::Ascii {
            rows: text
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// The size the layout itself dictates, if any.
    ///
    /// Only ASCII maps carry their own dimensions.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Layout::Ascii { rows } => {
                let width = rows.first().map_or(0, |r| r.chars().count());
                Some((width as u32, rows.len() as u32))
            }
            Layout::Open
            | Layout::Explicit { .. }
            | Layout::Scattered
            | Layout::Generated { .. } => None,
        }
    }

    /// Resolve the layout for a `width × height` field.
    ///
    /// `base` and `start` are the configured markers. An ASCII map may
    /// also carry them; a map marker that disagrees with the configured
    /// value is a [`FieldError::ConflictingMarker`]. The start defaults
    /// to the base, then to `(0, 0)`.
    ///
    /// Bounds and passability of the result are checked by
    /// [`Field::new`](crate::Field::new), not here.
    pub fn resolve(
        &self,
        width: u32,
        height: u32,
        base: Option<Position>,
        start: Option<Position>,
    ) -> Result<ResolvedLayout, FieldError> {
        Field::check_dimensions(width, height)?;
        match self {
            Layout::Open => Ok(finish(width, height, IndexSet::new(), base, start)),
            Layout::Explicit { obstacles } => Ok(finish(
                width,
                height,
                obstacles.iter().copied().collect(),
                base,
                start,
            )),
            Layout::Ascii { rows } => parse_ascii(rows, width, height, base, start),
            Layout::Scattered => {
                let plan = finish(width, height, scattered(width, height), base, start);
                Ok(without_markers(plan))
            }
            Layout::Generated { seed, density } => {
                if !density.is_finite() || !(0.0..1.0).contains(density) {
                    return Err(FieldError::InvalidDensity { density: *density });
                }
                let mut plan = finish(width, height, IndexSet::new(), base, start);
                plan.obstacles = generate(&plan, *seed, *density);
                Ok(plan)
            }
        }
    }
}

fn finish(
    width: u32,
    height: u32,
    obstacles: IndexSet<Position>,
    base: Option<Position>,
    start: Option<Position>,
) -> ResolvedLayout {
    let start = start.or(base).unwrap_or(Position::new(0, 0));
    ResolvedLayout {
        width,
        height,
        obstacles,
        base,
        start,
    }
}

/// Pattern layouts never cover the markers.
fn without_markers(mut plan: ResolvedLayout) -> ResolvedLayout {
    if let Some(base) = plan.base {
        plan.obstacles.shift_remove(&base);
    }
    plan.obstacles.shift_remove(&plan.start);
    plan
}

fn scattered(width: u32, height: u32) -> IndexSet<Position> {
    let mut trees = IndexSet::new();
    if width < 4 || height < 4 {
        return trees;
    }
    let (w, h) = (width as i32, height as i32);
    let mid_y = (h / 2).max(1);
    for x in (1..w).step_by(3) {
        trees.insert(Position::new(x, mid_y));
    }
    for y in (2..h).step_by(4) {
        trees.insert(Position::new(w / 2, y));
    }
    trees
}

/// Place up to `density * cells` obstacles, keeping every passable tile
/// connected to the start.
fn generate(plan: &ResolvedLayout, seed: u64, density: f64) -> IndexSet<Position> {
    let (width, height) = (plan.width, plan.height);
    let cells = width as usize * height as usize;
    let target = (density * cells as f64).floor() as usize;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut candidates: Vec<usize> = (0..cells)
        .filter(|&i| {
            let pos = grid::position_of(i, width);
            pos != plan.start && Some(pos) != plan.base
        })
        .collect();
    candidates.shuffle(&mut rng);

    let mut blocked = vec![false; cells];
    let mut obstacles = IndexSet::new();
    for idx in candidates {
        if obstacles.len() >= target {
            break;
        }
        blocked[idx] = true;
        let seen = grid::flood_fill(plan.start, width, height, |i| !blocked[i]);
        let connected = seen.iter().zip(&blocked).all(|(&s, &b)| s || b);
        if connected {
            obstacles.insert(grid::position_of(idx, width));
        } else {
            blocked[idx] = false;
        }
    }
    obstacles
}

fn parse_ascii(
    rows: &[String],
    width: u32,
    height: u32,
    base: Option<Position>,
    start: Option<Position>,
) -> Result<ResolvedLayout, FieldError> {
    let expected = rows.first().map_or(0, |r| r.chars().count());
    if expected == 0 {
        return Err(FieldError::EmptyField);
    }
    let actual = (expected as u32, rows.len() as u32);
    if actual != (width, height) {
        return Err(FieldError::LayoutSizeMismatch {
            expected: (width, height),
            actual,
        });
    }

    let mut obstacles = IndexSet::new();
    let mut map_base: Option<Position> = None;
    let mut map_start: Option<Position> = None;

    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != expected {
            return Err(FieldError::RaggedLayout {
                row: y,
                expected,
                actual: len,
            });
        }
        for (x, glyph) in row.chars().enumerate() {
            let position = Position::new(x as i32, y as i32);
            match glyph {
                '#' | 'T' => {
                    obstacles.insert(position);
                }
                'B' => place_marker('B', position, &mut map_base)?,
                'S' => place_marker('S', position, &mut map_start)?,
                '.' | ' ' => {}
                _ => return Err(FieldError::UnknownGlyph { glyph, position }),
            }
        }
    }

    let base = merge_marker('B', base, map_base)?;
    let start = merge_marker('S', start, map_start)?;
    Ok(finish(width, height, obstacles, base, start))
}

fn place_marker(
    marker: char,
    position: Position,
    slot: &mut Option<Position>,
) -> Result<(), FieldError> {
    if slot.is_some() {
        return Err(FieldError::ConflictingMarker { marker, position });
    }
    *slot = Some(position);
    Ok(())
}

fn merge_marker(
    marker: char,
    configured: Option<Position>,
    from_map: Option<Position>,
) -> Result<Option<Position>, FieldError> {
    match (configured, from_map) {
        (Some(c), Some(m)) if c != m => Err(FieldError::ConflictingMarker { marker, position: m }),
        (c, m) => Ok(c.or(m)),
    }
}
