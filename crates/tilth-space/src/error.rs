//! Error types for field construction and layout resolution.

use std::fmt;
use tilth_core::Position;

/// Errors arising while building a field from a layout.
///
/// All of these are detected before the first turn is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Width or height is zero.
    EmptyField,
    /// A dimension does not fit the signed coordinate type.
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The configured value.
        value: u32,
        /// The maximum accepted value.
        max: u32,
    },
    /// The field has more tiles than [`Field::MAX_CELLS`](crate::Field::MAX_CELLS).
    TooManyCells {
        /// `width * height`.
        cells: u64,
        /// The maximum accepted tile count.
        max: u64,
    },
    /// A configured position lies outside the grid.
    OutOfBounds {
        /// What the position was for (`"obstacle"`, `"base"`, `"start"`).
        what: &'static str,
        /// The offending position.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// An obstacle was placed on the base tile.
    ObstacleOnBase {
        /// The base position.
        position: Position,
    },
    /// The drone start tile is an obstacle.
    StartBlocked {
        /// The start position.
        position: Position,
    },
    /// Farmable tiles exist but none can be reached from the start.
    NoReachableFarmland {
        /// The start position.
        start: Position,
        /// How many farmable tiles the layout has.
        farmable: usize,
    },
    /// An ASCII layout row has a different length than the first row.
    RaggedLayout {
        /// Zero-based row index.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        actual: usize,
    },
    /// An ASCII layout contains a character with no meaning.
    UnknownGlyph {
        /// The character.
        glyph: char,
        /// Where it was found.
        position: Position,
    },
    /// An ASCII layout does not match the configured dimensions.
    LayoutSizeMismatch {
        /// Configured `(width, height)`.
        expected: (u32, u32),
        /// Layout `(width, height)`.
        actual: (u32, u32),
    },
    /// A single-instance marker (`B` or `S`) appears more than once, or
    /// disagrees with an explicitly configured position.
    ConflictingMarker {
        /// The marker character.
        marker: char,
        /// Position of the conflicting occurrence.
        position: Position,
    },
    /// Generated-layout density is not in `[0, 1)`.
    InvalidDensity {
        /// The configured density.
        density: f64,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField => write!(f, "field must have at least one tile"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum {max}")
            }
            Self::TooManyCells { cells, max } => {
                write!(f, "field has {cells} tiles, maximum is {max}")
            }
            Self::OutOfBounds {
                what,
                position,
                width,
                height,
            } => write!(
                f,
                "{what} position {position} outside [0, {width}) x [0, {height})"
            ),
            Self::ObstacleOnBase { position } => {
                write!(f, "obstacle placed on base tile {position}")
            }
            Self::StartBlocked { position } => {
                write!(f, "drone start {position} is an obstacle")
            }
            Self::NoReachableFarmland { start, farmable } => write!(
                f,
                "none of the {farmable} farmable tiles is reachable from {start}"
            ),
            Self::RaggedLayout {
                row,
                expected,
                actual,
            } => write!(
                f,
                "layout row {row} has width {actual}, expected {expected}"
            ),
            Self::UnknownGlyph { glyph, position } => {
                write!(f, "unsupported layout character {glyph:?} at {position}")
            }
            Self::LayoutSizeMismatch { expected, actual } => write!(
                f,
                "layout is {}x{}, configured field is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::ConflictingMarker { marker, position } => {
                write!(f, "conflicting '{marker}' marker at {position}")
            }
            Self::InvalidDensity { density } => {
                write!(f, "obstacle density must be in [0, 1), got {density}")
            }
        }
    }
}

impl std::error::Error for FieldError {}
