//! Environment configuration, validation, and error types.
//!
//! [`EnvironmentConfig`] is the serde-facing input for building an
//! [`Environment`](crate::Environment).
//! [`validate()`](EnvironmentConfig::validate) checks every construction
//! invariant up front so that no turn is ever processed on a bad config.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use tilth_core::{GrowthThresholds, Position};
use tilth_space::{Field, FieldError, Layout, ResolvedLayout};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an [`EnvironmentConfig`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The field or its layout is invalid.
    Field(FieldError),
    /// A growth stage lasts zero turns.
    InvalidThresholds {
        /// The offending threshold name.
        name: &'static str,
    },
    /// `max_turns` is `Some(0)`; use `None` for an unbounded run.
    ZeroMaxTurns,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "field: {e}"),
            Self::InvalidThresholds { name } => write!(f, "{name} must be at least 1"),
            Self::ZeroMaxTurns => write!(f, "max_turns must be at least 1 when set"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for ConfigError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

// ── EnvironmentConfig ──────────────────────────────────────────────

/// Complete configuration for building an environment.
///
/// Missing keys take their [`Default`] values when deserialized.
///
/// # Examples
///
/// ```
/// use tilth_engine::EnvironmentConfig;
///
/// let json = r#"{ "width": 5, "height": 4, "layout": { "kind": "open" } }"#;
/// let config: EnvironmentConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.max_turns, Some(120));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Field width in tiles. Default: 8.
    pub width: u32,
    /// Field height in tiles. Default: 6.
    pub height: u32,
    /// How obstacles are placed. Default: [`Layout::Scattered`].
    pub layout: Layout,
    /// Launch pad position. Default: none.
    pub base: Option<Position>,
    /// Drone start. Defaults to the base, then `(0, 0)`.
    pub start: Option<Position>,
    /// Crop stage durations.
    pub thresholds: GrowthThresholds,
    /// Turn limit. `None` runs until stopped. Default: 120.
    pub max_turns: Option<u64>,
    /// Also terminate once every farmable tile is Ready. Default: false.
    pub stop_when_fully_grown: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 6,
            layout: Layout::Scattered,
            base: None,
            start: None,
            thresholds: GrowthThresholds::default(),
            max_turns: Some(120),
            stop_when_fully_grown: false,
        }
    }
}

impl EnvironmentConfig {
    /// Obstacle-free field with no base and the drone at `(0, 0)`.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layout: Layout::Open,
            ..Self::default()
        }
    }

    /// The classic planting challenge: scattered trees and the base in
    /// the top-right corner, where the drone also starts.
    pub fn planting(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layout: Layout::Scattered,
            base: Some(Position::new(width.saturating_sub(1) as i32, 0)),
            ..Self::default()
        }
    }

    /// Field from ASCII rows. Dimensions come from the map.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let layout = Layout::Ascii {
            rows: rows.iter().map(|r| r.to_string()).collect(),
        };
        let (width, height) = layout.dimensions().unwrap_or((0, 0));
        Self {
            width,
            height,
            layout,
            ..Self::default()
        }
    }

    /// Replace the growth thresholds.
    pub fn with_thresholds(mut self, seed_to_growing: u32, growing_to_ready: u32) -> Self {
        self.thresholds = GrowthThresholds::new(seed_to_growing, growing_to_ready);
        self
    }

    /// Replace the turn limit.
    pub fn with_max_turns(mut self, max_turns: Option<u64>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Validate every construction invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_field().map(|_| ())
    }

    /// Resolve the layout into concrete positions.
    pub fn resolve_layout(&self) -> Result<ResolvedLayout, ConfigError> {
        self.thresholds
            .validate()
            .map_err(|name| ConfigError::InvalidThresholds { name })?;
        if self.max_turns == Some(0) {
            return Err(ConfigError::ZeroMaxTurns);
        }
        Ok(self
            .layout
            .resolve(self.width, self.height, self.base, self.start)?)
    }

    /// Validate and build a fresh field.
    pub(crate) fn build_field(&self) -> Result<Field, ConfigError> {
        let plan = self.resolve_layout()?;
        Ok(Field::new(&plan, self.thresholds)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_planting_layout() {
        let config = EnvironmentConfig::default();
        assert!(config.validate().is_ok());
        assert!(EnvironmentConfig::planting(8, 6).validate().is_ok());
    }

    #[test]
    fn zero_threshold_rejected() {
        let config = EnvironmentConfig::open(3, 3).with_thresholds(0, 2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThresholds {
                name: "seed_to_growing_turns"
            })
        );
    }

    #[test]
    fn zero_max_turns_rejected() {
        let config = EnvironmentConfig::open(3, 3).with_max_turns(Some(0));
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxTurns));
        let unbounded = EnvironmentConfig::open(3, 3).with_max_turns(None);
        assert!(unbounded.validate().is_ok());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            EnvironmentConfig::open(0, 3).validate(),
            Err(ConfigError::Field(FieldError::EmptyField))
        );
    }

    #[test]
    fn unreachable_farmland_rejected() {
        let config = EnvironmentConfig::from_ascii(&["B#.."]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Field(FieldError::NoReachableFarmland { .. }))
        ));
    }

    #[test]
    fn error_source_chains_to_field_error() {
        let err = ConfigError::from(FieldError::EmptyField);
        assert!(err.source().is_some());
        assert!(ConfigError::ZeroMaxTurns.source().is_none());
        assert_eq!(err.to_string(), "field: field must have at least one tile");
    }

    #[test]
    fn json_round_trip_keeps_layout() {
        let config = EnvironmentConfig::from_ascii(&["S.#", "..B"]);
        let json = serde_json::to_string(&config).unwrap();
        let back: EnvironmentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
