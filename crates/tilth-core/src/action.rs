//! Agent actions: the typed [`Action`] and its raw wire form.

use crate::error::ActionError;
use crate::geometry::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action requested by an agent for one turn.
///
/// Exactly one action is applied per step. Moving into an obstacle or off
/// the grid is legal: the drone stays put and the turn still advances.
///
/// # Examples
///
/// ```
/// use tilth_core::{Action, Direction};
///
/// let a: Action = "move right".parse().unwrap();
/// assert_eq!(a, Action::Move(Direction::Right));
/// assert_eq!("wait".parse::<Action>().unwrap(), Action::Wait);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Move one cell in the given direction.
    Move(Direction),
    /// Stay in place for this turn.
    Wait,
}

impl Action {
    /// The direction carried by a move, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Move(d) => Some(d),
            Action::Wait => None,
        }
    }

    /// Encode into the raw wire form.
    pub fn to_raw(self) -> RawAction {
        match self {
            Action::Wait => RawAction::wait(),
            Action::Move(d) => RawAction::move_code(d.code()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(d) => write!(f, "move {d}"),
            Action::Wait => f.write_str("wait"),
        }
    }
}

impl FromStr for Action {
    type Err = ActionError;

    /// Accepts `wait`, `.`, a bare direction (`right`, `r`, ...), or
    /// `move <direction>`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let first = words.next().unwrap_or("");
        let rest = words.next();
        if words.next().is_some() {
            return Err(ActionError::Unparseable { input: s.to_string() });
        }

        let direction = |word: &str| match word {
            "right" | "r" | "east" => Some(Direction::Right),
            "down" | "d" | "south" => Some(Direction::Down),
            "left" | "l" | "west" => Some(Direction::Left),
            "up" | "u" | "north" => Some(Direction::Up),
            _ => None,
        };

        match (first, rest) {
            ("wait" | "." | "w", None) => Ok(Action::Wait),
            ("move" | "m", Some(word)) => direction(word)
                .map(Action::Move)
                .ok_or_else(|| ActionError::Unparseable { input: s.to_string() }),
            (word, None) => direction(word)
                .map(Action::Move)
                .ok_or_else(|| ActionError::Unparseable { input: s.to_string() }),
            _ => Err(ActionError::Unparseable { input: s.to_string() }),
        }
    }
}

/// Untyped action as produced by input adapters and foreign callers.
///
/// `kind` is 0 for WAIT and 1 for MOVE; `direction` uses the codes of
/// [`Direction::code`]. Nothing about a `RawAction` is trusted until it
/// has been converted with [`TryFrom`].
///
/// # Examples
///
/// ```
/// use tilth_core::{Action, ActionError, Direction, RawAction};
///
/// let ok = Action::try_from(RawAction::move_code(1)).unwrap();
/// assert_eq!(ok, Action::Move(Direction::Down));
///
/// let bad = Action::try_from(RawAction { kind: 1, direction: None });
/// assert_eq!(bad, Err(ActionError::MissingDirection));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawAction {
    /// Action kind code.
    pub kind: u8,
    /// Optional direction code.
    pub direction: Option<u8>,
}

impl RawAction {
    /// Kind code for WAIT.
    pub const KIND_WAIT: u8 = 0;
    /// Kind code for MOVE.
    pub const KIND_MOVE: u8 = 1;

    /// A well-formed WAIT.
    pub fn wait() -> Self {
        Self {
            kind: Self::KIND_WAIT,
            direction: None,
        }
    }

    /// A MOVE carrying the given direction code (validated on conversion).
    pub fn move_code(direction: u8) -> Self {
        Self {
            kind: Self::KIND_MOVE,
            direction: Some(direction),
        }
    }
}

impl TryFrom<RawAction> for Action {
    type Error = ActionError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        match (raw.kind, raw.direction) {
            (RawAction::KIND_WAIT, None) => Ok(Action::Wait),
            (RawAction::KIND_WAIT, Some(code)) => Err(ActionError::UnexpectedDirection { code }),
            (RawAction::KIND_MOVE, None) => Err(ActionError::MissingDirection),
            (RawAction::KIND_MOVE, Some(code)) => Direction::from_code(code)
                .map(Action::Move)
                .ok_or(ActionError::UnknownDirection { code }),
            (code, _) => Err(ActionError::UnknownKind { code }),
        }
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        action.to_raw()
    }
}
