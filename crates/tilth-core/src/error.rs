//! Error types shared across the Tilth workspace.

use std::error::Error;
use std::fmt;

/// A malformed action reached the engine boundary.
///
/// Raised when converting a [`RawAction`](crate::RawAction) or text into
/// an [`Action`](crate::Action). Any of these indicates a broken agent or
/// input adapter; the engine rejects the step instead of guessing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The action kind code is not WAIT (0) or MOVE (1).
    UnknownKind {
        /// The offending kind code.
        code: u8,
    },
    /// A MOVE arrived without a direction.
    MissingDirection,
    /// The direction code is outside `0..=3`.
    UnknownDirection {
        /// The offending direction code.
        code: u8,
    },
    /// A WAIT arrived carrying a direction payload.
    UnexpectedDirection {
        /// The direction code that should not be there.
        code: u8,
    },
    /// Text input did not name a known action.
    Unparseable {
        /// The input that failed to parse.
        input: String,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { code } => write!(f, "unknown action kind code {code}"),
            Self::MissingDirection => write!(f, "move action carries no direction"),
            Self::UnknownDirection { code } => write!(f, "unknown direction code {code}"),
            Self::UnexpectedDirection { code } => {
                write!(f, "wait action carries direction code {code}")
            }
            Self::Unparseable { input } => write!(f, "cannot parse action from '{input}'"),
        }
    }
}

impl Error for ActionError {}
