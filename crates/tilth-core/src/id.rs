//! The simulation clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing turn counter.
///
/// Starts at 0 when an environment is built and is incremented exactly
/// once per accepted step, whether or not the action changed anything.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TurnId(pub u64);

impl TurnId {
    /// The turn that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TurnId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments_by_one() {
        assert_eq!(TurnId(0).next(), TurnId(1));
        assert_eq!(TurnId(41).next(), TurnId(42));
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(TurnId::default(), TurnId(0));
        assert_eq!(TurnId::from(7).to_string(), "7");
    }
}
