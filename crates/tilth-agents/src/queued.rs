//! Adapter for externally chosen actions, such as key presses.

use std::collections::VecDeque;

use tilth_core::Action;
use tilth_obs::Observation;

use crate::agent::Agent;

/// Plays actions pushed from outside, oldest first.
///
/// An input layer maps key events to [`Action`]s and calls
/// [`queue()`](QueuedAgent::queue). When nothing is pending the agent
/// waits, so the simulation never blocks on input.
///
/// # Examples
///
/// ```
/// use tilth_agents::{Agent, QueuedAgent};
/// use tilth_core::{Action, Direction};
/// # use tilth_core::{GrowthThresholds, TurnId};
/// # use tilth_space::{Field, Layout};
/// # let plan = Layout::Open.resolve(2, 2, None, None).unwrap();
/// # let field = Field::new(&plan, GrowthThresholds::default()).unwrap();
/// # let obs = tilth_obs::build_observation(&field, TurnId(0), None);
///
/// let mut agent = QueuedAgent::new();
/// agent.queue(Action::Move(Direction::Down));
/// assert!(agent.has_pending());
/// assert_eq!(agent.decide(&obs), Action::Move(Direction::Down));
/// assert_eq!(agent.decide(&obs), Action::Wait);
/// ```
#[derive(Clone, Debug, Default)]
pub struct QueuedAgent {
    pending: VecDeque<Action>,
}

impl QueuedAgent {
    /// An agent with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action to the queue.
    pub fn queue(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    /// Whether any queued action has not been played yet.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of queued actions.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drop every queued action.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Agent for QueuedAgent {
    fn name(&self) -> &str {
        "queued"
    }

    fn decide(&mut self, _observation: &Observation) -> Action {
        self.pending.pop_front().unwrap_or(Action::Wait)
    }

    fn reset(&mut self) {
        self.pending.clear();
    }
}
