//! The [`Agent`] trait and the trivial [`WaitAgent`].

use tilth_core::Action;
use tilth_obs::Observation;

/// A decision unit: one observation in, one action out.
///
/// # Contract
///
/// - `decide()` sees only the observation. It may update private memory
///   but has no way to reach the field.
/// - Given the same sequence of observations, a deterministic agent must
///   return the same sequence of actions.
/// - `reset()` forgets all memory so the agent can start a new run.
///
/// # Object safety
///
/// This trait is object-safe; drivers hold agents as `Box<dyn Agent>`.
///
/// # Examples
///
/// ```
/// use tilth_agents::Agent;
/// use tilth_core::{Action, Direction};
/// use tilth_obs::Observation;
///
/// struct AlwaysRight;
///
/// impl Agent for AlwaysRight {
///     fn name(&self) -> &str { "always_right" }
///
///     fn decide(&mut self, _obs: &Observation) -> Action {
///         Action::Move(Direction::Right)
///     }
/// }
///
/// let agent = AlwaysRight;
/// assert_eq!(agent.name(), "always_right");
/// ```
pub trait Agent: Send {
    /// Human-readable name for logs and summaries.
    fn name(&self) -> &str;

    /// Choose the action for this turn.
    fn decide(&mut self, observation: &Observation) -> Action;

    /// Forget everything learned during the previous run.
    fn reset(&mut self) {}
}

/// Waits every turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaitAgent;

impl Agent for WaitAgent {
    fn name(&self) -> &str {
        "wait"
    }

    fn decide(&mut self, _observation: &Observation) -> Action {
        Action::Wait
    }
}
