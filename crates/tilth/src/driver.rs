//! Episode driver: the observe → decide → step loop.

use std::error::Error;
use std::fmt;

use serde::Serialize;
use tilth_agents::Agent;
use tilth_core::Action;
use tilth_engine::{CoverageMetrics, Environment, StepError, StepResult, Summary};
use tracing::{debug, info};

/// Why an episode could not be run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EpisodeError {
    /// Neither a turn limit nor a turn budget is set. The fully-grown stop
    /// does not count: an agent that never plants, or soil walled off from
    /// the start, means it is never reached.
    Unbounded,
    /// The environment refused a step.
    Step(StepError),
}

impl fmt::Display for EpisodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "episode has neither a turn limit nor a turn budget"),
            Self::Step(e) => write!(f, "step failed: {e}"),
        }
    }
}

impl Error for EpisodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Step(e) => Some(e),
            Self::Unbounded => None,
        }
    }
}

impl From<StepError> for EpisodeError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

/// What happened during one episode.
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeReport {
    /// Agent name as reported by [`Agent::name`].
    pub agent: String,
    /// Every action taken, in turn order.
    pub actions: Vec<Action>,
    /// Metrics after the last step.
    pub metrics: CoverageMetrics,
    /// Run summary after the last step.
    pub summary: Summary,
}

/// Drive `agent` against `env` until the environment terminates or
/// `turn_budget` steps have been taken, whichever comes first.
///
/// `on_step` runs after every successful step, with the environment in
/// its post-step state.
///
/// # Errors
///
/// [`EpisodeError::Unbounded`] if neither `max_turns` in the environment
/// config nor `turn_budget` bounds the run. [`EpisodeError::Step`] if the
/// environment was already terminated when the loop started.
pub fn run_episode<F>(
    env: &mut Environment,
    agent: &mut dyn Agent,
    turn_budget: Option<u64>,
    mut on_step: F,
) -> Result<EpisodeReport, EpisodeError>
where
    F: FnMut(&Environment, &StepResult),
{
    if env.config().max_turns.is_none() && turn_budget.is_none() {
        return Err(EpisodeError::Unbounded);
    }

    debug!(agent = agent.name(), ?turn_budget, "episode started");
    let mut actions = Vec::new();
    loop {
        if turn_budget.is_some_and(|budget| actions.len() as u64 >= budget) {
            break;
        }
        let observation = env.observe();
        let action = agent.decide(&observation);
        let result = env.step(action)?;
        actions.push(action);
        on_step(env, &result);
        if result.terminal {
            break;
        }
    }

    let summary = env.summary();
    info!(
        agent = agent.name(),
        turns = summary.turn,
        grown_plots = summary.grown_plots,
        coverage = summary.coverage,
        "episode finished"
    );
    Ok(EpisodeReport {
        agent: agent.name().to_string(),
        actions,
        metrics: env.metrics().clone(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilth_agents::{ScriptedAgent, WaitAgent};
    use tilth_engine::EnvironmentConfig;
    use tilth_test_utils::fixtures::{self, script};

    #[test]
    fn stops_at_turn_limit() {
        let mut env = Environment::new(EnvironmentConfig::open(3, 3).with_max_turns(Some(5))).unwrap();
        let mut steps = 0;
        let report = run_episode(&mut env, &mut WaitAgent, None, |_, _| steps += 1).unwrap();
        assert_eq!(steps, 5);
        assert_eq!(report.actions, vec![Action::Wait; 5]);
        assert!(report.summary.terminated);
        assert_eq!(report.agent, "wait");
    }

    #[test]
    fn unbounded_run_refused() {
        let config = EnvironmentConfig::open(3, 3).with_max_turns(None);
        let mut env = Environment::new(config).unwrap();
        let err = run_episode(&mut env, &mut WaitAgent, None, |_, _| {}).unwrap_err();
        assert_eq!(err, EpisodeError::Unbounded);
        assert_eq!(env.turn().0, 0);
    }

    #[test]
    fn turn_budget_bounds_unlimited_run() {
        let config = EnvironmentConfig::open(3, 3).with_max_turns(None);
        let mut env = Environment::new(config).unwrap();
        let report = run_episode(&mut env, &mut WaitAgent, Some(7), |_, _| {}).unwrap();
        assert_eq!(report.actions.len(), 7);
        assert!(!report.summary.terminated);
    }

    #[test]
    fn fully_grown_stop_ends_episode() {
        let mut config = EnvironmentConfig::from_ascii(fixtures::STRIP_3X1)
            .with_thresholds(1, 1)
            .with_max_turns(Some(50));
        config.stop_when_fully_grown = true;
        let mut env = Environment::new(config).unwrap();
        let mut agent = ScriptedAgent::new(script("r r w w"));
        let report = run_episode(&mut env, &mut agent, None, |_, _| {}).unwrap();
        assert!(report.metrics.fully_grown());
        assert_eq!(report.summary.grown_plots, 3);
        assert!(report.summary.terminated);
        assert_eq!(report.actions.len(), 4);
    }

    #[test]
    fn fully_grown_stop_alone_is_not_a_bound() {
        let mut config = EnvironmentConfig::open(2, 1).with_max_turns(None);
        config.stop_when_fully_grown = true;
        let mut env = Environment::new(config).unwrap();
        let err = run_episode(&mut env, &mut WaitAgent, None, |_, _| {}).unwrap_err();
        assert_eq!(err, EpisodeError::Unbounded);

        // Soil cut off by a tree never matures, so only the budget ends this run.
        let mut config = EnvironmentConfig::from_ascii(fixtures::WALLED_CORRIDOR).with_max_turns(None);
        config.stop_when_fully_grown = true;
        let mut env = Environment::new(config).unwrap();
        let mut agent = tilth_agents::ReachabilityAgent::new();
        let err = run_episode(&mut env, &mut agent, None, |_, _| {}).unwrap_err();
        assert_eq!(err, EpisodeError::Unbounded);
        let report = run_episode(&mut env, &mut agent, Some(30), |_, _| {}).unwrap();
        assert_eq!(report.actions.len(), 30);
        assert!(!report.metrics.fully_grown());
    }

    #[test]
    fn terminated_environment_reports_step_error() {
        let mut env = Environment::new(EnvironmentConfig::open(2, 2).with_max_turns(Some(1))).unwrap();
        run_episode(&mut env, &mut WaitAgent, None, |_, _| {}).unwrap();
        let err = run_episode(&mut env, &mut WaitAgent, None, |_, _| {}).unwrap_err();
        assert!(matches!(err, EpisodeError::Step(StepError::Terminated { .. })));
    }
}
