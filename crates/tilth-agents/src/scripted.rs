//! Replays a fixed action list.

use tilth_core::Action;
use tilth_obs::Observation;

use crate::agent::Agent;

/// Plays a fixed list of actions in order, then waits forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    script: Vec<Action>,
    cursor: usize,
}

impl ScriptedAgent {
    /// Agent that plays `script` from the start.
    pub fn new(script: Vec<Action>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Whether every scripted action has been played.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.script.len()
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, _observation: &Observation) -> Action {
        match self.script.get(self.cursor) {
            Some(&action) => {
                self.cursor += 1;
                action
            }
            None => Action::Wait,
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilth_core::TurnId;
    use tilth_obs::build_observation;
    use tilth_test_utils::fixtures;

    #[test]
    fn plays_script_then_waits_and_rewinds() {
        let field = fixtures::open_field(2, 2);
        let obs = build_observation(&field, TurnId(0), None);
        let mut agent = ScriptedAgent::new(fixtures::script("r d"));
        let played: Vec<Action> = (0..4).map(|_| agent.decide(&obs)).collect();
        assert_eq!(played[2..], [Action::Wait, Action::Wait]);
        assert!(agent.is_finished());
        agent.reset();
        assert!(!agent.is_finished());
        assert_eq!(agent.decide(&obs), played[0]);
    }
}
