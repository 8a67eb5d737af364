//! Uniform random policy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tilth_core::{Action, Direction};
use tilth_obs::Observation;

use crate::agent::Agent;

/// Picks one of the four moves uniformly at random each turn.
///
/// Uses a seeded ChaCha8 RNG, so two agents built with the same seed
/// produce the same action sequence. [`reset()`](Agent::reset) rewinds
/// to the seed.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    /// Create an agent seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The seed this agent was built with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, _observation: &Observation) -> Action {
        let idx = self.rng.gen_range(0..Direction::ALL.len());
        Action::Move(Direction::ALL[idx])
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
