//! The turn engine.
//!
//! [`Environment`] is the only owner of mutable simulation state. Each
//! [`step()`](Environment::step) runs one complete turn:
//! action → movement/planting → growth → clock → metrics → termination
//! check, and returns a [`StepResult`] carrying a fresh observation.
//!
//! # State machine
//!
//! `Running → Terminated`, one way. A step on a terminated environment is
//! rejected with [`StepError::Terminated`] and changes nothing. Only
//! [`reset()`](Environment::reset) starts a new run.

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;
use tilth_core::{Action, ActionError, Position, RawAction, Terrain, TurnId};
use tilth_obs::{build_observation, Observation};
use tilth_space::{Field, GrowthReport, MoveOutcome};
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, EnvironmentConfig};
use crate::metrics::{CoverageMetrics, Summary};

// Compile-time assertion: Environment can move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Environment>();
    }
};

// ── EngineState ─────────────────────────────────────────────────

/// Lifecycle state of an [`Environment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Accepting steps.
    Running,
    /// The run has ended; further steps are rejected.
    Terminated,
}

// ── StepError ───────────────────────────────────────────────────

/// A step that was refused. The environment is unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The environment already terminated. The driving loop must stop.
    Terminated {
        /// Turn at which the run ended.
        turn: TurnId,
    },
    /// A raw action failed validation.
    MalformedAction(ActionError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminated { turn } => {
                write!(f, "step called after termination at turn {turn}")
            }
            Self::MalformedAction(e) => write!(f, "malformed action: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedAction(e) => Some(e),
            Self::Terminated { .. } => None,
        }
    }
}

impl From<ActionError> for StepError {
    fn from(e: ActionError) -> Self {
        Self::MalformedAction(e)
    }
}

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`Environment::step()`] call.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// The agent's view after this turn.
    pub observation: Observation,
    /// Whether the tile under the drone was planted this turn.
    pub planted: bool,
    /// Whether the drone changed tile.
    pub moved: bool,
    /// Whether a move was refused by an obstacle or the grid edge.
    pub blocked: bool,
    /// Stage transitions caused by this turn's growth pass.
    pub growth: GrowthReport,
    /// Metrics after this turn.
    pub metrics: CoverageMetrics,
    /// Whether this turn ended the run.
    pub terminal: bool,
}

// ── Environment ─────────────────────────────────────────────────

/// Single-drone turn engine.
///
/// Created from an [`EnvironmentConfig`] via [`new()`](Environment::new).
///
/// # Examples
///
/// ```
/// use tilth_core::{Action, Direction, Terrain};
/// use tilth_engine::{Environment, EnvironmentConfig};
///
/// let config = EnvironmentConfig::open(3, 1).with_thresholds(1, 1);
/// let mut env = Environment::new(config).unwrap();
///
/// let result = env.step(Action::Move(Direction::Right)).unwrap();
/// assert!(result.planted);
/// assert_eq!(env.turn().0, 1);
/// assert_eq!(result.observation.current(), Some(Terrain::Seed));
/// ```
pub struct Environment {
    config: EnvironmentConfig,
    field: Field,
    turn: TurnId,
    state: EngineState,
    visited: IndexSet<Position>,
    planted_total: u64,
    blocked_moves: u64,
    metrics: CoverageMetrics,
}

impl Environment {
    /// Validate `config` and build a ready-to-step environment at turn 0.
    pub fn new(config: EnvironmentConfig) -> Result<Self, ConfigError> {
        let field = config.build_field()?;
        let mut env = Self {
            config,
            field,
            turn: TurnId::default(),
            state: EngineState::Running,
            visited: IndexSet::new(),
            planted_total: 0,
            blocked_moves: 0,
            metrics: CoverageMetrics::default(),
        };
        env.start_run();
        Ok(env)
    }

    /// Rebuild the field from the stored config and return to turn 0.
    ///
    /// Returns the initial observation of the new run.
    pub fn reset(&mut self) -> Result<Observation, ConfigError> {
        self.field = self.config.build_field()?;
        self.turn = TurnId::default();
        self.state = EngineState::Running;
        self.visited.clear();
        self.planted_total = 0;
        self.blocked_moves = 0;
        self.start_run();
        debug!("environment reset");
        Ok(self.observe())
    }

    fn start_run(&mut self) {
        let start = self.field.drone();
        self.visited.insert(start);
        if self.field.terrain(start) == Some(Terrain::Seed) {
            self.planted_total = 1;
        }
        self.metrics = self.compute_metrics();
    }

    /// Execute one turn.
    ///
    /// # Errors
    ///
    /// [`StepError::Terminated`] if the run has already ended. Nothing
    /// changes in that case.
    pub fn step(&mut self, action: Action) -> Result<StepResult, StepError> {
        if self.state == EngineState::Terminated {
            warn!(turn = self.turn.0, %action, "step rejected: environment terminated");
            return Err(StepError::Terminated { turn: self.turn });
        }

        let outcome: MoveOutcome = match action {
            Action::Move(direction) => self.field.move_drone(direction),
            Action::Wait => self.field.wait(),
        };

        // A tile planted this turn starts counting next turn.
        let skip = outcome.planted.then_some(outcome.position);
        let growth = self.field.advance_growth(skip);
        if growth != GrowthReport::default() {
            trace!(
                sprouted = growth.sprouted,
                matured = growth.matured,
                "growth advanced"
            );
        }

        self.turn = self.turn.next();
        self.visited.insert(outcome.position);
        if outcome.planted {
            self.planted_total += 1;
        }
        if outcome.blocked {
            self.blocked_moves += 1;
        }
        self.metrics = self.compute_metrics();

        debug!(
            turn = self.turn.0,
            %action,
            position = %outcome.position,
            planted = outcome.planted,
            blocked = outcome.blocked,
            "step"
        );

        let terminal = self.termination_reached();
        if terminal {
            self.state = EngineState::Terminated;
            info!(
                turn = self.turn.0,
                grown_plots = self.metrics.ready_tiles,
                coverage = self.metrics.coverage,
                visited = self.metrics.visited_tiles,
                "environment terminated"
            );
        }

        Ok(StepResult {
            observation: self.observe(),
            planted: outcome.planted,
            moved: outcome.moved,
            blocked: outcome.blocked,
            growth,
            metrics: self.metrics.clone(),
            terminal,
        })
    }

    /// Validate a raw action, then execute one turn with it.
    ///
    /// # Errors
    ///
    /// [`StepError::MalformedAction`] if `raw` is not a well-formed
    /// action, otherwise as [`step()`](Environment::step).
    pub fn step_raw(&mut self, raw: RawAction) -> Result<StepResult, StepError> {
        let action = Action::try_from(raw).map_err(|e| {
            warn!(kind = raw.kind, direction = ?raw.direction, error = %e, "malformed action rejected");
            StepError::MalformedAction(e)
        })?;
        self.step(action)
    }

    /// The agent's view of the current turn.
    pub fn observe(&self) -> Observation {
        build_observation(&self.field, self.turn, self.config.max_turns)
    }

    /// Turns completed so far.
    pub fn turn(&self) -> TurnId {
        self.turn
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the run has ended.
    pub fn is_terminated(&self) -> bool {
        self.state == EngineState::Terminated
    }

    /// Metrics as of the last step (or construction).
    pub fn metrics(&self) -> &CoverageMetrics {
        &self.metrics
    }

    /// Read-only access to the field, for renderers and tests.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The configuration this environment was built from.
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Positions the drone has occupied, in first-visit order.
    pub fn visited(&self) -> &IndexSet<Position> {
        &self.visited
    }

    /// Serializable summary of the run so far.
    pub fn summary(&self) -> Summary {
        Summary {
            turn: self.turn.0,
            grown_plots: self.metrics.ready_tiles,
            visited_tiles: self.metrics.visited_tiles,
            coverage: self.metrics.coverage,
            farmable_tiles: self.metrics.farmable_tiles,
            seed_turns: self.config.thresholds.seed_to_growing_turns,
            growing_turns: self.config.thresholds.growing_to_ready_turns,
            obstacle_count: self.field.obstacles().len(),
            terminated: self.is_terminated(),
        }
    }

    fn termination_reached(&self) -> bool {
        let out_of_time = self.config.max_turns.is_some_and(|max| self.turn.0 >= max);
        out_of_time || (self.config.stop_when_fully_grown && self.metrics.fully_grown())
    }

    fn compute_metrics(&self) -> CoverageMetrics {
        let mut m = CoverageMetrics {
            turns: self.turn.0,
            visited_tiles: self.visited.len(),
            planted_total: self.planted_total,
            blocked_moves: self.blocked_moves,
            ..CoverageMetrics::default()
        };
        for (pos, tile) in self.field.iter() {
            let terrain = tile.terrain();
            match terrain {
                Terrain::Seed => m.seeded_tiles += 1,
                Terrain::Growing => m.growing_tiles += 1,
                Terrain::Ready => m.ready_tiles += 1,
                Terrain::Empty | Terrain::Obstacle | Terrain::Base => {}
            }
            if terrain.is_farmable() {
                m.farmable_tiles += 1;
                if terrain == Terrain::Ready || self.visited.contains(&pos) {
                    m.coverage += 1;
                }
            }
        }
        m
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("turn", &self.turn)
            .field("state", &self.state)
            .field("drone", &self.field.drone())
            .field("width", &self.field.width())
            .field("height", &self.field.height())
            .finish()
    }
}
