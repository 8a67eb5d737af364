//! Tilth: a turn-based grid-world simulator where a drone plants and
//! tends crops under partial observability.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tilth sub-crates, plus a small episode [`driver`] and a text
//! [`render`]er used by the `tilth-run` launcher.
//!
//! # Quick start
//!
//! ```rust
//! use tilth::prelude::*;
//!
//! let config = EnvironmentConfig::planting(8, 6).with_max_turns(Some(60));
//! let mut env = Environment::new(config).unwrap();
//! let mut agent = ReachabilityAgent::new();
//!
//! let report = run_episode(&mut env, &mut agent, None, |_, _| {}).unwrap();
//! assert_eq!(report.actions.len(), 60);
//! assert!(report.summary.terminated);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tilth-core` | Positions, actions, terrain, turn counter |
//! | [`space`] | `tilth-space` | The field and obstacle layouts |
//! | [`obs`] | `tilth-obs` | Bounded observations |
//! | [`engine`] | `tilth-engine` | Environment, config, metrics |
//! | [`agents`] | `tilth-agents` | Agent trait, reference agents, registry |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod driver;
pub mod render;

/// Core value types (`tilth-core`).
pub use tilth_core as types;

/// The grid field and layouts (`tilth-space`).
///
/// [`space::Field`] owns the tiles and drone; [`space::Layout`] decides
/// where obstacles go.
pub use tilth_space as space;

/// Observations (`tilth-obs`).
pub use tilth_obs as obs;

/// The turn engine (`tilth-engine`).
pub use tilth_engine as engine;

/// Agents and the agent registry (`tilth-agents`).
pub use tilth_agents as agents;

/// Common imports for typical Tilth usage.
///
/// ```rust
/// use tilth::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tilth_core::{Action, Direction, GrowthThresholds, Position, Terrain, TurnId};

    // Field
    pub use tilth_space::{Field, Layout};

    // Observation
    pub use tilth_obs::Observation;

    // Engine
    pub use tilth_engine::{
        ConfigError, CoverageMetrics, Environment, EnvironmentConfig, StepError, StepResult,
        Summary,
    };

    // Agents
    pub use tilth_agents::{Agent, AgentRegistry, RandomAgent, ReachabilityAgent};

    // Driver
    pub use crate::driver::{run_episode, EpisodeError, EpisodeReport};
}
