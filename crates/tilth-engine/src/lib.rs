//! Turn engine for Tilth grid-world simulations.
//!
//! [`Environment`] owns the [`Field`](tilth_space::Field) and the turn
//! counter exclusively. Each [`step`](Environment::step) applies one
//! action, advances crop growth, bumps the clock and recomputes
//! [`CoverageMetrics`]. Agents never see the field: they get an
//! [`Observation`](tilth_obs::Observation) value per turn.
//!
//! The engine knows nothing about rendering or frame rates; presentation
//! layers poll [`Environment::field`] after each step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod environment;
pub mod metrics;

pub use config::{ConfigError, EnvironmentConfig};
pub use environment::{EngineState, Environment, StepError, StepResult};
pub use metrics::{CoverageMetrics, Summary};
