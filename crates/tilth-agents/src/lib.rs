//! Agent contract, reference agents and agent registry for Tilth.
//!
//! An [`Agent`] turns one [`Observation`](tilth_obs::Observation) into one
//! [`Action`](tilth_core::Action). It may keep private memory between
//! calls but never touches the field: the engine is the only mutator.
//!
//! # Built-in agents
//!
//! | Name | Type | Policy |
//! |------|------|--------|
//! | `wait` | [`WaitAgent`] | Always waits |
//! | `random` | [`RandomAgent`] | Uniform over the four moves, seeded |
//! | `reachability` | [`ReachabilityAgent`] | BFS to the nearest known unvisited plot |
//!
//! [`QueuedAgent`] and [`ScriptedAgent`] feed externally chosen actions
//! (key presses, fixed scripts) through the same interface.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod queued;
pub mod random;
pub mod reachability;
pub mod registry;
pub mod scripted;

pub use agent::{Agent, WaitAgent};
pub use queued::QueuedAgent;
pub use random::RandomAgent;
pub use reachability::ReachabilityAgent;
pub use registry::{AgentFactory, AgentRegistry, RegistryError};
pub use scripted::ScriptedAgent;
