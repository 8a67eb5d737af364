//! Core types for the Tilth grid-world simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types shared by every other Tilth crate: positions and
//! directions, the turn counter, agent actions (typed and raw wire form),
//! the terrain state machine, and the action error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod geometry;
pub mod id;
pub mod terrain;

pub use action::{Action, RawAction};
pub use error::ActionError;
pub use geometry::{Direction, Position};
pub use id::TurnId;
pub use terrain::{advance_growth, GrowthThresholds, Terrain, Tile};
