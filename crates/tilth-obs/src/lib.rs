//! Bounded-visibility observations for Tilth agents.
//!
//! An [`Observation`] is the only view of the world an agent ever gets:
//! the drone's own tile plus its in-bounds cardinal neighbours, with
//! terrain only (growth timers stay hidden). [`build_observation`] is a
//! pure projection from a [`Field`](tilth_space::Field); calling it twice
//! without an intervening step yields identical values, which
//! [`Observation::digest`] makes cheap to check.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod digest;
pub mod observation;

pub use builder::build_observation;
pub use observation::{Inventory, Observation, SeedSupply, TileView};
