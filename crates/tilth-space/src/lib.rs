//! Grid field and obstacle layouts for Tilth simulations.
//!
//! The [`Field`] owns every tile, the fixed obstacle/base layout and the
//! single drone position. It enforces position validity and implements
//! the movement and planting rules. [`Layout`] describes how the obstacle
//! layout is produced at construction time; once a field exists its
//! layout never changes.
//!
//! # Coordinates
//!
//! Tiles are stored row-major: index `y * width + x`. Neighbour lists are
//! always produced in the fixed RIGHT, DOWN, LEFT, UP order so that any
//! search over them is deterministic.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub(crate) mod grid;
pub mod layout;

pub use error::FieldError;
pub use field::{Field, GrowthReport, MoveOutcome};
pub use layout::{Layout, ResolvedLayout};
