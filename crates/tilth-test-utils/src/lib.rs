//! Test fixtures for Tilth development.
//!
//! Field constructors for the standard scenario layouts and a parser for
//! compact action scripts. Everything here panics on bad input: it is
//! only ever used from tests and benches.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{field_from_ascii, open_field, script};
