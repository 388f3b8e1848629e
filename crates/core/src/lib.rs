//! Domain types and rules shared by the API, the database layer, and the
//! collector pipeline.
//!
//! Nothing in here performs I/O.

pub mod categories;
pub mod error;
pub mod geo;
pub mod types;
pub mod validation;
