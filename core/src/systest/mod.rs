//! systest/mod.rs
//! Test-data adaptors: turn inline rows or an existing data file into a
//! source configuration for end-to-end tests.

pub mod adaptors;

pub use adaptors::*;
