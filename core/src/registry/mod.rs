//! registry/mod.rs
//! Name-keyed, append-only registries for sources, validators and test-data
//! adaptors.
//!
//! Notes:
//! - No process-wide singleton: the bootstrap builds one `Registries` value from
//!   an explicit list of `(name, fn)` pairs and passes it by reference.
//! - Entries are plain function pointers; after `build()` the tables are never
//!   mutated, so lookups are safe from any thread.
//! - Every lookup dispatches to a constructor; instances are never cached.

pub mod types;
pub mod registries;
pub mod builtin;

pub use types::*;
pub use registries::*;

