//! telemetry/mod.rs
//! Ingestion counters and immutable diagnostic snapshots.
//!
//! Notes:
//! - Counters are owned by one source and mutated only by its ingestion thread.
//! - Snapshots are plain data (serde) for logs and the CLI; nothing in the
//!   lifecycle branches on them.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
