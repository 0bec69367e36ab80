//! telemetry/snapshot.rs
//! Immutable per-source diagnostic snapshot.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::IngestCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSnapshot {
    pub source_type: String,
    pub origin: String,
    pub compression: String,
    pub state: String,
    pub bytes_delivered: u64,
    pub origin_bytes_read: u64,
    pub decompressed_bytes: u64,
    pub buffers_filled: u64,
    pub refills: u64,
    /// decompressed / compressed; 0.0 on the uncompressed path or before any read.
    pub expansion_ratio: f64,
    pub last_read_error: Option<String>,
}

impl IngestSnapshot {
    pub fn from_counters(
        source_type: &str,
        origin: &str,
        compression: &str,
        state: &str,
        counters: &IngestCounters,
        last_read_error: Option<&str>,
    ) -> Self {
        let expansion_ratio = if counters.decompressed_bytes > 0 && counters.origin_bytes_read > 0 {
            counters.decompressed_bytes as f64 / counters.origin_bytes_read as f64
        } else {
            0.0
        };

        Self {
            source_type: source_type.to_string(),
            origin: origin.to_string(),
            compression: compression.to_string(),
            state: state.to_string(),
            bytes_delivered: counters.bytes_delivered,
            origin_bytes_read: counters.origin_bytes_read,
            decompressed_bytes: counters.decompressed_bytes,
            buffers_filled: counters.buffers_filled,
            refills: counters.refills,
            expansion_ratio,
            last_read_error: last_read_error.map(str::to_string),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}
