//! telemetry/counters.rs
//! Mutable counters collected while a source is open.
use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestCounters {
    /// Bytes written into tuple buffers (the source's `totalBytesRead`).
    pub bytes_delivered: u64,
    /// Raw bytes read from the origin (compressed bytes on a streaming path).
    pub origin_bytes_read: u64,
    /// Bytes produced by the decoder.
    pub decompressed_bytes: u64,
    /// `fill_tuple_buffer` calls that wrote at least one byte.
    pub buffers_filled: u64,
    /// Decompressed staging refills.
    pub refills: u64,
}

impl IngestCounters {
    /// Record one fill call that delivered `bytes` into a tuple buffer.
    pub fn add_fill(&mut self, bytes: usize) {
        if bytes > 0 {
            self.buffers_filled += 1;
            self.bytes_delivered += bytes as u64;
        }
    }

    pub fn add_origin_read(&mut self, bytes: usize) {
        self.origin_bytes_read += bytes as u64;
    }

    /// Record one staging refill that produced `decoded` bytes.
    pub fn add_refill(&mut self, decoded: usize) {
        self.refills += 1;
        self.decompressed_bytes += decoded as u64;
    }
}
