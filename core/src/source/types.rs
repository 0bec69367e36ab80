//! source/types.rs
//! Source capability trait, lifecycle states and fill results.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::buffer::{BufferProvider, TupleBuffer};
use crate::telemetry::IngestSnapshot;
use crate::types::SourceError;

/// `Unopened -> Open -> Closed`. No transition leaves `Closed`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceState {
    Unopened,
    Open,
    Closed,
}

impl SourceState {
    pub fn name(&self) -> &'static str {
        match self {
            SourceState::Unopened => "unopened",
            SourceState::Open => "open",
            SourceState::Closed => "closed",
        }
    }

    /// Usage error unless the source is in `expected`.
    pub fn ensure(&self, expected: SourceState, op: &str, origin: &str) -> Result<(), SourceError> {
        if *self == expected {
            Ok(())
        } else {
            Err(SourceError::Usage(format!(
                "{op} called on {} source {origin} (requires {})",
                self.name(),
                expected.name()
            )))
        }
    }
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one `fill_tuple_buffer` call. End-of-stream is not an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillResult {
    Bytes(usize),
    Eos,
}

/// Cooperative cancellation flag, checked between compressed chunks and
/// before raw reads. Never interrupts a read or decode already in progress.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Origin-specific ingestion source.
///
/// Not safe for concurrent use: one owning worker calls `open` once,
/// `fill_tuple_buffer` any number of times, then `close` once.
pub trait Source: Send {
    /// Acquire the origin and, for streaming codecs, the decompression session.
    fn open(&mut self, provider: Arc<dyn BufferProvider>) -> Result<(), SourceError>;

    /// Write the next bytes into `buffer`. The buffer is borrowed for this call only.
    fn fill_tuple_buffer(&mut self, buffer: &mut TupleBuffer, stop: &StopToken)
        -> Result<FillResult, SourceError>;

    /// Release the origin and codec context.
    fn close(&mut self) -> Result<(), SourceError>;

    /// Human-readable state for logs. Not for control flow.
    fn describe(&self) -> String;

    fn snapshot(&self) -> IngestSnapshot;

    fn state(&self) -> SourceState;
}
