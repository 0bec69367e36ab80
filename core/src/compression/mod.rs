//! compression/mod.rs
//! Streaming decompression engine.
//!
//! Notes:
//! - `StreamDecoder` wraps one codec context and keeps its state across calls.
//! - `DecompressionSession` owns the two staging areas (compressed chunk,
//!   decompressed output) and the cursors that make buffer-sized reads correct
//!   when chunk and buffer boundaries do not line up.
//! - The registry maps a `CompressionMode` to a freshly allocated decoder.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;
pub mod session;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use session::*;
