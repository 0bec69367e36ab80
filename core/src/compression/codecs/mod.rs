//! compression/codecs/mod.rs
//! Streaming decoders, one per supported codec.

pub mod deflate;
pub mod zstd;

pub use deflate::*;
pub use zstd::*;
