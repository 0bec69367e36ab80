//! compression/types.rs
//! Compression mode, codec errors and the streaming decoder trait.
use std::fmt;

use crate::compression::constants::codec_names;

/// Codec selected by the descriptor's `compression` parameter.
/// Derived once at source construction and fixed for the source's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompressionMode {
    None,
    Zstd,
    Deflate,
    /// Unrecognized non-empty name, kept so `open` can report it.
    Unsupported(String),
}

impl CompressionMode {
    /// Absent, empty and `none` all mean uncompressed. Matching ignores case.
    pub fn from_name(name: Option<&str>) -> Self {
        let name = name.map(str::trim).unwrap_or("");
        match name.to_ascii_lowercase().as_str() {
            "" | codec_names::NONE => CompressionMode::None,
            codec_names::ZSTD => CompressionMode::Zstd,
            codec_names::DEFLATE => CompressionMode::Deflate,
            _ => CompressionMode::Unsupported(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CompressionMode::None => codec_names::NONE,
            CompressionMode::Zstd => codec_names::ZSTD,
            CompressionMode::Deflate => codec_names::DEFLATE,
            CompressionMode::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    UnsupportedCodec { name: String },
    ContextAllocation { codec: &'static str },
    InvalidStagingSize { input: usize, output: usize, max: usize },
    /// Codec rejected the stream. `msg` is the codec's own diagnostic.
    Corrupt { codec: &'static str, msg: String },
    /// Origin ended inside a frame.
    Truncated { codec: &'static str, consumed: u64 },
    /// Codec consumed nothing and produced nothing on non-empty input.
    Stalled { codec: &'static str },
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionError::*;
        match self {
            UnsupportedCodec { name } =>
                write!(f, "unsupported compression type: {}", name),
            ContextAllocation { codec } =>
                write!(f, "failed to create {} decompression context", codec),
            InvalidStagingSize { input, output, max } =>
                write!(f, "invalid staging sizes: input {} / output {} (must be 1..={})", input, output, max),
            Corrupt { codec, msg } =>
                write!(f, "{} decompression error: {}", codec, msg),
            Truncated { codec, consumed } =>
                write!(f, "{} stream truncated after {} compressed bytes", codec, consumed),
            Stalled { codec } =>
                write!(f, "{} decoder made no progress on pending input", codec),
        }
    }
}

impl std::error::Error for CompressionError {}

/// Outcome of one `StreamDecoder::decode` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeProgress {
    /// Bytes consumed from the input slice.
    pub consumed: usize,
    /// Bytes written to the output slice.
    pub produced: usize,
}

/// Stateful streaming decoder. Holds the codec context across calls, so a
/// frame may span any number of input chunks.
pub trait StreamDecoder: Send {
    /// Decode as much of `input` into `output` as fits.
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<DecodeProgress, CompressionError>;

    /// The last call filled `output`; the codec may still hold decoded bytes.
    fn has_pending_output(&self) -> bool;

    /// No frame is partially decoded.
    fn is_frame_complete(&self) -> bool;

    fn recommended_input_size(&self) -> usize;
    fn recommended_output_size(&self) -> usize;
    fn name(&self) -> &'static str;
}
