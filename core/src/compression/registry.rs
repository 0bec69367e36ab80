//! compression/registry.rs
//! Codec registry and decoder factory.

use crate::compression::codecs::{DeflateStreamDecoder, ZstdStreamDecoder};
use crate::compression::constants::codec_names;
use crate::compression::types::{CompressionError, CompressionMode, StreamDecoder};

pub struct CodecInfo {
    pub name: &'static str,
    /// Whether reads go through a `DecompressionSession`.
    pub streaming: bool,
}

pub fn resolve(mode: &CompressionMode) -> Result<CodecInfo, CompressionError> {
    match mode {
        CompressionMode::None => Ok(CodecInfo { name: codec_names::NONE, streaming: false }),
        CompressionMode::Zstd => Ok(CodecInfo { name: codec_names::ZSTD, streaming: true }),
        CompressionMode::Deflate => Ok(CodecInfo { name: codec_names::DEFLATE, streaming: true }),
        CompressionMode::Unsupported(name) => Err(CompressionError::UnsupportedCodec { name: name.clone() }),
    }
}

/// Allocate a decoder for a streaming mode.
///
/// `CompressionMode::None` has no decoder; callers check `CodecInfo::streaming` first.
pub fn create_stream_decoder(mode: &CompressionMode) -> Result<Box<dyn StreamDecoder>, CompressionError> {
    match mode {
        CompressionMode::Zstd => Ok(Box::new(ZstdStreamDecoder::new()?)),
        CompressionMode::Deflate => Ok(Box::new(DeflateStreamDecoder::new())),
        CompressionMode::None | CompressionMode::Unsupported(_) =>
            Err(CompressionError::UnsupportedCodec { name: mode.name().to_string() }),
    }
}
