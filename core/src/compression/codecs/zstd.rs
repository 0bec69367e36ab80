//! src/compression/codecs/zstd.rs
//!
//! Zstd streaming decoder.
//!
//! Design notes:
//! - Wraps a `zstd_safe::DCtx`; the context is freed when the decoder drops,
//!   so every exit path out of `open`/`close` releases it.
//! - Staging sizes follow `ZSTD_DStreamInSize` / `ZSTD_DStreamOutSize`.
//! - Concatenated frames decode back to back without a reset.

use zstd_safe::{get_error_name, DCtx, InBuffer, OutBuffer};

use crate::compression::constants::codec_names;
use crate::compression::types::{CompressionError, DecodeProgress, StreamDecoder};

pub struct ZstdStreamDecoder {
    ctx: DCtx<'static>,
    pending_output: bool,
    in_frame: bool,
}

impl ZstdStreamDecoder {
    /// # Errors
    /// - `CompressionError::ContextAllocation` if the context cannot be created.
    pub fn new() -> Result<Self, CompressionError> {
        let ctx = DCtx::try_create()
            .ok_or(CompressionError::ContextAllocation { codec: codec_names::ZSTD })?;
        Ok(Self { ctx, pending_output: false, in_frame: false })
    }
}

impl StreamDecoder for ZstdStreamDecoder {
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<DecodeProgress, CompressionError> {
        let capacity = output.len();
        let mut in_buf = InBuffer::around(input);
        let mut out_buf = OutBuffer::around(output);

        let hint = self
            .ctx
            .decompress_stream(&mut out_buf, &mut in_buf)
            .map_err(|code| CompressionError::Corrupt {
                codec: codec_names::ZSTD,
                msg: get_error_name(code).to_string(),
            })?;

        let progress = DecodeProgress { consumed: in_buf.pos(), produced: out_buf.pos() };
        self.pending_output = capacity > 0 && progress.produced == capacity;
        // 0 means the current frame is fully decoded and flushed.
        self.in_frame = hint != 0 && (self.in_frame || progress.consumed > 0);
        Ok(progress)
    }

    fn has_pending_output(&self) -> bool {
        self.pending_output
    }

    fn is_frame_complete(&self) -> bool {
        !self.in_frame
    }

    fn recommended_input_size(&self) -> usize {
        DCtx::in_size()
    }

    fn recommended_output_size(&self) -> usize {
        DCtx::out_size()
    }

    fn name(&self) -> &'static str {
        codec_names::ZSTD
    }
}
