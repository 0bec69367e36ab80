//! Deflate (zlib wrapper) streaming decoder via flate2's low-level `Decompress`.
//!
//! A finished zlib stream resets the inflater, so concatenated streams decode
//! the same way concatenated zstd frames do.
use flate2::{Decompress, FlushDecompress, Status};

use crate::compression::constants::{codec_names, DEFLATE_IN_SIZE, DEFLATE_OUT_SIZE};
use crate::compression::types::{CompressionError, DecodeProgress, StreamDecoder};

pub struct DeflateStreamDecoder {
    inner: Decompress,
    pending_output: bool,
    in_stream: bool,
}

impl DeflateStreamDecoder {
    pub fn new() -> Self {
        Self { inner: Decompress::new(true), pending_output: false, in_stream: false }
    }
}

impl Default for DeflateStreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecoder for DeflateStreamDecoder {
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<DecodeProgress, CompressionError> {
        let capacity = output.len();
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();

        let status = self
            .inner
            .decompress(input, output, FlushDecompress::None)
            .map_err(|e| CompressionError::Corrupt { codec: codec_names::DEFLATE, msg: e.to_string() })?;

        let progress = DecodeProgress {
            consumed: (self.inner.total_in() - before_in) as usize,
            produced: (self.inner.total_out() - before_out) as usize,
        };

        match status {
            Status::StreamEnd => {
                self.inner.reset(true);
                self.in_stream = false;
                self.pending_output = false;
            }
            Status::Ok | Status::BufError => {
                if progress.consumed > 0 || progress.produced > 0 {
                    self.in_stream = true;
                }
                self.pending_output = capacity > 0 && progress.produced == capacity;
            }
        }
        Ok(progress)
    }

    fn has_pending_output(&self) -> bool {
        self.pending_output
    }

    fn is_frame_complete(&self) -> bool {
        !self.in_stream
    }

    fn recommended_input_size(&self) -> usize {
        DEFLATE_IN_SIZE
    }

    fn recommended_output_size(&self) -> usize {
        DEFLATE_OUT_SIZE
    }

    fn name(&self) -> &'static str {
        codec_names::DEFLATE
    }
}
