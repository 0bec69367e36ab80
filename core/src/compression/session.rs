//! compression/session.rs
//! Per-source decompression state: staging areas, cursors and codec context.
//!
//! Invariant: `offset <= size <= output_capacity` after every public call.
//!
//! A refill never reads a new compressed chunk while the previous chunk still
//! has unconsumed bytes or the codec still holds decoded output. Chunks whose
//! decoded size exceeds the output staging area are therefore drained across
//! several refills instead of being cut short.

use std::io::Read;

use tracing::{debug, warn};

use crate::compression::constants::MAX_STAGING_SIZE;
use crate::compression::types::{CompressionError, StreamDecoder};
use crate::source::StopToken;
use crate::telemetry::IngestCounters;
use crate::utils::read_up_to;

pub struct DecompressionSession {
    decoder: Box<dyn StreamDecoder>,

    // compressed chunk staging
    input: Vec<u8>,
    input_pos: usize,
    input_len: usize,

    // decompressed output staging
    output: Vec<u8>,
    offset: usize,
    size: usize,

    end_of_stream: bool,
    origin_failed: bool,
    read_error: Option<String>,
    compressed_total: u64,
}

impl DecompressionSession {
    /// Session with the codec's recommended staging sizes.
    pub fn new(decoder: Box<dyn StreamDecoder>) -> Self {
        let input = decoder.recommended_input_size();
        let output = decoder.recommended_output_size();
        Self::build(decoder, input, output)
    }

    /// Session with explicit staging sizes (both in `1..=MAX_STAGING_SIZE`).
    pub fn with_capacities(
        decoder: Box<dyn StreamDecoder>,
        input_capacity: usize,
        output_capacity: usize,
    ) -> Result<Self, CompressionError> {
        let valid = |n: usize| n > 0 && n <= MAX_STAGING_SIZE;
        if !valid(input_capacity) || !valid(output_capacity) {
            return Err(CompressionError::InvalidStagingSize {
                input: input_capacity,
                output: output_capacity,
                max: MAX_STAGING_SIZE,
            });
        }
        Ok(Self::build(decoder, input_capacity, output_capacity))
    }

    fn build(decoder: Box<dyn StreamDecoder>, input_capacity: usize, output_capacity: usize) -> Self {
        Self {
            decoder,
            input: vec![0u8; input_capacity],
            input_pos: 0,
            input_len: 0,
            output: vec![0u8; output_capacity],
            offset: 0,
            size: 0,
            end_of_stream: false,
            origin_failed: false,
            read_error: None,
            compressed_total: 0,
        }
    }

    pub fn codec(&self) -> &'static str {
        self.decoder.name()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn input_capacity(&self) -> usize {
        self.input.len()
    }

    pub fn output_capacity(&self) -> usize {
        self.output.len()
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.end_of_stream
    }

    /// Read failure that ended the stream early, if any.
    pub fn read_error(&self) -> Option<&str> {
        self.read_error.as_deref()
    }

    pub fn invariant_holds(&self) -> bool {
        self.offset <= self.size && self.size <= self.output.len()
    }

    /// Fill `dst` from staged output, refilling from `origin` as needed.
    ///
    /// Returns the number of bytes written; fewer than `dst.len()` means the
    /// compressed stream is exhausted or a stop was requested between chunks.
    /// A stop ends the stream: later calls only drain what is already staged.
    pub fn fill<R: Read + ?Sized>(
        &mut self,
        origin: &mut R,
        dst: &mut [u8],
        stop: &StopToken,
        counters: &mut IngestCounters,
    ) -> Result<usize, CompressionError> {
        let mut written = 0;
        while written < dst.len() {
            if self.offset < self.size {
                written += self.drain_into(&mut dst[written..]);
                continue;
            }
            if stop.is_stop_requested() {
                debug!(codec = self.codec(), written, "stop requested between chunks");
                self.end_of_stream = true;
                break;
            }
            if !self.refill(origin, counters)? {
                break;
            }
        }
        debug_assert!(self.invariant_holds());
        Ok(written)
    }

    /// Copy staged output into `dst`, advancing `offset`.
    pub fn drain_into(&mut self, dst: &mut [u8]) -> usize {
        let n = (self.size - self.offset).min(dst.len());
        dst[..n].copy_from_slice(&self.output[self.offset..self.offset + n]);
        self.offset += n;
        n
    }

    /// Stage the next block of decoded output. Only valid once the staging
    /// area is drained. Returns `false` at end of the compressed stream.
    fn refill<R: Read + ?Sized>(
        &mut self,
        origin: &mut R,
        counters: &mut IngestCounters,
    ) -> Result<bool, CompressionError> {
        debug_assert_eq!(self.offset, self.size);
        self.offset = 0;
        self.size = 0;

        loop {
            if self.end_of_stream {
                return Ok(false);
            }

            let input_drained = self.input_pos == self.input_len;
            if input_drained && !self.decoder.has_pending_output() {
                if self.size > 0 {
                    break;
                }
                if !self.read_chunk(origin, counters)? {
                    return Ok(false);
                }
            }

            let progress = self
                .decoder
                .decode(&self.input[self.input_pos..self.input_len], &mut self.output[self.size..])?;
            self.input_pos += progress.consumed;
            self.size += progress.produced;

            if self.size == self.output.len() {
                break;
            }
            if progress.consumed == 0 && progress.produced == 0 && self.input_pos < self.input_len {
                return Err(CompressionError::Stalled { codec: self.decoder.name() });
            }
        }

        counters.add_refill(self.size);
        debug!(codec = self.codec(), staged = self.size, "refilled decompressed staging area");
        Ok(true)
    }

    /// Read the next compressed chunk. Returns `false` at end of origin.
    fn read_chunk<R: Read + ?Sized>(
        &mut self,
        origin: &mut R,
        counters: &mut IngestCounters,
    ) -> Result<bool, CompressionError> {
        let n = if self.origin_failed {
            0
        } else {
            let (n, err) = read_up_to(origin, &mut self.input);
            if let Some(e) = err {
                warn!(codec = self.codec(), error = %e, "origin read failed, treating as end of stream");
                self.read_error = Some(e.to_string());
                self.origin_failed = true;
            }
            n
        };

        if n == 0 {
            self.end_of_stream = true;
            if !self.origin_failed && !self.decoder.is_frame_complete() {
                return Err(CompressionError::Truncated {
                    codec: self.decoder.name(),
                    consumed: self.compressed_total,
                });
            }
            return Ok(false);
        }

        self.input_pos = 0;
        self.input_len = n;
        self.compressed_total += n as u64;
        counters.add_origin_read(n);
        Ok(true)
    }
}
