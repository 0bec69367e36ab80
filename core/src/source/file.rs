//! source/file.rs
//! File-backed source: raw reads, or streaming decompression when the
//! descriptor names a codec.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::buffer::{BufferProvider, TupleBuffer};
use crate::compression::{self, CompressionMode, DecompressionSession};
use crate::config::{validate_and_format, ParameterRule, ParameterSpec, SourceDescriptor, ValidatedConfig};
use crate::constants::{codec_names, params, source_types, DEFAULT_COMPRESSION};
use crate::source::types::{FillResult, Source, SourceState, StopToken};
use crate::telemetry::{IngestCounters, IngestSnapshot};
use crate::types::SourceError;
use crate::utils::{read_up_to, resolve_origin_path};

pub const FILE_SOURCE_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::required(params::FILE_PATH, ParameterRule::NonEmpty),
    ParameterSpec::optional(params::COMPRESSION, DEFAULT_COMPRESSION, ParameterRule::OneOf(codec_names::ALL)),
];

pub struct FileSource {
    file_path: String,
    compression: CompressionMode,
    staging: Option<(usize, usize)>,

    state: SourceState,
    origin: Option<File>,
    session: Option<DecompressionSession>,

    exhausted: bool,
    read_error: Option<String>,
    failure: Option<String>,
    counters: IngestCounters,
}

impl FileSource {
    pub fn new(descriptor: &SourceDescriptor) -> Result<Self, SourceError> {
        let file_path = descriptor.get_from_config(params::FILE_PATH)?;
        let compression = CompressionMode::from_name(descriptor.try_get(params::COMPRESSION));
        Ok(Self::from_parts(file_path, compression))
    }

    pub fn from_parts(file_path: impl Into<String>, compression: CompressionMode) -> Self {
        Self {
            file_path: file_path.into(),
            compression,
            staging: None,
            state: SourceState::Unopened,
            origin: None,
            session: None,
            exhausted: false,
            read_error: None,
            failure: None,
            counters: IngestCounters::default(),
        }
    }

    /// Override the codec-recommended staging sizes (input chunk, decoded output).
    pub fn with_staging_capacities(mut self, input: usize, output: usize) -> Self {
        self.staging = Some((input, output));
        self
    }

    pub fn validate_and_format<I>(config: I) -> Result<ValidatedConfig, SourceError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(validate_and_format(config, FILE_SOURCE_PARAMETERS, source_types::FILE)?)
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn compression(&self) -> &CompressionMode {
        &self.compression
    }

    /// Active decompression session, present only while open on a streaming codec.
    pub fn session(&self) -> Option<&DecompressionSession> {
        self.session.as_ref()
    }

    pub fn total_bytes_read(&self) -> u64 {
        self.counters.bytes_delivered
    }

    pub fn last_read_error(&self) -> Option<&str> {
        self.read_error
            .as_deref()
            .or_else(|| self.session.as_ref().and_then(|s| s.read_error()))
    }

    fn open_session(&self) -> Result<DecompressionSession, SourceError> {
        let decoder = compression::create_stream_decoder(&self.compression)?;
        let session = match self.staging {
            Some((input, output)) => DecompressionSession::with_capacities(decoder, input, output)?,
            None => DecompressionSession::new(decoder),
        };
        Ok(session)
    }
}

impl Source for FileSource {
    fn open(&mut self, provider: Arc<dyn BufferProvider>) -> Result<(), SourceError> {
        self.state.ensure(SourceState::Unopened, "open", &self.file_path)?;

        // Unknown codec names fail before any resource is acquired.
        let codec = compression::resolve(&self.compression)?;

        let real_path = resolve_origin_path(&self.file_path)
            .map_err(|e| SourceError::from_open_error(&self.file_path, &e))?;
        let file = File::open(&real_path)
            .map_err(|e| SourceError::from_open_error(&self.file_path, &e))?;

        // `file` drops (and closes) if the session cannot be created.
        let session = if codec.streaming { Some(self.open_session()?) } else { None };

        if let Some(s) = &session {
            debug!(codec = s.codec(), input = s.input_capacity(), output = s.output_capacity(),
                "allocated decompression session");
        }
        self.origin = Some(file);
        self.session = session;
        self.state = SourceState::Open;
        info!(path = %real_path.display(), compression = codec.name,
            buffer_size = provider.buffer_size(), "file source opened");
        Ok(())
    }

    fn fill_tuple_buffer(&mut self, buffer: &mut TupleBuffer, stop: &StopToken)
        -> Result<FillResult, SourceError>
    {
        self.state.ensure(SourceState::Open, "fill_tuple_buffer", &self.file_path)?;
        if let Some(msg) = &self.failure {
            return Err(SourceError::DataIntegrity(msg.clone()));
        }
        let Some(origin) = self.origin.as_mut() else {
            return Err(SourceError::Usage(format!("origin {} is not open", self.file_path)));
        };

        buffer.clear();
        let written = match self.session.as_mut() {
            Some(session) => {
                match session.fill(origin, buffer.available_memory_mut(), stop, &mut self.counters) {
                    Ok(n) => n,
                    Err(e) => {
                        let err = SourceError::from(e);
                        error!(path = %self.file_path, error = %err, "decompression failed");
                        self.failure = Some(format!("{} ({})", err, self.file_path));
                        return Err(err);
                    }
                }
            }
            None if self.exhausted => 0,
            None if stop.is_stop_requested() => {
                debug!(path = %self.file_path, "stop requested before read");
                self.exhausted = true;
                0
            }
            None => {
                let (n, err) = read_up_to(origin, buffer.available_memory_mut());
                self.counters.add_origin_read(n);
                if let Some(e) = err {
                    warn!(path = %self.file_path, error = %e, "read failed, treating as end of stream");
                    self.read_error = Some(e.to_string());
                    self.exhausted = true;
                }
                if n == 0 {
                    self.exhausted = true;
                }
                n
            }
        };

        buffer.set_used_bytes(written);
        self.counters.add_fill(written);
        if written == 0 {
            debug!(path = %self.file_path, total = self.counters.bytes_delivered, "end of stream");
            return Ok(FillResult::Eos);
        }
        Ok(FillResult::Bytes(written))
    }

    fn close(&mut self) -> Result<(), SourceError> {
        match self.state {
            SourceState::Unopened => {
                self.state.ensure(SourceState::Open, "close", &self.file_path)
            }
            SourceState::Closed => {
                debug!(path = %self.file_path, "close on an already closed source");
                Ok(())
            }
            SourceState::Open => {
                self.origin = None;
                self.session = None;
                self.state = SourceState::Closed;
                info!(path = %self.file_path, total = self.counters.bytes_delivered, "file source closed");
                Ok(())
            }
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }

    fn snapshot(&self) -> IngestSnapshot {
        IngestSnapshot::from_counters(
            source_types::FILE,
            &self.file_path,
            self.compression.name(),
            self.state.name(),
            &self.counters,
            self.last_read_error(),
        )
    }

    fn state(&self) -> SourceState {
        self.state
    }
}

impl fmt::Display for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FileSource(filepath: {}, compression: {}, state: {}, totalNumBytesRead: {})",
            self.file_path, self.compression, self.state, self.counters.bytes_delivered
        )
    }
}

/// Registry constructor for `File`.
pub fn create_file_source(descriptor: SourceDescriptor) -> Result<Box<dyn Source>, SourceError> {
    Ok(Box::new(FileSource::new(&descriptor)?))
}

/// Registry validator for `File`.
pub fn validate_file_source(config: BTreeMap<String, String>) -> Result<ValidatedConfig, SourceError> {
    FileSource::validate_and_format(config)
}
