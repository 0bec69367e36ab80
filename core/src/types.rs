use std::io;

use thiserror::Error;

use crate::{
    compression::CompressionError,
    config::ConfigError,
    registry::RegistryError,
};

/// Error category, mirrored by the `SourceError` variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Resource,
    DataIntegrity,
    Usage,
}

/// Unified ingestion error.
/// - Every variant names the offending parameter, origin or codec in its message.
/// - `From<T>` impls enable `?` across the config, registry and codec layers.
/// - End-of-stream is not an error; see `FillResult::Eos`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Unknown/missing/malformed parameter, unknown codec, unresolvable origin, unknown type.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Codec context allocation or origin acquisition failure not caused by configuration.
    #[error("resource error: {0}")]
    Resource(String),

    /// Corrupt or truncated compressed stream.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// Lifecycle protocol violation or adaptor path collision.
    #[error("usage error: {0}")]
    Usage(String),
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Configuration(_) => ErrorKind::Configuration,
            SourceError::Resource(_) => ErrorKind::Resource,
            SourceError::DataIntegrity(_) => ErrorKind::DataIntegrity,
            SourceError::Usage(_) => ErrorKind::Usage,
        }
    }

    /// Classify an I/O failure raised while acquiring `origin`.
    pub fn from_open_error(origin: &str, e: &io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::InvalidInput => SourceError::Configuration(
                format!("could not determine absolute pathname: {origin} - {e}"),
            ),
            _ => SourceError::Resource(format!("could not open origin {origin}: {e}")),
        }
    }
}

impl From<ConfigError> for SourceError {
    fn from(e: ConfigError) -> Self {
        SourceError::Configuration(e.to_string())
    }
}

impl From<RegistryError> for SourceError {
    fn from(e: RegistryError) -> Self {
        SourceError::Configuration(e.to_string())
    }
}

impl From<CompressionError> for SourceError {
    fn from(e: CompressionError) -> Self {
        match e {
            CompressionError::UnsupportedCodec { .. } => SourceError::Configuration(e.to_string()),
            CompressionError::ContextAllocation { .. } => SourceError::Resource(e.to_string()),
            CompressionError::InvalidStagingSize { .. } => SourceError::Configuration(e.to_string()),
            CompressionError::Corrupt { .. }
            | CompressionError::Truncated { .. }
            | CompressionError::Stalled { .. } => SourceError::DataIntegrity(e.to_string()),
        }
    }
}
