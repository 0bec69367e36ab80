//! ingest-core
//!
//! Pure Rust file and URL ingestion sources with streaming decompression.
//! No network stack, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod buffer;

// Configuration and codecs
pub mod config;
pub mod compression;
pub mod telemetry;

// Sources and their registries
pub mod source;
pub mod registry;
pub mod systest;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::buffer::{BufferProvider, FixedBufferPool, TupleBuffer};
    pub use crate::compression::{CompressionError, CompressionMode, DecompressionSession};
    pub use crate::config::{load_source_config, SourceConfig, SourceDescriptor, ValidatedConfig};
    pub use crate::registry::{Registries, RegistriesBuilder, RegistryError};
    pub use crate::source::{FileSource, FillResult, Source, SourceState, StopToken, UrlSource};
    pub use crate::systest::{FileDataArguments, InlineDataArguments};
    pub use crate::telemetry::{IngestCounters, IngestSnapshot};
    pub use crate::types::{ErrorKind, SourceError};
}
