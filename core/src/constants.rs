//! constants.rs
//! Registered type names, descriptor parameter keys and defaults.

/// Source type names used as registry keys.
pub mod source_types {
    pub const FILE: &str = "File";
    pub const URL: &str = "Url";
}

/// Descriptor parameter keys.
pub mod params {
    /// Local path of the origin file. Also the key the test-data adaptors populate.
    pub const FILE_PATH: &str = "file_path";
    /// Streaming codec name: `none`, `zstd` or `deflate`.
    pub const COMPRESSION: &str = "compression";
    /// Remote origin for the URL-backed source.
    pub const URL: &str = "url";
    /// Local path the URL-backed source downloads into before reading.
    pub const DOWNLOAD_PATH: &str = "download_path";
    /// Connection/read timeout for the downloader, in seconds.
    pub const TIMEOUT_SECONDS: &str = "timeout_seconds";
}

pub use crate::compression::constants::codec_names;

pub const DEFAULT_COMPRESSION: &str = codec_names::NONE;
pub const DEFAULT_TIMEOUT_SECONDS: &str = "60";
pub const DEFAULT_REACHABILITY_TIMEOUT_SECONDS: u64 = 5;

/// URL schemes the URL-backed source accepts at validation time.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "file"];

/// Default tuple buffer size used by the CLI and benches.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;
pub const DEFAULT_POOL_BUFFERS: usize = 8;
