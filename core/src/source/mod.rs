//! source — origin-specific sources behind one lifecycle.
//!
//! `open` once, `fill_tuple_buffer` per pool buffer, `close` once. File-backed
//! and URL-backed variants share the same fill path, including streaming
//! decompression.

pub mod types;
pub mod file;
pub mod download;
pub mod url;

pub use types::*;
pub use file::{create_file_source, validate_file_source, FileSource, FILE_SOURCE_PARAMETERS};
pub use download::{DownloadError, DownloadResult, Downloader, LocalCopyDownloader};
pub use url::{create_url_source, validate_url_source, UrlSource, URL_SOURCE_PARAMETERS};
