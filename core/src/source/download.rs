//! source/download.rs
//! Downloader interface for URL-backed origins.
//!
//! Network transport lives outside the core. Anything that can place the
//! bytes of a URL into a local file and report success or failure can back a
//! `UrlSource`. `LocalCopyDownloader` covers `file://` URLs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::config::split_url_scheme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub local_path: PathBuf,
    pub bytes_downloaded: u64,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    InvalidUrl { url: String },
    UnsupportedScheme { url: String, scheme: String },
    /// Non-success HTTP status from a transport-backed downloader.
    Status { url: String, status: u16 },
    Transport { url: String, msg: String },
    Io { path: String, msg: String },
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DownloadError::*;
        match self {
            InvalidUrl { url } => write!(f, "invalid URL: {}", url),
            UnsupportedScheme { url, scheme } => write!(f, "unsupported URL scheme {} in {}", scheme, url),
            Status { url, status } => write!(f, "HTTP error {} while downloading from URL: {}", status, url),
            Transport { url, msg } => write!(f, "failed to download from URL: {} (error: {})", url, msg),
            Io { path, msg } => write!(f, "failed to write {}: {}", path, msg),
        }
    }
}

impl std::error::Error for DownloadError {}

pub trait Downloader: Send + Sync {
    /// Fetch `url` into `target`, creating parent directories as needed.
    fn download_to_file(&self, url: &str, target: &Path, timeout: Duration)
        -> Result<DownloadResult, DownloadError>;

    fn is_reachable(&self, url: &str, timeout: Duration) -> bool;

    /// Whether this downloader has a transport for `url`'s scheme.
    fn serves(&self, _url: &str) -> bool {
        true
    }
}

/// Serves `file://` URLs by copying the referenced file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCopyDownloader;

impl LocalCopyDownloader {
    fn local_path(url: &str) -> Result<PathBuf, DownloadError> {
        let (scheme, rest) = split_url_scheme(url)
            .ok_or_else(|| DownloadError::InvalidUrl { url: url.to_string() })?;
        if !scheme.eq_ignore_ascii_case("file") {
            return Err(DownloadError::UnsupportedScheme { url: url.to_string(), scheme: scheme.to_string() });
        }
        // file://localhost/p and file:///p both name /p
        let path = rest.strip_prefix("localhost").unwrap_or(rest);
        Ok(PathBuf::from(path))
    }
}

impl Downloader for LocalCopyDownloader {
    fn download_to_file(&self, url: &str, target: &Path, _timeout: Duration)
        -> Result<DownloadResult, DownloadError>
    {
        let src = Self::local_path(url)?;
        let io_err = |path: &Path, e: std::io::Error| DownloadError::Io {
            path: path.display().to_string(),
            msg: e.to_string(),
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let bytes = fs::copy(&src, target).map_err(|e| DownloadError::Transport {
            url: url.to_string(),
            msg: e.to_string(),
        })?;
        debug!(url, target = %target.display(), bytes, "copied local origin");

        Ok(DownloadResult { local_path: target.to_path_buf(), bytes_downloaded: bytes, content_type: None })
    }

    fn is_reachable(&self, url: &str, _timeout: Duration) -> bool {
        Self::local_path(url).map(|p| p.is_file()).unwrap_or(false)
    }

    fn serves(&self, url: &str) -> bool {
        Self::local_path(url).is_ok()
    }
}
