//! source/url.rs
//! URL-backed source: download into a local file on `open`, then read it
//! through the file-backed machinery (same decompression path).

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::buffer::{BufferProvider, TupleBuffer};
use crate::compression::{self, CompressionMode};
use crate::config::{validate_and_format, ParameterRule, ParameterSpec, SourceDescriptor, ValidatedConfig};
use crate::constants::{
    codec_names, params, source_types, ALLOWED_URL_SCHEMES, DEFAULT_COMPRESSION,
    DEFAULT_REACHABILITY_TIMEOUT_SECONDS, DEFAULT_TIMEOUT_SECONDS,
};
use crate::source::download::{DownloadResult, Downloader, LocalCopyDownloader};
use crate::source::file::FileSource;
use crate::source::types::{FillResult, Source, SourceState, StopToken};
use crate::telemetry::IngestSnapshot;
use crate::types::SourceError;

pub const URL_SOURCE_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::required(params::URL, ParameterRule::Url(ALLOWED_URL_SCHEMES)),
    ParameterSpec::required(params::DOWNLOAD_PATH, ParameterRule::NonEmpty),
    ParameterSpec::optional(params::COMPRESSION, DEFAULT_COMPRESSION, ParameterRule::OneOf(codec_names::ALL)),
    ParameterSpec::optional(params::TIMEOUT_SECONDS, DEFAULT_TIMEOUT_SECONDS, ParameterRule::PositiveInteger),
];

pub struct UrlSource {
    url: String,
    download_path: PathBuf,
    timeout: Duration,
    downloader: Arc<dyn Downloader>,
    download: Option<DownloadResult>,
    inner: FileSource,
}

impl UrlSource {
    /// Uses `LocalCopyDownloader`; see `with_downloader` for other transports.
    pub fn new(descriptor: &SourceDescriptor) -> Result<Self, SourceError> {
        Self::with_downloader(descriptor, Arc::new(LocalCopyDownloader))
    }

    pub fn with_downloader(
        descriptor: &SourceDescriptor,
        downloader: Arc<dyn Downloader>,
    ) -> Result<Self, SourceError> {
        let url = descriptor.get_from_config(params::URL)?.to_string();
        let download_path = PathBuf::from(descriptor.get_from_config(params::DOWNLOAD_PATH)?);
        let timeout_raw = descriptor.try_get(params::TIMEOUT_SECONDS).unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        let timeout_secs: u64 = timeout_raw.trim().parse().map_err(|_| {
            SourceError::Configuration(format!("invalid {}: {}", params::TIMEOUT_SECONDS, timeout_raw))
        })?;
        let compression = CompressionMode::from_name(descriptor.try_get(params::COMPRESSION));
        let inner = FileSource::from_parts(download_path.to_string_lossy(), compression);

        Ok(Self {
            url,
            download_path,
            timeout: Duration::from_secs(timeout_secs),
            downloader,
            download: None,
            inner,
        })
    }

    pub fn validate_and_format<I>(config: I) -> Result<ValidatedConfig, SourceError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(validate_and_format(config, URL_SOURCE_PARAMETERS, source_types::URL)?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reachability of the origin, or `None` when the installed downloader has
    /// no transport for the URL's scheme. Does not change lifecycle state.
    pub fn is_reachable(&self) -> Option<bool> {
        if !self.downloader.serves(&self.url) {
            return None;
        }
        Some(self.downloader.is_reachable(&self.url, Duration::from_secs(DEFAULT_REACHABILITY_TIMEOUT_SECONDS)))
    }

    pub fn download(&self) -> Option<&DownloadResult> {
        self.download.as_ref()
    }

    pub fn file_source(&self) -> &FileSource {
        &self.inner
    }
}

impl Source for UrlSource {
    fn open(&mut self, provider: Arc<dyn BufferProvider>) -> Result<(), SourceError> {
        self.inner.state().ensure(SourceState::Unopened, "open", &self.url)?;
        compression::resolve(self.inner.compression())?;

        let result = self
            .downloader
            .download_to_file(&self.url, &self.download_path, self.timeout)
            .map_err(|e| {
                error!(url = %self.url, error = %e, "download failed");
                SourceError::Resource(format!("could not download {}: {}", self.url, e))
            })?;
        info!(url = %self.url, bytes = result.bytes_downloaded, path = %result.local_path.display(),
            "origin downloaded");
        self.download = Some(result);

        if let Err(e) = self.inner.open(provider) {
            // the downloaded copy is only kept for an open source
            if let Err(rm) = fs::remove_file(&self.download_path) {
                warn!(path = %self.download_path.display(), error = %rm, "could not remove downloaded file");
            }
            self.download = None;
            return Err(e);
        }
        Ok(())
    }

    fn fill_tuple_buffer(&mut self, buffer: &mut TupleBuffer, stop: &StopToken)
        -> Result<FillResult, SourceError>
    {
        self.inner.fill_tuple_buffer(buffer, stop)
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.inner.close()
    }

    fn describe(&self) -> String {
        self.to_string()
    }

    fn snapshot(&self) -> IngestSnapshot {
        let mut snapshot = self.inner.snapshot();
        snapshot.source_type = source_types::URL.to_string();
        snapshot.origin = self.url.clone();
        snapshot
    }

    fn state(&self) -> SourceState {
        self.inner.state()
    }
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UrlSource(url: {}, download_path: {}, downloaded: {}, {})",
            self.url,
            self.download_path.display(),
            self.download.as_ref().map(|d| d.bytes_downloaded).unwrap_or(0),
            self.inner
        )
    }
}

/// Registry constructor for `Url`.
pub fn create_url_source(descriptor: SourceDescriptor) -> Result<Box<dyn Source>, SourceError> {
    Ok(Box::new(UrlSource::new(&descriptor)?))
}

/// Registry validator for `Url`.
pub fn validate_url_source(config: BTreeMap<String, String>) -> Result<ValidatedConfig, SourceError> {
    UrlSource::validate_and_format(config)
}
