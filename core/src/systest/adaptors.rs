//! systest/adaptors.rs
//! File-source adaptors for inline and file-backed test data.
//!
//! Notes:
//! - Both adaptors refuse a configuration that already names a `file_path`;
//!   test data must never silently replace a user-supplied origin.
//! - Inline rows are written newline-delimited, one row per line, in order.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::SourceConfig;
use crate::constants::params;
use crate::types::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineDataArguments {
    pub physical_source_config: SourceConfig,
    pub tuples: Vec<String>,
    pub test_file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDataArguments {
    pub physical_source_config: SourceConfig,
    pub test_file_path: PathBuf,
}

fn ensure_no_file_path(config: &SourceConfig, what: &str) -> Result<(), SourceError> {
    match config.config.get(params::FILE_PATH) {
        Some(existing) => Err(SourceError::Usage(format!(
            "mock FileSource cannot use given {what} if a '{}' is set (found: {existing})",
            params::FILE_PATH
        ))),
        None => Ok(()),
    }
}

/// `file_path` is stored as text, so the path must be valid UTF-8.
fn path_as_config_value(path: &Path) -> Result<String, SourceError> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        SourceError::Usage(format!("test file path is not valid UTF-8: {}", path.display()))
    })
}

fn write_rows(path: &Path, rows: &[String]) -> Result<(), SourceError> {
    let io_err = |e: std::io::Error| {
        SourceError::Resource(format!("could not write test data file {}: {e}", path.display()))
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for row in rows {
        out.write_all(row.as_bytes()).map_err(io_err)?;
        out.write_all(b"\n").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Write `tuples` to `test_file_path` and return the config pointing at it.
pub fn file_inline_data(args: InlineDataArguments) -> Result<SourceConfig, SourceError> {
    let InlineDataArguments { mut physical_source_config, tuples, test_file_path } = args;
    ensure_no_file_path(&physical_source_config, "inline data")?;
    let file_path = path_as_config_value(&test_file_path)?;

    write_rows(&test_file_path, &tuples)?;
    debug!(path = %file_path, rows = tuples.len(), "wrote inline test data");

    physical_source_config.config.insert(params::FILE_PATH.to_string(), file_path);
    Ok(physical_source_config)
}

/// Return the config pointing at the existing `test_file_path`.
pub fn file_file_data(args: FileDataArguments) -> Result<SourceConfig, SourceError> {
    let FileDataArguments { mut physical_source_config, test_file_path } = args;
    ensure_no_file_path(&physical_source_config, "file data")?;
    let file_path = path_as_config_value(&test_file_path)?;

    physical_source_config.config.insert(params::FILE_PATH.to_string(), file_path);
    Ok(physical_source_config)
}
