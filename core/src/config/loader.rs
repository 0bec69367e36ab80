//! config/loader.rs
//! On-disk source configuration (JSON).
//!
//! ```json
//! { "type": "File", "config": { "file_path": "/data/in.csv.zst", "compression": "zstd" } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::types::ConfigError;

/// Unvalidated physical source configuration: a type name plus raw key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

impl SourceConfig {
    pub fn new(source_type: impl Into<String>) -> Self {
        Self { source_type: source_type.into(), config: BTreeMap::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Load {
            path: "<inline>".into(),
            msg: e.to_string(),
        })
    }
}

pub fn load_source_config(path: &Path) -> Result<SourceConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Load {
        path: path.display().to_string(),
        msg: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Load {
        path: path.display().to_string(),
        msg: e.to_string(),
    })
}
