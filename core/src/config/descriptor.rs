//! config/descriptor.rs
//! Immutable source descriptor: type name + validated parameters.

use std::fmt;

use crate::config::types::ConfigError;
use crate::config::validate::ValidatedConfig;

/// Built once at source construction, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    source_type: String,
    config: ValidatedConfig,
}

impl SourceDescriptor {
    pub fn new(source_type: impl Into<String>, config: ValidatedConfig) -> Self {
        Self { source_type: source_type.into(), config }
    }

    /// Build a descriptor without running the type's validator.
    ///
    /// Values reach the source exactly as given, so malformed values surface
    /// later (e.g. an unknown codec fails `open`).
    pub fn from_trusted<I, K, V>(source_type: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::new(source_type, ValidatedConfig::from_map(values))
    }

    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Value of `key`, or a configuration error naming the missing key.
    pub fn get_from_config(&self, key: &str) -> Result<&str, ConfigError> {
        self.config.get(key).ok_or_else(|| ConfigError::MissingParameter {
            source_type: self.source_type.clone(),
            key: key.to_string(),
        })
    }

    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.config.get(key)
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.source_type)?;
        for (i, (k, v)) in self.config.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, ")")
    }
}
