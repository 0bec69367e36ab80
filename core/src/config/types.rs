//! config/types.rs
//! Parameter declarations and configuration errors.

use std::fmt;

/// Conversion/validation rule attached to a declared parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParameterRule {
    /// Any value, including the empty string.
    Any,
    /// Non-empty after trimming.
    NonEmpty,
    /// One of a fixed set, compared case-insensitively and stored lower-cased.
    OneOf(&'static [&'static str]),
    /// Base-10 integer greater than zero.
    PositiveInteger,
    /// `<scheme>://<rest>` with the scheme in the given set.
    Url(&'static [&'static str]),
}

/// One recognized parameter of a source type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    /// `None` marks the parameter as required.
    pub default: Option<&'static str>,
    pub rule: ParameterRule,
}

impl ParameterSpec {
    pub const fn required(name: &'static str, rule: ParameterRule) -> Self {
        Self { name, default: None, rule }
    }

    pub const fn optional(name: &'static str, default: &'static str, rule: ParameterRule) -> Self {
        Self { name, default: Some(default), rule }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownParameter { source_type: String, key: String },
    MissingParameter { source_type: String, key: String },
    InvalidValue { source_type: String, key: String, value: String, reason: String },
    /// Config file could not be read or parsed.
    Load { path: String, msg: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConfigError::*;
        match self {
            UnknownParameter { source_type, key } =>
                write!(f, "unknown parameter '{}' for source type {}", key, source_type),
            MissingParameter { source_type, key } =>
                write!(f, "missing required parameter '{}' for source type {}", key, source_type),
            InvalidValue { source_type, key, value, reason } =>
                write!(f, "invalid value '{}' for parameter '{}' of source type {}: {}",
                       value, key, source_type, reason),
            Load { path, msg } =>
                write!(f, "could not load source config {}: {}", path, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
