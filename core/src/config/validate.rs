//! config/validate.rs
//! Untyped string map -> validated, defaulted, normalized parameter set.

use std::collections::BTreeMap;

use crate::config::types::{ConfigError, ParameterRule, ParameterSpec};

/// Validated parameter set. Only produced by `validate_and_format` (or the
/// explicit trusted constructor on `SourceDescriptor`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedConfig {
    values: BTreeMap<String, String>,
}

impl ValidatedConfig {
    pub(crate) fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

/// Validate `config` against the declared `specs` of `source_type`.
///
/// - Unknown keys are rejected.
/// - Missing optional parameters take their default; missing required ones fail.
/// - An empty value for a parameter with a default is treated as absent.
/// - `OneOf` values are stored lower-cased.
pub fn validate_and_format<I>(
    config: I,
    specs: &[ParameterSpec],
    source_type: &str,
) -> Result<ValidatedConfig, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut raw: BTreeMap<String, String> = config.into_iter().collect();

    if let Some(unknown) = raw.keys().find(|k| !specs.iter().any(|s| s.name == k.as_str())) {
        return Err(ConfigError::UnknownParameter {
            source_type: source_type.to_string(),
            key: unknown.clone(),
        });
    }

    let mut out = BTreeMap::new();
    for spec in specs {
        let value = match raw.remove(spec.name) {
            Some(v) if v.trim().is_empty() && spec.default.is_some() => None,
            other => other,
        };
        let value = match (value, spec.default) {
            (Some(v), _) => v,
            (None, Some(default)) => default.to_string(),
            (None, None) => {
                return Err(ConfigError::MissingParameter {
                    source_type: source_type.to_string(),
                    key: spec.name.to_string(),
                })
            }
        };
        let normalized = apply_rule(spec, value, source_type)?;
        out.insert(spec.name.to_string(), normalized);
    }

    Ok(ValidatedConfig::from_map(out))
}

fn apply_rule(spec: &ParameterSpec, value: String, source_type: &str) -> Result<String, ConfigError> {
    let invalid = |value: &str, reason: String| ConfigError::InvalidValue {
        source_type: source_type.to_string(),
        key: spec.name.to_string(),
        value: value.to_string(),
        reason,
    };

    match spec.rule {
        ParameterRule::Any => Ok(value),
        ParameterRule::NonEmpty => {
            if value.trim().is_empty() {
                Err(invalid(&value, "value must not be empty".into()))
            } else {
                Ok(value)
            }
        }
        ParameterRule::OneOf(allowed) => {
            let lowered = value.trim().to_ascii_lowercase();
            if allowed.contains(&lowered.as_str()) {
                Ok(lowered)
            } else {
                Err(invalid(&value, format!("must be one of {:?}", allowed)))
            }
        }
        ParameterRule::PositiveInteger => match value.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(n.to_string()),
            Ok(_) => Err(invalid(&value, "must be greater than zero".into())),
            Err(e) => Err(invalid(&value, e.to_string())),
        },
        ParameterRule::Url(schemes) => match split_url_scheme(&value) {
            Some((scheme, _)) if schemes.contains(&scheme.to_ascii_lowercase().as_str()) => Ok(value),
            Some((scheme, _)) => Err(invalid(
                &value,
                format!("unsupported URL scheme '{}', expected one of {:?}", scheme, schemes),
            )),
            None => Err(invalid(&value, "not a URL (expected <scheme>://...)".into())),
        },
    }
}

/// Split `scheme://rest`. Returns `None` when there is no scheme or no rest.
pub fn split_url_scheme(url: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = url.split_once("://")?;
    let valid_scheme = !scheme.is_empty()
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid_scheme && !rest.is_empty() {
        Some((scheme, rest))
    } else {
        None
    }
}
