//! registry/registries.rs
//! The four source-related registries and the builder that fills them.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{SourceConfig, SourceDescriptor, ValidatedConfig};
use crate::registry::types::{Registry, RegistryError};
use crate::source::Source;
use crate::systest::{FileDataArguments, InlineDataArguments};
use crate::types::SourceError;

pub type SourceConstructor = fn(SourceDescriptor) -> Result<Box<dyn Source>, SourceError>;
pub type SourceValidator = fn(BTreeMap<String, String>) -> Result<ValidatedConfig, SourceError>;
pub type InlineDataAdaptor = fn(InlineDataArguments) -> Result<SourceConfig, SourceError>;
pub type FileDataAdaptor = fn(FileDataArguments) -> Result<SourceConfig, SourceError>;

pub const SOURCE_CATEGORY: &str = "source";
pub const VALIDATION_CATEGORY: &str = "source validation";
pub const INLINE_DATA_CATEGORY: &str = "inline data";
pub const FILE_DATA_CATEGORY: &str = "file data";

/// Immutable after `RegistriesBuilder::build`.
#[derive(Debug, Clone)]
pub struct Registries {
    sources: Registry<SourceConstructor>,
    validators: Registry<SourceValidator>,
    inline_data: Registry<InlineDataAdaptor>,
    file_data: Registry<FileDataAdaptor>,
}

impl Registries {
    pub fn builder() -> RegistriesBuilder {
        RegistriesBuilder::new()
    }

    /// Registries holding the `File` and `Url` entries.
    pub fn with_builtin() -> Result<Self, RegistryError> {
        Ok(RegistriesBuilder::new().with_builtin()?.build())
    }

    /// Registered source type names, for diagnostics.
    pub fn names(&self) -> Vec<&str> {
        self.sources.names()
    }

    pub fn contains_source(&self, source_type: &str) -> bool {
        self.sources.contains(source_type)
    }

    pub fn inline_data_names(&self) -> Vec<&str> {
        self.inline_data.names()
    }

    pub fn file_data_names(&self) -> Vec<&str> {
        self.file_data.names()
    }

    /// Dry-run path: validate `config` for `source_type` without constructing a source.
    pub fn validate(
        &self,
        source_type: &str,
        config: BTreeMap<String, String>,
    ) -> Result<SourceDescriptor, SourceError> {
        let validator = self.validators.get(source_type)?;
        let validated = validator(config)?;
        Ok(SourceDescriptor::new(source_type, validated))
    }

    pub fn validate_config(&self, config: &SourceConfig) -> Result<SourceDescriptor, SourceError> {
        self.validate(&config.source_type, config.config.clone())
    }

    /// Re-validate `descriptor` and construct a fresh, unopened source.
    pub fn create(&self, descriptor: SourceDescriptor) -> Result<Box<dyn Source>, SourceError> {
        let constructor = self.sources.get(descriptor.source_type())?;
        let source_type = descriptor.source_type().to_string();
        let descriptor = self.validate(&source_type, descriptor.config().clone().into_map())?;
        debug!(descriptor = %descriptor, "constructing source");
        constructor(descriptor)
    }

    /// Construct without re-validation. Malformed values surface at `open`.
    pub fn create_unchecked(&self, descriptor: SourceDescriptor) -> Result<Box<dyn Source>, SourceError> {
        let constructor = self.sources.get(descriptor.source_type())?;
        constructor(descriptor)
    }

    pub fn create_from_config(&self, config: &SourceConfig) -> Result<Box<dyn Source>, SourceError> {
        self.create(self.validate_config(config)?)
    }

    /// Turn inline test rows into a configuration the `source_type` source can read.
    pub fn inline_data(
        &self,
        source_type: &str,
        args: InlineDataArguments,
    ) -> Result<SourceConfig, SourceError> {
        let adaptor = self.inline_data.get(source_type)?;
        adaptor(args)
    }

    /// Point the `source_type` source at an existing test data file.
    pub fn file_data(
        &self,
        source_type: &str,
        args: FileDataArguments,
    ) -> Result<SourceConfig, SourceError> {
        let adaptor = self.file_data.get(source_type)?;
        adaptor(args)
    }
}

/// Collects entries before the registries are frozen.
#[derive(Debug)]
pub struct RegistriesBuilder {
    inner: Registries,
}

impl Default for RegistriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistriesBuilder {
    pub fn new() -> Self {
        Self {
            inner: Registries {
                sources: Registry::new(SOURCE_CATEGORY),
                validators: Registry::new(VALIDATION_CATEGORY),
                inline_data: Registry::new(INLINE_DATA_CATEGORY),
                file_data: Registry::new(FILE_DATA_CATEGORY),
            },
        }
    }

    /// Register a source type together with its validator. Neither table is
    /// touched if the name is taken in either.
    pub fn register_source(
        mut self,
        name: &str,
        constructor: SourceConstructor,
        validator: SourceValidator,
    ) -> Result<Self, RegistryError> {
        if self.inner.validators.contains(name) {
            return Err(RegistryError::Duplicate { category: VALIDATION_CATEGORY, name: name.to_string() });
        }
        self.inner.sources.register(name, constructor)?;
        self.inner.validators.register(name, validator)?;
        Ok(self)
    }

    pub fn register_inline_data(mut self, name: &str, adaptor: InlineDataAdaptor) -> Result<Self, RegistryError> {
        self.inner.inline_data.register(name, adaptor)?;
        Ok(self)
    }

    pub fn register_file_data(mut self, name: &str, adaptor: FileDataAdaptor) -> Result<Self, RegistryError> {
        self.inner.file_data.register(name, adaptor)?;
        Ok(self)
    }

    pub fn build(self) -> Registries {
        debug!(
            sources = self.inner.sources.len(),
            inline_data = self.inner.inline_data.len(),
            file_data = self.inner.file_data.len(),
            "registries built"
        );
        self.inner
    }
}
