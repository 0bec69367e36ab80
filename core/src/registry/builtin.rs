//! registry/builtin.rs
//! Explicit bootstrap list of the built-in entries.

use crate::constants::source_types;
use crate::registry::registries::RegistriesBuilder;
use crate::registry::types::RegistryError;
use crate::source::{create_file_source, create_url_source, validate_file_source, validate_url_source};
use crate::systest::{file_file_data, file_inline_data};

impl RegistriesBuilder {
    /// `File` source, validator and both test-data adaptors.
    pub fn with_file(self) -> Result<Self, RegistryError> {
        self.register_source(source_types::FILE, create_file_source, validate_file_source)?
            .register_inline_data(source_types::FILE, file_inline_data)?
            .register_file_data(source_types::FILE, file_file_data)
    }

    pub fn with_url(self) -> Result<Self, RegistryError> {
        self.register_source(source_types::URL, create_url_source, validate_url_source)
    }

    pub fn with_builtin(self) -> Result<Self, RegistryError> {
        self.with_file()?.with_url()
    }
}
