//! config/mod.rs
//! Descriptor configuration: declared parameter tables, validation and the
//! immutable `SourceDescriptor` handed to source constructors.
//!
//! Notes:
//! - Validation only inspects values. It never opens files or sockets, so the
//!   same code path serves both source construction and offline dry validation.
//! - Unknown keys fail closed to catch typos early.

pub mod types;
pub mod validate;
pub mod descriptor;
pub mod loader;

pub use types::*;
pub use validate::*;
pub use descriptor::*;
pub use loader::*;
