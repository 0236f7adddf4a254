//! Infrastructure adapters for shuriken.
//!
//! This crate implements the ports defined in `shuriken-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod package_source;
pub mod packages;
pub mod prompt;
pub mod registry_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use package_source::{BuiltinSource, DirectorySource};
pub use prompt::ScriptedPrompter;
pub use registry_store::{JsonRegistryStore, MemoryRegistryStore};
