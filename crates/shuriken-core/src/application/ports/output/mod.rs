//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `shuriken-adapters` crate provides implementations.

use std::path::Path;

use crate::application::plugin::PackageDefinition;
use crate::domain::InstalledPackage;
use crate::error::ShurikenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `shuriken_adapters::filesystem::LocalFilesystem` (production)
/// - `shuriken_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ShurikenResult<()>;
    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ShurikenResult<()>;
    fn read_to_string(&self, path: &Path) -> ShurikenResult<String>;
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ShurikenResult<()>;
}

/// Port for the installed-package registry.
///
/// Implementations load their whole state up front and persist every
/// mutation before returning.
///
/// Implemented by:
/// - `shuriken_adapters::registry_store::JsonRegistryStore` (production)
/// - `shuriken_adapters::registry_store::MemoryRegistryStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait RegistryStore: Send + Sync {
    fn get(&self, name: &str) -> ShurikenResult<Option<InstalledPackage>>;
    /// Insert or replace the entry with the same name, then persist.
    fn upsert(&self, package: InstalledPackage) -> ShurikenResult<()>;
    /// All entries sorted by name.
    fn list(&self) -> ShurikenResult<Vec<InstalledPackage>>;
}

/// Port for discovering package definitions.
///
/// Implemented by:
/// - `shuriken_adapters::package_source::BuiltinSource` (compiled-in packages)
/// - `shuriken_adapters::package_source::DirectorySource` (manifest directories)
#[cfg_attr(test, mockall::automock)]
pub trait PackageSource: Send + Sync {
    /// Short label for logs, e.g. `built-in` or a directory path.
    fn label(&self) -> String;
    /// Names this source can provide, in its own order.
    fn list(&self) -> ShurikenResult<Vec<String>>;
    /// `Ok(None)` when this source does not know the package.
    fn load(&self, name: &str) -> ShurikenResult<Option<PackageDefinition>>;
    /// Every place `load` looks for `name`, for not-found messages.
    fn locations(&self, name: &str) -> Vec<String>;
}

/// Port for interactive questions asked by package commands.
///
/// Implemented by:
/// - `shuriken_cli::prompt::TerminalPrompter` (dialoguer)
/// - `shuriken_adapters::prompt::ScriptedPrompter` (testing, non-interactive)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    fn input(&self, message: &str, default: Option<String>) -> ShurikenResult<String>;
    fn confirm(&self, message: &str, default: bool) -> ShurikenResult<bool>;
    /// Returns the index of the chosen item.
    fn select(&self, message: &str, items: &[String]) -> ShurikenResult<usize>;
}
