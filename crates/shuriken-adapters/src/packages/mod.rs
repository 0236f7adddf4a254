//! Packages compiled into the binary.

pub mod jarvis;

use shuriken_core::application::PackageDefinition;

/// Builds a package definition on demand.
pub type PackageFactory = fn() -> PackageDefinition;

/// Every compiled-in package, by name.
pub const BUILTIN_PACKAGES: &[(&str, PackageFactory)] = &[(jarvis::NAME, jarvis::definition)];
