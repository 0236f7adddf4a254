//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `shuriken-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `RegistryStore`: Installed-package persistence
//!   - `PackageSource`: Where package definitions come from
//!   - `Prompter`: Interactive questions
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, PackageSource, Prompter, RegistryStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageSource, MockPrompter, MockRegistryStore};
