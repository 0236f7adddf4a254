//! Application layer for shuriken.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (LifecycleService, CommandService, PackageCatalog)
//! - **Plugin**: Package, command and migration definitions with their actions
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod error;
pub mod plugin;
pub mod ports;
pub mod services;

pub use services::{
    CommandService, ExecutionReport, LifecycleRequest, LifecycleService, MigrationExecutor,
    MigrationPath, PackageCatalog, SetupOutcome, Workspace, WriteReport,
};

pub use plugin::{
    ActionError, CommandDefinition, CommandHandler, ExecutionContext, MigrationAction,
    MigrationDefinition, PackageDefinition,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, PackageSource, Prompter, RegistryStore};

pub use error::ApplicationError;
