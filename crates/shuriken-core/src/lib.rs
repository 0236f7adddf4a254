//! shuriken core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the shuriken
//! package manager: installed-package registry, package catalog, migration
//! resolution and execution, following ports and adapters.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           shuriken-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (LifecycleService, CommandService,     │
//! │   PackageCatalog, MigrationExecutor)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, RegistryStore,             │
//! │  PackageSource, Prompter)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    shuriken-adapters (Infrastructure)   │
//! │ (JsonRegistryStore, LocalFilesystem,    │
//! │  BuiltinSource, DirectorySource)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shuriken_core::prelude::*;
//!
//! let catalog = Arc::new(PackageCatalog::new(sources));
//! let workspace = Arc::new(Workspace::open(".", filesystem, prompter));
//! let lifecycle = LifecycleService::new(catalog, registry, workspace);
//!
//! lifecycle.setup("jarvis", &LifecycleRequest::new())?;
//! let result = lifecycle.update("jarvis", &LifecycleRequest::new().version("1.1.0"))?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ActionError, CommandDefinition, CommandService, ExecutionContext, LifecycleRequest,
        LifecycleService, MigrationDefinition, PackageCatalog, PackageDefinition, SetupOutcome,
        Workspace,
        ports::{Filesystem, PackageSource, Prompter, RegistryStore},
    };
    pub use crate::domain::{
        CommandOption, CommandOptions, FileSet, InstalledPackage, MigrationResult,
        PackageMetadata, ProjectContext, RenderContext,
    };
    pub use crate::error::{ShurikenError, ShurikenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
