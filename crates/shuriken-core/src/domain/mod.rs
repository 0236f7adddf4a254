// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for shuriken.
//!
//! Plain data and the rules over it: package records, the registry, migration
//! results, file sets and rendering. Nothing here performs I/O; the
//! filesystem, prompts and package loading are reached through ports defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Validation up front**: inputs are checked before any state changes
pub mod entities;
pub mod error;

mod validation;

pub use entities::{
    CommandOption, CommandOptions, DirectoryToCreate, FileSet, FileToWrite, FsEntry,
    InstalledPackage, MigrationFailure, MigrationOptions, MigrationResult, PackageMetadata,
    ProjectContext, ProjectType, Registry, RegistryDocument, RenderContext,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
