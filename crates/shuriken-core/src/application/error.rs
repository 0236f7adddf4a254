//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No source could provide the package.
    #[error("Package '{name}' not found")]
    PackageNotFound { name: String, searched: Vec<String> },

    /// The package exists but declares no `setup` command.
    #[error("Package '{name}' has no setup command")]
    MissingSetupCommand { name: String },

    #[error("Package '{package}' has no command '{command}'")]
    CommandNotFound { package: String, command: String },

    /// `update` on a package that was never set up.
    #[error("Package '{name}' is not installed")]
    NotInstalled { name: String },

    /// A command handler returned an error.
    #[error("Command '{command}' of '{package}' failed: {reason}")]
    CommandFailed {
        package: String,
        command: String,
        reason: String,
    },

    /// The registry file exists but cannot be understood.
    #[error("Registry at {path} is corrupt: {reason}")]
    RegistryCorrupt { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared in-memory state is unusable (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,

    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The user backed out of an interactive prompt.
    #[error("Cancelled by user")]
    Cancelled,

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PackageNotFound { searched, .. } => {
                let mut out = vec!["Try: shuriken list to see available packages".into()];
                if !searched.is_empty() {
                    out.push(format!("Looked in: {}", searched.join(", ")));
                }
                out
            }
            Self::MissingSetupCommand { name } => vec![
                format!("'{}' cannot be installed with setup", name),
                "Add a command named 'setup' to the package".into(),
            ],
            Self::CommandNotFound { package, .. } => vec![
                format!("Try: shuriken list to see the commands of '{}'", package),
            ],
            Self::NotInstalled { name } => vec![
                format!("Install it first: shuriken setup {}", name),
            ],
            Self::RegistryCorrupt { path, .. } => vec![
                format!("Inspect or delete {}", path.display()),
                "The next successful setup rewrites the file".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec!["An earlier operation panicked; rerun the command".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PackageNotFound { .. }
            | Self::MissingSetupCommand { .. }
            | Self::CommandNotFound { .. }
            | Self::NotInstalled { .. } => ErrorCategory::NotFound,
            Self::Cancelled => ErrorCategory::Validation,
            Self::CommandFailed { .. }
            | Self::RegistryCorrupt { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::PromptFailed { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}
