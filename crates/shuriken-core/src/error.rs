//! Unified error handling for shuriken core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for shuriken core operations.
#[derive(Debug, Error, Clone)]
pub enum ShurikenError {
    /// Errors from the domain layer (invalid input or definitions).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ShurikenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Try: shuriken config path to locate the config file".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in shuriken".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ShurikenResult<T> = Result<T, ShurikenError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ShurikenResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ShurikenResult<T> {
        self.map_err(|e| ShurikenError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_flow_through_layers() {
        let not_installed: ShurikenError = ApplicationError::NotInstalled {
            name: "jarvis".into(),
        }
        .into();
        assert_eq!(not_installed.category(), ErrorCategory::NotFound);
        assert!(not_installed.is_not_found());

        let bad_version: ShurikenError = DomainError::InvalidVersion {
            value: "x".into(),
            reason: "unexpected character".into(),
        }
        .into();
        assert_eq!(bad_version.category(), ErrorCategory::Validation);
    }

    #[test]
    fn not_found_suggests_listing() {
        let err: ShurikenError = ApplicationError::PackageNotFound {
            name: "ghost".into(),
            searched: vec!["built-in".into(), "packages/ghost/package.toml".into()],
        }
        .into();
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("shuriken list")));
        assert!(suggestions.iter().any(|s| s.contains("packages/ghost/package.toml")));
    }

    #[test]
    fn context_wraps_as_internal() {
        let io: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = io.context("reading registry").unwrap_err();
        assert!(matches!(err, ShurikenError::Internal { .. }));
        assert!(err.to_string().contains("reading registry: boom"));
    }
}
