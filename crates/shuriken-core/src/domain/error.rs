// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside migration results)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    #[error("Invalid package '{name}': {reason}")]
    InvalidPackage { name: String, reason: String },

    #[error("Invalid option '{raw}': expected KEY=VALUE")]
    InvalidOption { raw: String },

    #[error("Command '{command}' requires option '{option}'")]
    MissingRequiredOption { command: String, option: String },

    // ========================================================================
    // File set constraints
    // ========================================================================
    #[error("Nothing to write under {root}")]
    EmptyFileSet { root: String },

    #[error("Duplicate path in file set: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPackageName { .. } => vec![
                "Package names are directory names: no '/', '\\' or leading '.'".into(),
                "Try: shuriken list to see available packages".into(),
            ],
            Self::InvalidVersion { value, .. } => vec![
                format!("'{}' is not a semantic version", value),
                "Use MAJOR.MINOR.PATCH, e.g. 1.2.0 or 2.0.0-beta.1".into(),
            ],
            Self::InvalidPackage { name, .. } => vec![
                format!("The definition of '{}' could not be loaded", name),
                "Check the package manifest ([package] name, version, description)".into(),
            ],
            Self::InvalidOption { .. } => vec![
                "Pass command options as -o key=value".into(),
            ],
            Self::MissingRequiredOption { option, .. } => vec![
                format!("Provide it with -o {}=<value>", option),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPackage { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
