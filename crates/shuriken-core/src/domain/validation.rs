use semver::Version;

use crate::domain::error::DomainError;

/// Centralized domain validation.
///
/// All input validation lives here, not scattered across services. Every
/// check runs before any state is touched.
pub struct DomainValidator;

impl DomainValidator {
    /// A package name doubles as a directory name inside the package roots.
    pub fn validate_package_name(name: &str) -> Result<(), DomainError> {
        let reason = if name.trim().is_empty() {
            Some("name cannot be empty")
        } else if name.starts_with('.') {
            Some("name cannot start with '.'")
        } else if name.contains('/') || name.contains('\\') {
            Some("name cannot contain path separators")
        } else if name.chars().any(char::is_whitespace) {
            Some("name cannot contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidPackageName {
                name: name.into(),
                reason: reason.into(),
            }),
            None => Ok(()),
        }
    }

    /// Parse a user- or author-supplied semantic version.
    ///
    /// A leading `v` is tolerated (`v1.2.0`), surrounding whitespace is not
    /// significant.
    pub fn parse_version(value: &str) -> Result<Version, DomainError> {
        let trimmed = value.trim();
        let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);
        Version::parse(candidate).map_err(|e| DomainError::InvalidVersion {
            value: value.into(),
            reason: e.to_string(),
        })
    }

    /// Split a `KEY=VALUE` command option.
    pub fn parse_option(raw: &str) -> Result<(String, String), DomainError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| DomainError::InvalidOption { raw: raw.into() })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::InvalidOption { raw: raw.into() });
        }
        Ok((key.to_string(), value.to_string()))
    }
}
