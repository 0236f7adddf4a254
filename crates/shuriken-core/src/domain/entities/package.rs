//! Package records: what a package declares and what a project has installed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Options handed to command handlers, keyed by option name.
///
/// Sorted so that logs and rendered output are stable between runs.
pub type CommandOptions = BTreeMap<String, String>;

/// Identity of a package definition as declared by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: Version,
    pub description: String,
}

impl PackageMetadata {
    pub fn new(name: impl Into<String>, version: Version, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version,
            description: description.into(),
        }
    }
}

/// A single option accepted by a package command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: None,
            required: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The persisted record of a package installed for this user.
///
/// `version` is what the package declared when it was installed;
/// `installed_version` is where the project actually is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPackage {
    pub name: String,
    pub version: Version,
    pub description: String,
    pub installed_version: Version,
    pub installed_at: DateTime<Utc>,
}

impl InstalledPackage {
    /// Record a fresh install of `metadata` at `installed_version`.
    pub fn new(
        metadata: &PackageMetadata,
        installed_version: Version,
        installed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: metadata.name.clone(),
            version: metadata.version.clone(),
            description: metadata.description.clone(),
            installed_version,
            installed_at,
        }
    }

    /// Move the install to `version`, refreshing the timestamp.
    pub fn migrated_to(mut self, version: Version, at: DateTime<Utc>) -> Self {
        self.installed_version = version;
        self.installed_at = at;
        self
    }
}
