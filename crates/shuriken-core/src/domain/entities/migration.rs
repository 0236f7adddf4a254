//! Migration inputs and outcomes.
//!
//! The executable side of a migration (its action) lives with the package
//! definitions in `crate::application::plugin`; this module only holds the
//! plain data that flows in and out of a run.

use semver::Version;

use super::package::CommandOptions;

/// What a migration action is told about the run it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    pub package_name: String,
    /// Installed version the whole run started from.
    pub from_version: Version,
    /// Version the whole run is heading to.
    pub to_version: Version,
    /// The version this particular migration brings the project to.
    pub target_version: Version,
    /// Extra options passed on the command line.
    pub extra: CommandOptions,
}

/// The step that stopped a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFailure {
    pub version: Version,
    pub description: String,
    pub reason: String,
}

impl std::fmt::Display for MigrationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "migration to {} ({}) failed: {}",
            self.version, self.description, self.reason
        )
    }
}

/// Outcome of an `update`.
///
/// Transient: only `to_version` is ever persisted, and only when
/// `persisted` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    pub success: bool,
    pub from_version: Version,
    pub to_version: Version,
    pub completed_migrations: Vec<Version>,
    pub error: Option<MigrationFailure>,
    pub persisted: bool,
}

impl MigrationResult {
    /// Nothing to do, nothing written.
    pub fn noop(from_version: Version, to_version: Version) -> Self {
        Self {
            success: true,
            from_version,
            to_version,
            completed_migrations: Vec::new(),
            error: None,
            persisted: false,
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.from_version == self.to_version
    }

    pub fn is_downgrade(&self) -> bool {
        self.to_version < self.from_version
    }

    /// Completed versions joined for display, or `none`.
    pub fn completed_list(&self) -> String {
        if self.completed_migrations.is_empty() {
            return "none".into();
        }
        self.completed_migrations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
