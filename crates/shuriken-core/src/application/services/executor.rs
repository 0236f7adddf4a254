//! Sequential migration execution.

use semver::Version;
use tracing::{error, info, info_span};

use crate::application::plugin::ExecutionContext;
use crate::application::services::resolver::MigrationPath;
use crate::domain::{CommandOptions, MigrationFailure, MigrationOptions};

/// Outcome of running a path: what finished, and what stopped it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub completed: Vec<Version>,
    pub failure: Option<MigrationFailure>,
}

impl ExecutionReport {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Applies migration paths one step at a time.
///
/// Holds no state between runs. A failed step ends the run; completed steps
/// are not undone.
#[derive(Debug, Default, Clone, Copy)]
pub struct MigrationExecutor;

impl MigrationExecutor {
    pub fn new() -> Self {
        Self
    }

    pub fn run(
        &self,
        package_name: &str,
        path: &MigrationPath,
        from: &Version,
        to: &Version,
        extra: &CommandOptions,
        ctx: &ExecutionContext<'_>,
    ) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for (index, step) in path.steps().iter().enumerate() {
            let span = info_span!(
                "migration",
                package = package_name,
                target = %step.target_version,
                step = index + 1,
                of = path.len()
            );
            let _guard = span.enter();

            let options = MigrationOptions {
                package_name: package_name.to_string(),
                from_version: from.clone(),
                to_version: to.clone(),
                target_version: step.target_version.clone(),
                extra: extra.clone(),
            };

            info!(description = %step.description, "Applying migration");
            match step.action.apply(&options, ctx) {
                Ok(()) => report.completed.push(step.target_version.clone()),
                Err(e) => {
                    error!(error = %e, "Migration failed");
                    report.failure = Some(MigrationFailure {
                        version: step.target_version.clone(),
                        description: step.description.clone(),
                        reason: e.to_string(),
                    });
                    break;
                }
            }
        }

        report
    }
}
