//! `shuriken update`: migrate an installed package forward.

use tracing::instrument;

use shuriken_core::application::LifecycleRequest;

use crate::{
    app::{App, parse_options},
    cli::UpdateArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(package = %args.package))]
pub fn execute(args: UpdateArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let mut request = LifecycleRequest::new();
    request.options = parse_options(&args.options)?;
    if let Some(version) = args.target_version {
        request = request.version(version);
    }

    let package = &args.package;
    let spinner = output.spinner(&format!("Updating {package}"));
    let result = app.lifecycle.update(package, &request);
    spinner.finish_and_clear();
    let result = result?;

    let (from, to) = (&result.from_version, &result.to_version);
    if result.success {
        if result.is_up_to_date() {
            output.info(&format!("{package} is already at {from}"))?;
        } else if result.is_downgrade() {
            output.warning(&format!(
                "{package} is installed at {from}; downgrading to {to} is not supported"
            ))?;
        } else {
            output.success(&format!("Updated {package} {from} -> {to}"))?;
            output.print(&format!("  Migrations applied: {}", result.completed_list()))?;
        }
        return Ok(());
    }

    let completed = result
        .completed_migrations
        .iter()
        .map(ToString::to_string)
        .collect();
    Err(match result.error {
        Some(failure) => CliError::MigrationFailed {
            package: package.clone(),
            version: failure.version.to_string(),
            reason: failure.reason,
            completed,
        },
        None => CliError::MigrationFailed {
            package: package.clone(),
            version: to.to_string(),
            reason: "no failure was reported".into(),
            completed,
        },
    })
}
