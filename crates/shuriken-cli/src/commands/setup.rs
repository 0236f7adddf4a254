//! `shuriken setup`: install a package into the project.

use tracing::instrument;

use shuriken_core::application::{LifecycleRequest, SetupOutcome};

use crate::{
    app::{App, parse_options},
    cli::SetupArgs,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(package = %args.package))]
pub fn execute(args: SetupArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let mut request = LifecycleRequest::new();
    request.options = parse_options(&args.options)?;
    if let Some(version) = args.pkg_version {
        request = request.version(version);
    }

    let package = &args.package;
    match app.lifecycle.setup(package, &request)? {
        SetupOutcome::Installed {
            version,
            previous: None,
        } => output.success(&format!("Installed {package}@{version}"))?,
        SetupOutcome::Installed {
            version,
            previous: Some(previous),
        } => output.success(&format!(
            "Installed {package}@{version} (previously {previous})"
        ))?,
        SetupOutcome::AlreadyInstalled { version } => {
            output.info(&format!("{package}@{version} is already installed"))?
        }
    }

    Ok(())
}
