//! `shuriken run`: run any command of a package.

use tracing::instrument;

use crate::{
    app::{App, parse_options},
    cli::RunArgs,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(package = %args.package, command = %args.command))]
pub fn execute(args: RunArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let options = parse_options(&args.options)?;
    app.commands.run(&args.package, &args.command, &options)?;
    output.success(&format!("{} {} finished", args.package, args.command))?;
    Ok(())
}
