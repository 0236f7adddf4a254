//! Running package commands.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::application::ApplicationError;
use crate::application::plugin::{CommandDefinition, PackageDefinition};
use crate::application::services::catalog::PackageCatalog;
use crate::application::services::workspace::Workspace;
use crate::domain::CommandOptions;
use crate::error::{ShurikenError, ShurikenResult};

pub struct CommandService {
    catalog: Arc<PackageCatalog>,
    workspace: Arc<Workspace>,
}

impl CommandService {
    pub fn new(catalog: Arc<PackageCatalog>, workspace: Arc<Workspace>) -> Self {
        Self { catalog, workspace }
    }

    /// Run `command` of `package` with `options`.
    #[instrument(skip(self, options))]
    pub fn run(&self, package: &str, command: &str, options: &CommandOptions) -> ShurikenResult<()> {
        let definition = self.catalog.get(package)?;
        let cmd = definition
            .command(command)
            .ok_or_else(|| ApplicationError::CommandNotFound {
                package: package.to_string(),
                command: command.to_string(),
            })?;
        self.execute(&definition, cmd, options)
    }

    /// Resolve options for `command` and invoke its handler.
    pub fn execute(
        &self,
        package: &PackageDefinition,
        command: &CommandDefinition,
        options: &CommandOptions,
    ) -> ShurikenResult<()> {
        let resolved = command
            .resolve_options(options)
            .map_err(ShurikenError::Domain)?;

        info!(
            package = %package.name(),
            command = %command.name,
            "Running command"
        );
        command
            .handler
            .execute(&resolved, &self.workspace.context())
            .map_err(|e| {
                error!(error = %e, "Command failed");
                ApplicationError::CommandFailed {
                    package: package.name().to_string(),
                    command: command.name.clone(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use semver::Version;

    use super::*;
    use crate::application::plugin::CommandDefinition;
    use crate::application::ports::{MockFilesystem, MockPackageSource, MockPrompter};
    use crate::domain::{CommandOption, PackageMetadata, ProjectContext};
    use crate::error::ErrorCategory;

    fn workspace() -> Arc<Workspace> {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "absent".into(),
            }
            .into())
        });
        fs.expect_exists().return_const(false);
        Arc::new(
            Workspace::open("/proj", Box::new(fs), Box::new(MockPrompter::new()))
                .with_project(ProjectContext::default()),
        )
    }

    fn service_with(definition: PackageDefinition) -> CommandService {
        let mut source = MockPackageSource::new();
        source
            .expect_load()
            .returning(move |_| Ok(Some(definition.clone())));
        source.expect_label().return_const("test".to_string());
        CommandService::new(Arc::new(PackageCatalog::new(vec![Box::new(source)])), workspace())
    }

    fn package(command: CommandDefinition) -> PackageDefinition {
        PackageDefinition::new(PackageMetadata::new("jarvis", Version::new(1, 0, 0), ""))
            .with_command(command)
    }

    #[test]
    fn handler_receives_resolved_options() {
        let seen = Arc::new(Mutex::new(CommandOptions::new()));
        let captured = Arc::clone(&seen);
        let cmd = CommandDefinition::from_fn("component", "", move |opts, _| {
            *captured.lock().unwrap() = opts.clone();
            Ok(())
        })
        .with_option(CommandOption::new("use", "").with_default("src/components"));

        let mut given = CommandOptions::new();
        given.insert("name".into(), "Button".into());
        service_with(package(cmd)).run("jarvis", "component", &given).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.get("name").map(String::as_str), Some("Button"));
        assert_eq!(seen.get("use").map(String::as_str), Some("src/components"));
    }

    #[test]
    fn unknown_command_is_not_found() {
        let cmd = CommandDefinition::from_fn("setup", "", |_, _| Ok(()));
        let err = service_with(package(cmd))
            .run("jarvis", "deploy", &CommandOptions::new())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn handler_errors_become_command_failed() {
        let cmd = CommandDefinition::from_fn("setup", "", |_, _| Err("no space left".into()));
        let err = service_with(package(cmd))
            .run("jarvis", "setup", &CommandOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ShurikenError::Application(ApplicationError::CommandFailed { ref reason, .. })
                if reason == "no space left"
        ));
    }
}
