//! Package definitions: commands and migrations with executable actions.
//!
//! Packages are registered statically (a factory returning a
//! [`PackageDefinition`]) or described by a manifest whose actions are
//! interpreted by an adapter. Either way the application sees the same types.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use semver::Version;

use crate::application::ports::{Filesystem, Prompter};
use crate::application::services::writer::{self, WriteReport};
use crate::domain::{
    CommandOption, CommandOptions, DomainError, FileSet, MigrationOptions, PackageMetadata,
    ProjectContext,
};
use crate::error::ShurikenResult;

/// Error type returned by command handlers and migration actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// What an action may touch while it runs.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// Project root; relative paths are resolved against it.
    pub root: &'a Path,
    pub filesystem: &'a dyn Filesystem,
    pub prompter: &'a dyn Prompter,
    pub project: &'a ProjectContext,
}

impl<'a> ExecutionContext<'a> {
    /// Write `set` under the project root, rolling back a freshly created
    /// root on failure.
    pub fn write(&self, set: &FileSet) -> ShurikenResult<WriteReport> {
        writer::write_file_set(self.filesystem, self.root, set)
    }
}

impl fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("root", &self.root)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

/// Behaviour behind a package command.
pub trait CommandHandler: Send + Sync {
    fn execute(&self, options: &CommandOptions, ctx: &ExecutionContext<'_>)
    -> Result<(), ActionError>;
}

/// Behaviour behind a migration step. Should be idempotent.
pub trait MigrationAction: Send + Sync {
    fn apply(&self, options: &MigrationOptions, ctx: &ExecutionContext<'_>)
    -> Result<(), ActionError>;
}

struct FnHandler<F>(F);

impl<F> CommandHandler for FnHandler<F>
where
    F: Fn(&CommandOptions, &ExecutionContext<'_>) -> Result<(), ActionError> + Send + Sync,
{
    fn execute(
        &self,
        options: &CommandOptions,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), ActionError> {
        (self.0)(options, ctx)
    }
}

struct FnAction<F>(F);

impl<F> MigrationAction for FnAction<F>
where
    F: Fn(&MigrationOptions, &ExecutionContext<'_>) -> Result<(), ActionError> + Send + Sync,
{
    fn apply(
        &self,
        options: &MigrationOptions,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), ActionError> {
        (self.0)(options, ctx)
    }
}

/// A named operation a package exposes, e.g. `setup` or `component`.
#[derive(Clone)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    pub fn from_fn<F>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&CommandOptions, &ExecutionContext<'_>) -> Result<(), ActionError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, description, FnHandler(f))
    }

    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Merge declared defaults under `given` and check required options.
    ///
    /// Options the command does not declare are passed through untouched.
    pub fn resolve_options(&self, given: &CommandOptions) -> Result<CommandOptions, DomainError> {
        let mut resolved = CommandOptions::new();
        for option in &self.options {
            if let Some(default) = &option.default {
                resolved.insert(option.name.clone(), default.clone());
            }
        }
        resolved.extend(given.iter().map(|(k, v)| (k.clone(), v.clone())));

        for option in self.options.iter().filter(|o| o.required) {
            if !resolved.contains_key(&option.name) {
                return Err(DomainError::MissingRequiredOption {
                    command: self.name.clone(),
                    option: option.name.clone(),
                });
            }
        }
        Ok(resolved)
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// One step that brings a project to `target_version`.
#[derive(Clone)]
pub struct MigrationDefinition {
    pub target_version: Version,
    pub description: String,
    pub action: Arc<dyn MigrationAction>,
}

impl MigrationDefinition {
    pub fn new(
        target_version: Version,
        description: impl Into<String>,
        action: impl MigrationAction + 'static,
    ) -> Self {
        Self {
            target_version,
            description: description.into(),
            action: Arc::new(action),
        }
    }

    pub fn from_fn<F>(target_version: Version, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&MigrationOptions, &ExecutionContext<'_>) -> Result<(), ActionError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(target_version, description, FnAction(f))
    }
}

impl fmt::Debug for MigrationDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationDefinition")
            .field("target_version", &self.target_version.to_string())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A loaded package: metadata, commands in declaration order, and
/// migrations in any order.
#[derive(Debug, Clone)]
pub struct PackageDefinition {
    pub metadata: PackageMetadata,
    pub commands: Vec<CommandDefinition>,
    pub migrations: Vec<MigrationDefinition>,
}

impl PackageDefinition {
    pub const SETUP_COMMAND: &'static str = "setup";

    pub fn new(metadata: PackageMetadata) -> Self {
        Self {
            metadata,
            commands: Vec::new(),
            migrations: Vec::new(),
        }
    }

    pub fn with_command(mut self, command: CommandDefinition) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_migration(mut self, migration: MigrationDefinition) -> Self {
        self.migrations.push(migration);
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn version(&self) -> &Version {
        &self.metadata.version
    }

    /// Exact, case-sensitive lookup.
    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn setup_command(&self) -> Option<&CommandDefinition> {
        self.command(Self::SETUP_COMMAND)
    }
}
