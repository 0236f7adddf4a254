//! Wiring: the one place that builds stores, sources and services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use shuriken_adapters::{BuiltinSource, DirectorySource, JsonRegistryStore, LocalFilesystem};
use shuriken_core::{
    application::{
        CommandService, LifecycleService, PackageCatalog, Workspace, ports::PackageSource,
    },
    domain::{CommandOptions, DomainValidator},
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    prompt,
};

/// Services for one invocation.
pub struct App {
    pub catalog: Arc<PackageCatalog>,
    pub lifecycle: LifecycleService,
    pub commands: CommandService,
}

impl App {
    /// Build everything against the current directory.
    pub fn assemble(config: &AppConfig) -> CliResult<Self> {
        let root = std::env::current_dir().with_cli_context(|| "Cannot determine current directory")?;
        Self::assemble_at(config, &root)
    }

    #[instrument(skip_all, fields(root = %root.display(), registry = %config.registry.path.display()))]
    pub fn assemble_at(config: &AppConfig, root: &Path) -> CliResult<Self> {
        let registry = JsonRegistryStore::open_or_empty(&config.registry.path)?;
        let catalog = Arc::new(PackageCatalog::new(sources(config)));
        let workspace = Arc::new(Workspace::open(
            root,
            Box::new(LocalFilesystem::new()),
            prompt::for_terminal(),
        ));
        debug!("Services assembled");

        Ok(Self {
            commands: CommandService::new(Arc::clone(&catalog), Arc::clone(&workspace)),
            lifecycle: LifecycleService::new(Arc::clone(&catalog), Box::new(registry), workspace),
            catalog,
        })
    }
}

/// Package sources in priority order: compiled-in first, then manifests.
fn sources(config: &AppConfig) -> Vec<Box<dyn PackageSource>> {
    let mut directory = DirectorySource::new(&config.packages.path);
    if let Some(dist) = &config.packages.dist_path {
        directory = directory.with_dist(dist);
    }
    vec![Box::new(BuiltinSource::with_defaults()), Box::new(directory)]
}

/// Parse repeated `-o key=value` arguments; later keys win.
pub fn parse_options(raw: &[String]) -> CliResult<CommandOptions> {
    raw.iter()
        .map(|item| DomainValidator::parse_option(item))
        .collect::<Result<CommandOptions, _>>()
        .map_err(|e| CliError::Core(e.into()))
}

/// Manifest directory a package would load from, for display.
pub fn packages_dir(config: &AppConfig) -> PathBuf {
    config
        .packages
        .dist_path
        .clone()
        .filter(|d| d.is_dir())
        .unwrap_or_else(|| config.packages.path.clone())
}
