//! Package Lifecycle Service - `setup` and `update`.
//!
//! The only code that mutates the registry. Everything else reads it.
//!
//! ```text
//! setup:  catalog ──► registry (already there?) ──► setup command ──► registry
//! update: registry ──► catalog ──► resolver ──► executor ──► registry (full success only)
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use semver::Version;
use tracing::{info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::services::catalog::PackageCatalog;
use crate::application::services::command_service::CommandService;
use crate::application::services::executor::MigrationExecutor;
use crate::application::services::resolver::MigrationPath;
use crate::application::services::workspace::Workspace;
use crate::application::ports::RegistryStore;
use crate::domain::{
    CommandOptions, DomainValidator as validator, InstalledPackage, MigrationResult,
};
use crate::error::{ShurikenError, ShurikenResult};

/// Input to `setup` and `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleRequest {
    /// Explicit version; the package's declared version when absent.
    pub version: Option<String>,
    pub options: CommandOptions,
}

impl LifecycleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    fn explicit_version(&self) -> ShurikenResult<Option<Version>> {
        self.version
            .as_deref()
            .map(validator::parse_version)
            .transpose()
            .map_err(ShurikenError::Domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The setup command ran and the registry now records `version`.
    Installed {
        version: Version,
        previous: Option<Version>,
    },
    /// Already at `version`; nothing ran, nothing was written.
    AlreadyInstalled { version: Version },
}

pub struct LifecycleService {
    catalog: Arc<PackageCatalog>,
    registry: Box<dyn RegistryStore>,
    workspace: Arc<Workspace>,
    commands: CommandService,
    executor: MigrationExecutor,
    clock: fn() -> DateTime<Utc>,
}

impl LifecycleService {
    pub fn new(
        catalog: Arc<PackageCatalog>,
        registry: Box<dyn RegistryStore>,
        workspace: Arc<Workspace>,
    ) -> Self {
        Self {
            commands: CommandService::new(Arc::clone(&catalog), Arc::clone(&workspace)),
            catalog,
            registry,
            workspace,
            executor: MigrationExecutor::new(),
            clock: Utc::now,
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &dyn RegistryStore {
        self.registry.as_ref()
    }

    /// Install `name`, or do nothing if it is already at the requested version.
    #[instrument(skip(self, request), fields(version = ?request.version))]
    pub fn setup(&self, name: &str, request: &LifecycleRequest) -> ShurikenResult<SetupOutcome> {
        validator::validate_package_name(name).map_err(ShurikenError::Domain)?;
        let explicit = request.explicit_version()?;

        let definition = self.catalog.get(name)?;
        let desired = explicit.unwrap_or_else(|| definition.version().clone());

        let existing = self.registry.get(name)?;
        if let Some(installed) = &existing {
            if installed.installed_version == desired {
                info!(version = %desired, "Already installed");
                return Ok(SetupOutcome::AlreadyInstalled { version: desired });
            }
        }

        let setup = definition
            .setup_command()
            .ok_or_else(|| ApplicationError::MissingSetupCommand {
                name: name.to_string(),
            })?;

        let mut options = request.options.clone();
        options.insert("version".into(), desired.to_string());
        self.commands.execute(&definition, setup, &options)?;

        let record = InstalledPackage::new(&definition.metadata, desired.clone(), (self.clock)());
        self.registry.upsert(record)?;

        let previous = existing.map(|p| p.installed_version);
        info!(version = %desired, previous = ?previous.as_ref().map(ToString::to_string), "Package installed");
        Ok(SetupOutcome::Installed {
            version: desired,
            previous,
        })
    }

    /// Migrate an installed package forward.
    ///
    /// A failed migration is reported in the result, not as an `Err`; the
    /// registry is only written when every step succeeded.
    #[instrument(skip(self, request), fields(version = ?request.version))]
    pub fn update(&self, name: &str, request: &LifecycleRequest) -> ShurikenResult<MigrationResult> {
        validator::validate_package_name(name).map_err(ShurikenError::Domain)?;
        let explicit = request.explicit_version()?;

        let installed = self
            .registry
            .get(name)?
            .ok_or_else(|| ApplicationError::NotInstalled {
                name: name.to_string(),
            })?;

        let definition = self.catalog.get(name)?;
        let target = explicit.unwrap_or_else(|| definition.version().clone());
        let from = installed.installed_version.clone();

        if target == from {
            info!(version = %from, "Already up to date");
            return Ok(MigrationResult::noop(from, target));
        }
        if target < from {
            warn!(installed = %from, requested = %target, "Downgrades are not supported; ignoring");
            return Ok(MigrationResult::noop(from, target));
        }

        let path = MigrationPath::resolve(&definition.migrations, &from, &target);
        info!(from = %from, to = %target, steps = path.len(), "Updating package");

        let report = self.executor.run(
            name,
            &path,
            &from,
            &target,
            &request.options,
            &self.workspace.context(),
        );

        let mut result = MigrationResult {
            success: report.succeeded(),
            from_version: from,
            to_version: target.clone(),
            completed_migrations: report.completed,
            error: report.failure,
            persisted: false,
        };

        if result.success {
            self.registry
                .upsert(installed.migrated_to(target, (self.clock)()))?;
            result.persisted = true;
            info!("Update complete");
        } else {
            warn!(
                completed = %result.completed_list(),
                "Update stopped; registry left unchanged"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;

    use super::*;
    use crate::application::plugin::{CommandDefinition, MigrationDefinition, PackageDefinition};
    use crate::application::ports::{
        MockFilesystem, MockPackageSource, MockPrompter, MockRegistryStore,
    };
    use crate::domain::{PackageMetadata, ProjectContext};
    use crate::error::ErrorCategory;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

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

    fn catalog_of(definition: PackageDefinition) -> Arc<PackageCatalog> {
        let mut source = MockPackageSource::new();
        let name = definition.name().to_string();
        source.expect_load().returning(move |n| {
            Ok((n == name).then(|| definition.clone()))
        });
        source.expect_locations().returning(|_| vec!["test".into()]);
        source.expect_label().return_const("test".to_string());
        Arc::new(PackageCatalog::new(vec![Box::new(source)]))
    }

    fn acme(version: &str, setup_calls: Arc<Mutex<u32>>) -> PackageDefinition {
        PackageDefinition::new(PackageMetadata::new("acme", v(version), "test package"))
            .with_command(CommandDefinition::from_fn("setup", "", move |opts, _| {
                assert!(opts.contains_key("version"));
                *setup_calls.lock().unwrap() += 1;
                Ok(())
            }))
            .with_migration(MigrationDefinition::from_fn(v("1.2.0"), "fails", |_, _| {
                Err("source file missing".into())
            }))
            .with_migration(MigrationDefinition::from_fn(v("1.1.0"), "ok", |_, _| Ok(())))
            .with_migration(MigrationDefinition::from_fn(v("1.3.0"), "later", |_, _| Ok(())))
    }

    fn record(version: &str) -> InstalledPackage {
        let meta = PackageMetadata::new("acme", v("1.0.0"), "test package");
        InstalledPackage::new(&meta, v(version), fixed_now())
    }

    fn service(definition: PackageDefinition, registry: MockRegistryStore) -> LifecycleService {
        LifecycleService::new(catalog_of(definition), Box::new(registry), workspace())
            .with_clock(fixed_now)
    }

    #[test]
    fn setup_installs_declared_version() {
        let calls = Arc::new(Mutex::new(0));
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(None));
        registry
            .expect_upsert()
            .withf(|p| p.installed_version == Version::new(1, 3, 0) && p.installed_at == fixed_now())
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(acme("1.3.0", Arc::clone(&calls)), registry)
            .setup("acme", &LifecycleRequest::new())
            .unwrap();

        assert_eq!(
            outcome,
            SetupOutcome::Installed {
                version: v("1.3.0"),
                previous: None
            }
        );
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn setup_at_installed_version_is_a_noop() {
        let calls = Arc::new(Mutex::new(0));
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(Some(record("1.0.0"))));
        registry.expect_upsert().times(0);

        let outcome = service(acme("1.3.0", Arc::clone(&calls)), registry)
            .setup("acme", &LifecycleRequest::new().version("1.0.0"))
            .unwrap();

        assert_eq!(outcome, SetupOutcome::AlreadyInstalled { version: v("1.0.0") });
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn setup_rejects_bad_version_before_lookup() {
        let mut registry = MockRegistryStore::new();
        registry.expect_get().times(0);
        registry.expect_upsert().times(0);

        let err = service(acme("1.0.0", Arc::default()), registry)
            .setup("acme", &LifecycleRequest::new().version("one"))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn setup_without_setup_command_fails() {
        let bare = PackageDefinition::new(PackageMetadata::new("acme", v("1.0.0"), ""));
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(None));
        registry.expect_upsert().times(0);

        let err = service(bare, registry)
            .setup("acme", &LifecycleRequest::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ShurikenError::Application(ApplicationError::MissingSetupCommand { .. })
        ));
    }

    #[test]
    fn update_unknown_package_is_not_installed_and_writes_nothing() {
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(None));
        registry.expect_upsert().times(0);

        let err = service(acme("1.3.0", Arc::default()), registry)
            .update("acme", &LifecycleRequest::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ShurikenError::Application(ApplicationError::NotInstalled { .. })
        ));
    }

    #[test]
    fn update_to_same_version_is_a_noop() {
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(Some(record("1.3.0"))));
        registry.expect_upsert().times(0);

        let result = service(acme("1.3.0", Arc::default()), registry)
            .update("acme", &LifecycleRequest::new())
            .unwrap();
        assert!(result.success);
        assert!(result.completed_migrations.is_empty());
        assert!(!result.persisted);
    }

    #[test]
    fn downgrade_is_ignored() {
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(Some(record("2.0.0"))));
        registry.expect_upsert().times(0);

        let result = service(acme("1.3.0", Arc::default()), registry)
            .update("acme", &LifecycleRequest::new().version("1.0.0"))
            .unwrap();
        assert!(result.success);
        assert!(result.is_downgrade());
        assert!(!result.persisted);
    }

    #[test]
    fn successful_update_persists_target() {
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(Some(record("1.0.0"))));
        registry
            .expect_upsert()
            .withf(|p| p.installed_version == Version::new(1, 1, 0))
            .times(1)
            .returning(|_| Ok(()));

        let result = service(acme("1.3.0", Arc::default()), registry)
            .update("acme", &LifecycleRequest::new().version("1.1.0"))
            .unwrap();
        assert!(result.success);
        assert!(result.persisted);
        assert_eq!(result.completed_migrations, vec![v("1.1.0")]);
    }

    #[test]
    fn partial_failure_keeps_registry_unchanged() {
        let mut registry = MockRegistryStore::new();
        registry.expect_get().returning(|_| Ok(Some(record("1.0.0"))));
        registry.expect_upsert().times(0);

        let result = service(acme("1.3.0", Arc::default()), registry)
            .update("acme", &LifecycleRequest::new())
            .unwrap();

        assert!(!result.success);
        assert!(!result.persisted);
        assert_eq!(result.completed_migrations, vec![v("1.1.0")]);
        let failure = result.error.unwrap();
        assert_eq!(failure.version, v("1.2.0"));
        assert!(failure.reason.contains("source file missing"));
    }
}
