//! End-to-end lifecycle runs against the real adapters.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use semver::Version;
use tempfile::TempDir;

use shuriken_adapters::{
    BuiltinSource, DirectorySource, JsonRegistryStore, LocalFilesystem, MemoryRegistryStore,
    ScriptedPrompter,
};
use shuriken_core::{
    application::{
        ApplicationError, LifecycleRequest, LifecycleService, PackageCatalog, SetupOutcome,
        Workspace,
        ports::{PackageSource, RegistryStore},
    },
    domain::{InstalledPackage, PackageMetadata},
    error::ShurikenError,
};

const ACME: &str = r#"
[package]
name = "acme"
version = "1.3.0"
description = "Acme config"

[[commands]]
name = "setup"
description = "Write the config"
[[commands.files]]
path = "config/acme.json"
content = "{ \"version\": \"{{VERSION}}\" }"

[[migrations]]
target_version = "1.3.0"
description = "third"
[[migrations.files]]
path = "config/acme-1.3.txt"
content = "{{TARGET_VERSION}}"

[[migrations]]
target_version = "1.2.0"
description = "second"
[[migrations.files]]
path = "config/acme-1.2.txt"
source = "files/acme-1.2.txt"

[[migrations]]
target_version = "1.1.0"
description = "first"
[[migrations.files]]
path = "config/acme.json"
content = "{ \"version\": \"{{TARGET_VERSION}}\", \"from\": \"{{FROM_VERSION}}\" }"
"#;

struct Fixture {
    _temp: TempDir,
    project: PathBuf,
    packages: PathBuf,
    registry: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let packages = temp.path().join("packages");
        let registry = temp.path().join("home/.shuriken/registry.json");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(packages.join("acme")).unwrap();
        fs::write(packages.join("acme/package.toml"), ACME).unwrap();
        Self {
            _temp: temp,
            project,
            packages,
            registry,
        }
    }

    fn with_source_file(self) -> Self {
        let path = self.packages.join("acme/files/acme-1.2.txt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "schema {{TARGET_VERSION}}").unwrap();
        self
    }

    fn service(&self) -> LifecycleService {
        let registry = JsonRegistryStore::open_or_empty(&self.registry).unwrap();
        self.service_with(Box::new(registry))
    }

    fn service_with(&self, registry: Box<dyn RegistryStore>) -> LifecycleService {
        let sources: Vec<Box<dyn PackageSource>> = vec![
            Box::new(BuiltinSource::with_defaults()),
            Box::new(DirectorySource::new(&self.packages)),
        ];
        let catalog = Arc::new(PackageCatalog::new(sources));
        let workspace = Arc::new(Workspace::open(
            &self.project,
            Box::new(LocalFilesystem::new()),
            Box::new(ScriptedPrompter::new()),
        ));
        LifecycleService::new(catalog, registry, workspace)
    }

    fn installed_version(&self, name: &str) -> Option<Version> {
        JsonRegistryStore::open(&self.registry)
            .unwrap()
            .get(name)
            .unwrap()
            .map(|p| p.installed_version)
    }

    fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.project.join(relative)).unwrap()
    }
}

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn setup_twice_leaves_registry_byte_identical() {
    let fx = Fixture::new();
    let service = fx.service();
    let request = LifecycleRequest::new();

    let first = service.setup("acme", &request).unwrap();
    assert_eq!(
        first,
        SetupOutcome::Installed {
            version: v("1.3.0"),
            previous: None
        }
    );
    let before = fs::read(&fx.registry).unwrap();

    let second = fx.service().setup("acme", &request).unwrap();
    assert_eq!(
        second,
        SetupOutcome::AlreadyInstalled {
            version: v("1.3.0")
        }
    );
    assert_eq!(fs::read(&fx.registry).unwrap(), before);
    assert_eq!(fx.read("config/acme.json"), "{ \"version\": \"1.3.0\" }");
}

#[test]
fn failed_step_keeps_registry_at_previous_version() {
    let fx = Fixture::new();
    let service = fx.service();
    service
        .setup("acme", &LifecycleRequest::new().version("1.0.0"))
        .unwrap();

    let result = service.update("acme", &LifecycleRequest::new()).unwrap();

    assert!(!result.success);
    assert!(!result.persisted);
    assert_eq!(result.completed_migrations, vec![v("1.1.0")]);
    let failure = result.error.unwrap();
    assert_eq!(failure.version, v("1.2.0"));
    assert!(failure.reason.contains("acme-1.2.txt"));

    assert_eq!(fx.installed_version("acme"), Some(v("1.0.0")));
    assert!(fx.read("config/acme.json").contains("\"from\": \"1.0.0\""));
    assert!(!fx.project.join("config/acme-1.3.txt").exists());
}

#[test]
fn rerun_after_fix_recomputes_from_stored_version() {
    let fx = Fixture::new();
    fx.service()
        .setup("acme", &LifecycleRequest::new().version("1.0.0"))
        .unwrap();
    assert!(!fx.service().update("acme", &LifecycleRequest::new()).unwrap().success);

    let fx = fx.with_source_file();
    let result = fx.service().update("acme", &LifecycleRequest::new()).unwrap();

    assert!(result.success);
    assert!(result.persisted);
    assert_eq!(
        result.completed_migrations,
        vec![v("1.1.0"), v("1.2.0"), v("1.3.0")]
    );
    assert_eq!(fx.installed_version("acme"), Some(v("1.3.0")));
    assert_eq!(fx.read("config/acme-1.2.txt"), "schema 1.2.0");
    assert_eq!(fx.read("config/acme-1.3.txt"), "1.3.0");
}

#[test]
fn explicit_target_stops_midway() {
    let fx = Fixture::new().with_source_file();
    let service = fx.service();
    service
        .setup("acme", &LifecycleRequest::new().version("1.0.0"))
        .unwrap();

    let result = service
        .update("acme", &LifecycleRequest::new().version("1.2.0"))
        .unwrap();

    assert!(result.success);
    assert_eq!(result.completed_migrations, vec![v("1.1.0"), v("1.2.0")]);
    assert_eq!(fx.installed_version("acme"), Some(v("1.2.0")));
    assert!(!fx.project.join("config/acme-1.3.txt").exists());
}

#[test]
fn update_of_unknown_package_writes_nothing() {
    let fx = Fixture::new();
    let registry = MemoryRegistryStore::new();
    let service = fx.service_with(Box::new(registry.clone()));

    let err = service
        .update("ghost", &LifecycleRequest::new())
        .unwrap_err();

    assert!(matches!(
        err,
        ShurikenError::Application(ApplicationError::NotInstalled { .. })
    ));
    assert_eq!(registry.write_count(), 0);
}

#[test]
fn update_from_seeded_install_applies_only_later_steps() {
    let fx = Fixture::new();
    let metadata = PackageMetadata::new("acme", v("1.3.0"), "Acme config");
    let registry = MemoryRegistryStore::new().with_package(InstalledPackage::new(
        &metadata,
        v("1.2.0"),
        chrono::Utc::now(),
    ));
    let service = fx.service_with(Box::new(registry.clone()));

    let result = service.update("acme", &LifecycleRequest::new()).unwrap();

    assert!(result.success);
    assert_eq!(result.completed_migrations, vec![v("1.3.0")]);
    assert_eq!(registry.write_count(), 1);
    assert_eq!(
        registry.get("acme").unwrap().map(|p| p.installed_version),
        Some(v("1.3.0"))
    );
    assert_eq!(fx.read("config/acme-1.3.txt"), "1.3.0");
}

#[test]
fn corrupt_registry_degrades_and_is_rewritten() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.registry.parent().unwrap()).unwrap();
    fs::write(&fx.registry, "not json").unwrap();

    fx.service().setup("acme", &LifecycleRequest::new()).unwrap();

    assert_eq!(fx.installed_version("acme"), Some(v("1.3.0")));
}

#[test]
fn jarvis_setup_creates_components_directory() {
    let fx = Fixture::new();
    let outcome = fx.service().setup("jarvis", &LifecycleRequest::new()).unwrap();

    assert!(matches!(outcome, SetupOutcome::Installed { .. }));
    assert!(fx.project.join("src/components").is_dir());
    assert_eq!(fx.installed_version("jarvis"), Some(v("1.0.0")));
}
