//! JSON file registry, `~/.shuriken/registry.json` by default.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, info, instrument, warn};

use shuriken_core::{
    application::{ApplicationError, ports::RegistryStore},
    domain::{InstalledPackage, Registry, RegistryDocument},
    error::{Context as _, ShurikenError, ShurikenResult},
};

use crate::filesystem::map_io_error;

/// Registry persisted as one pretty-printed JSON document.
///
/// The whole file is read when the store is opened and rewritten after every
/// mutation. Assumes a single writer; there is no file locking.
#[derive(Debug)]
pub struct JsonRegistryStore {
    path: PathBuf,
    state: RwLock<Registry>,
}

impl JsonRegistryStore {
    /// Open the registry at `path`, creating an empty one if absent.
    ///
    /// # Errors
    ///
    /// `RegistryCorrupt` if the file exists but is not a registry document.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> ShurikenResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!("No registry yet, creating an empty one");
            let store = Self::empty(path);
            store.persist(&Registry::new())?;
            return Ok(store);
        }

        let raw = fs::read(&path).map_err(|e| map_io_error(&path, e, "read registry"))?;
        // Invalid UTF-8 surfaces as a JSON error, so it degrades like any other corruption.
        let document: RegistryDocument =
            serde_json::from_slice(&raw).map_err(|e| ApplicationError::RegistryCorrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        let registry = Registry::from(document);
        debug!(packages = registry.len(), "Registry loaded");

        Ok(Self {
            path,
            state: RwLock::new(registry),
        })
    }

    /// Like [`Self::open`], but a corrupt file degrades to an empty registry.
    ///
    /// The file itself is left alone until the next mutation overwrites it.
    pub fn open_or_empty(path: impl AsRef<Path>) -> ShurikenResult<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Err(ShurikenError::Application(ApplicationError::RegistryCorrupt { reason, .. })) => {
                warn!(
                    path = %path.display(),
                    error = %reason,
                    "Registry is unreadable; continuing with an empty registry"
                );
                Ok(Self::empty(path.to_path_buf()))
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(Registry::new()),
        }
    }

    fn persist(&self, registry: &Registry) -> ShurikenResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| map_io_error(parent, e, "create registry directory"))?;
            }
        }

        let mut json = serde_json::to_string_pretty(&registry.to_document())
            .context("serialising registry")?;
        json.push('\n');

        fs::write(&self.path, json).map_err(|e| map_io_error(&self.path, e, "write registry"))?;
        debug!(path = %self.path.display(), packages = registry.len(), "Registry saved");
        Ok(())
    }
}

impl RegistryStore for JsonRegistryStore {
    fn get(&self, name: &str) -> ShurikenResult<Option<InstalledPackage>> {
        let state = self
            .state
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(state.get(name).cloned())
    }

    fn upsert(&self, package: InstalledPackage) -> ShurikenResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let mut next = state.clone();
        next.upsert(package);
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    fn list(&self) -> ShurikenResult<Vec<InstalledPackage>> {
        let state = self
            .state
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(state.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use semver::Version;
    use shuriken_core::domain::PackageMetadata;
    use tempfile::TempDir;

    use super::*;

    fn package(name: &str, version: &str) -> InstalledPackage {
        let v = Version::parse(version).unwrap();
        let meta = PackageMetadata::new(name, v.clone(), "Component generator");
        InstalledPackage::new(&meta, v, Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap())
    }

    #[test]
    fn absent_file_is_created_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".shuriken/registry.json");

        let store = JsonRegistryStore::open(&path).unwrap();

        assert!(store.list().unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"installedPackages\": []\n}\n"
        );
    }

    #[test]
    fn upsert_round_trips_field_for_field() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.json");

        let store = JsonRegistryStore::open(&path).unwrap();
        store.upsert(package("jarvis", "1.0.0")).unwrap();

        let reopened = JsonRegistryStore::open(&path).unwrap();
        assert_eq!(reopened.get("jarvis").unwrap(), Some(package("jarvis", "1.0.0")));
    }

    #[test]
    fn file_is_sorted_and_ends_with_newline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.json");

        let store = JsonRegistryStore::open(&path).unwrap();
        store.upsert(package("zeta", "1.0.0")).unwrap();
        store.upsert(package("alpha", "2.0.0")).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with("}\n"));
        assert!(raw.find("\"alpha\"").unwrap() < raw.find("\"zeta\"").unwrap());
        assert!(raw.contains("\"installedAt\": \"2026-10-18T12:00:00Z\""));
    }

    #[test]
    fn corrupt_file_is_an_error_for_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonRegistryStore::open(&path).unwrap_err();
        assert!(matches!(
            err,
            ShurikenError::Application(ApplicationError::RegistryCorrupt { .. })
        ));
    }

    #[test]
    fn corrupt_file_degrades_and_is_overwritten_on_write() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonRegistryStore::open_or_empty(&path).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2, 3]");

        store.upsert(package("jarvis", "1.0.0")).unwrap();
        let reopened = JsonRegistryStore::open(&path).unwrap();
        assert_eq!(reopened.list().unwrap().len(), 1);
    }

    #[test]
    fn non_utf8_file_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.json");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        assert!(matches!(
            JsonRegistryStore::open(&path).unwrap_err(),
            ShurikenError::Application(ApplicationError::RegistryCorrupt { .. })
        ));

        let store = JsonRegistryStore::open_or_empty(&path).unwrap();
        assert!(store.list().unwrap().is_empty());
        store.upsert(package("jarvis", "1.0.0")).unwrap();
        assert_eq!(JsonRegistryStore::open(&path).unwrap().list().unwrap().len(), 1);
    }

    #[test]
    fn legacy_fields_are_tolerated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.json");
        fs::write(&path, "{}").unwrap();

        let store = JsonRegistryStore::open(&path).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
