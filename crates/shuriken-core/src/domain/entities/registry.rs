//! The set of installed packages, keyed by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::package::InstalledPackage;

/// Installed packages, at most one entry per name.
///
/// Backed by a `BTreeMap` so serialised output is sorted by name and two
/// saves of the same registry are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    packages: BTreeMap<String, InstalledPackage>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&InstalledPackage> {
        self.packages.get(name)
    }

    /// Insert or replace the entry for `package.name`, returning the old one.
    pub fn upsert(&mut self, package: InstalledPackage) -> Option<InstalledPackage> {
        self.packages.insert(package.name.clone(), package)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstalledPackage> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn to_document(&self) -> RegistryDocument {
        RegistryDocument {
            installed_packages: self.packages.values().cloned().collect(),
        }
    }
}

/// On-disk shape of the registry file.
///
/// ```json
/// { "installedPackages": [ { "name": "...", "installedVersion": "..." } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDocument {
    #[serde(default)]
    pub installed_packages: Vec<InstalledPackage>,
}

impl From<RegistryDocument> for Registry {
    /// Later duplicates replace earlier ones.
    fn from(document: RegistryDocument) -> Self {
        let mut registry = Registry::new();
        for package in document.installed_packages {
            registry.upsert(package);
        }
        registry
    }
}
