//! Manifest packages on disk.
//!
//! # Directory layout expected
//!
//! ```text
//! packages/                 ← source directory
//! ├── acme/
//! │   ├── package.toml      ← manifest (or package.json)
//! │   └── files/
//! │       └── acme-1.1.json ← referenced by `source = "..."`
//! └── forms/
//!     └── package.json
//! dist/                     ← pre-built directory, wins when present
//! └── acme/
//!     └── package.toml
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use shuriken_core::{
    application::{PackageDefinition, ports::PackageSource},
    error::{ShurikenError, ShurikenResult},
};

use super::manifest::Manifest;

const DIST_ENTRIES: &[&str] = &["package.toml"];
const SOURCE_ENTRIES: &[&str] = &["package.toml", "package.json"];

/// Packages described by manifests under a source directory, optionally
/// shadowed by a pre-built directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    packages_dir: PathBuf,
    dist_dir: Option<PathBuf>,
}

impl DirectorySource {
    pub fn new(packages_dir: impl Into<PathBuf>) -> Self {
        Self {
            packages_dir: packages_dir.into(),
            dist_dir: None,
        }
    }

    pub fn with_dist(mut self, dist_dir: impl Into<PathBuf>) -> Self {
        self.dist_dir = Some(dist_dir.into());
        self
    }

    /// Entry files for `name`, highest priority first.
    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(3);
        if let Some(dist) = &self.dist_dir {
            out.extend(DIST_ENTRIES.iter().map(|entry| dist.join(name).join(entry)));
        }
        out.extend(
            SOURCE_ENTRIES
                .iter()
                .map(|entry| self.packages_dir.join(name).join(entry)),
        );
        out
    }

    /// Entry file `name` would load from, if any.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.candidates(name).into_iter().find(|p| p.is_file())
    }

    /// The directory `list` reads: dist if it exists, else the source dir.
    fn listing_root(&self) -> (&Path, &'static [&'static str]) {
        match &self.dist_dir {
            Some(dist) if dist.is_dir() => (dist.as_path(), DIST_ENTRIES),
            _ => (self.packages_dir.as_path(), SOURCE_ENTRIES),
        }
    }
}

impl PackageSource for DirectorySource {
    fn label(&self) -> String {
        match &self.dist_dir {
            Some(dist) => format!("{} over {}", dist.display(), self.packages_dir.display()),
            None => self.packages_dir.display().to_string(),
        }
    }

    #[instrument(skip(self), fields(dir = %self.listing_root().0.display()))]
    fn list(&self) -> ShurikenResult<Vec<String>> {
        let (root, entries) = self.listing_root();
        if !root.is_dir() {
            debug!("Package directory absent");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let has_entry = entries.iter().any(|file| entry.path().join(file).is_file());
            if !has_entry {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn load(&self, name: &str) -> ShurikenResult<Option<PackageDefinition>> {
        let Some(entry) = self.locate(name) else {
            return Ok(None);
        };
        let package_dir = entry.parent().unwrap_or(&self.packages_dir).to_path_buf();
        debug!(dir = %package_dir.display(), entry = %entry.display(), "Loading manifest");

        let definition = Manifest::load(name, &entry)
            .and_then(|m| m.into_definition(name, &package_dir))
            .map_err(ShurikenError::Domain)?;
        Ok(Some(definition))
    }

    fn locations(&self, name: &str) -> Vec<String> {
        self.candidates(name)
            .iter()
            .map(|p| p.display().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = "[package]\nname = \"acme\"\nversion = \"1.0.0\"\n";

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn lists_only_directories_with_an_entry_file() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("packages");
        write(&packages.join("zeta/package.json"), "{}");
        write(&packages.join("acme/package.toml"), MANIFEST);
        write(&packages.join("notes/README.md"), "");
        write(&packages.join("stray.toml"), "");

        let source = DirectorySource::new(&packages);
        assert_eq!(source.list().unwrap(), ["acme", "zeta"]);
    }

    #[test]
    fn existing_dist_replaces_the_listing() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("packages");
        let dist = temp.path().join("dist");
        write(&packages.join("acme/package.toml"), MANIFEST);
        write(&packages.join("forms/package.toml"), "");
        write(&dist.join("acme/package.toml"), MANIFEST);

        let source = DirectorySource::new(&packages).with_dist(&dist);
        assert_eq!(source.list().unwrap(), ["acme"]);
    }

    #[test]
    fn missing_directories_list_nothing() {
        let source = DirectorySource::new("/no/such/packages").with_dist("/no/such/dist");
        assert!(source.list().unwrap().is_empty());
    }

    #[test]
    fn dist_manifest_wins_over_source() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("packages");
        let dist = temp.path().join("dist");
        write(&packages.join("acme/package.toml"), MANIFEST);
        write(
            &dist.join("acme/package.toml"),
            "[package]\nname = \"acme\"\nversion = \"2.0.0\"\n",
        );

        let def = DirectorySource::new(&packages)
            .with_dist(&dist)
            .load("acme")
            .unwrap()
            .unwrap();
        assert_eq!(def.version().to_string(), "2.0.0");
    }

    #[test]
    fn locate_reports_the_directory_actually_used() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("packages");
        let dist = temp.path().join("dist");
        write(&packages.join("acme/package.toml"), MANIFEST);
        write(&packages.join("forms/package.json"), "{}");
        write(&dist.join("acme/package.toml"), MANIFEST);

        let source = DirectorySource::new(&packages).with_dist(&dist);
        assert_eq!(source.locate("acme"), Some(dist.join("acme/package.toml")));
        assert_eq!(source.locate("forms"), Some(packages.join("forms/package.json")));
        assert_eq!(source.locate("ghost"), None);

        let label = source.label();
        assert!(label.contains(&dist.display().to_string()));
        assert!(label.contains(&packages.display().to_string()));
    }

    #[test]
    fn toml_beats_json_in_the_source_dir() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("packages");
        write(&packages.join("acme/package.toml"), MANIFEST);
        write(
            &packages.join("acme/package.json"),
            r#"{ "package": { "name": "acme", "version": "9.9.9" } }"#,
        );

        let def = DirectorySource::new(&packages).load("acme").unwrap().unwrap();
        assert_eq!(def.version().to_string(), "1.0.0");
    }

    #[test]
    fn unknown_package_is_none_with_locations() {
        let source = DirectorySource::new("/pkgs").with_dist("/dist");
        assert!(source.load("ghost").unwrap().is_none());

        let locations = source.locations("ghost");
        assert_eq!(locations.len(), 3);
        assert!(locations[0].ends_with("package.toml"));
        assert!(locations[0].contains("dist"));
        assert!(locations[2].ends_with("package.json"));
    }

    #[test]
    fn malformed_manifest_is_invalid_package() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("packages");
        write(&packages.join("acme/package.toml"), "version = \"1.0.0\"\n");

        let err = DirectorySource::new(&packages).load("acme").unwrap_err();
        assert!(err.to_string().contains("Invalid package 'acme'"));
    }
}
