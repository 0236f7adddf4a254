//! Declarative package manifests (`package.toml` / `package.json`).
//!
//! # `package.toml` format
//!
//! ```toml
//! [package]
//! name        = "acme"
//! version     = "1.2.0"
//! description = "Acme config files"
//!
//! [[commands]]
//! name = "setup"
//! [[commands.options]]
//! name    = "dir"
//! default = "config"
//! [[commands.files]]
//! path    = "{{dir}}/acme.json"
//! content = "{ \"version\": \"{{VERSION}}\" }"
//!
//! [[migrations]]
//! target_version = "1.1.0"
//! description    = "Move to the v2 schema"
//! [[migrations.files]]
//! path      = "config/acme.json"
//! source    = "files/acme-1.1.json"   # relative to the package directory
//! overwrite = true
//! ```
//!
//! `package.json` carries the same structure as JSON.

use std::fs;
use std::path::{Component, Path, PathBuf};

use semver::Version;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use shuriken_core::{
    application::{
        ActionError, CommandDefinition, CommandHandler, ExecutionContext, MigrationAction,
        MigrationDefinition, PackageDefinition,
    },
    domain::{
        CommandOption, CommandOptions, DomainError, DomainValidator, FileSet, MigrationOptions,
        PackageMetadata, RenderContext,
    },
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    package: Option<PackageSection>,
    #[serde(default)]
    commands: Vec<CommandSection>,
    #[serde(default)]
    migrations: Vec<MigrationSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
    version: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandSection {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    options: Vec<CommandOption>,
    #[serde(default)]
    files: Vec<FileAction>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MigrationSection {
    #[serde(alias = "targetVersion")]
    target_version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    files: Vec<FileAction>,
}

/// One file to write. Exactly one of `content` and `source` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileAction {
    path: String,
    content: Option<String>,
    source: Option<String>,
    #[serde(default = "default_overwrite")]
    overwrite: bool,
}

fn default_overwrite() -> bool {
    true
}

/// Manifest file syntax, chosen by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    pub fn for_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Failures while turning file actions into a file set at run time.
#[derive(Debug, Error)]
pub enum FileActionError {
    #[error("file path '{path}' leaves the project")]
    EscapesProject { path: PathBuf },

    #[error("cannot read source {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file '{path}' has no content")]
    NoContent { path: String },
}

fn invalid(name: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidPackage {
        name: name.to_string(),
        reason: reason.into(),
    }
}

impl Manifest {
    pub fn parse(name: &str, raw: &str, format: ManifestFormat) -> Result<Self, DomainError> {
        match format {
            ManifestFormat::Toml => toml::from_str(raw).map_err(|e| invalid(name, e.to_string())),
            ManifestFormat::Json => {
                serde_json::from_str(raw).map_err(|e| invalid(name, e.to_string()))
            }
        }
    }

    /// Read and parse the manifest at `path`.
    #[instrument(skip(name))]
    pub fn load(name: &str, path: &Path) -> Result<Self, DomainError> {
        let format = ManifestFormat::for_path(path)
            .ok_or_else(|| invalid(name, format!("unsupported manifest {}", path.display())))?;
        let raw = fs::read_to_string(path)
            .map_err(|e| invalid(name, format!("cannot read {}: {e}", path.display())))?;
        Self::parse(name, &raw, format)
    }

    /// Turn the manifest into a definition whose actions write files.
    ///
    /// `package_dir` anchors `source` paths.
    pub fn into_definition(
        self,
        expected_name: &str,
        package_dir: &Path,
    ) -> Result<PackageDefinition, DomainError> {
        let section = self
            .package
            .ok_or_else(|| invalid(expected_name, "missing [package] section"))?;
        if section.name != expected_name {
            return Err(invalid(
                expected_name,
                format!("manifest declares name '{}'", section.name),
            ));
        }
        let version = DomainValidator::parse_version(&section.version)
            .map_err(|e| invalid(expected_name, e.to_string()))?;

        let mut definition = PackageDefinition::new(PackageMetadata::new(
            section.name.clone(),
            version.clone(),
            section.description,
        ));

        for command in self.commands {
            let actions = FileActions::new(expected_name, package_dir, command.files)?;
            let handler = ManifestCommand {
                package: section.name.clone(),
                version: version.clone(),
                actions,
            };
            let mut def = CommandDefinition::new(command.name, command.description, handler);
            def.options = command.options;
            definition = definition.with_command(def);
        }

        for migration in self.migrations {
            let target = DomainValidator::parse_version(&migration.target_version)
                .map_err(|e| invalid(expected_name, e.to_string()))?;
            let actions = FileActions::new(expected_name, package_dir, migration.files)?;
            definition = definition.with_migration(MigrationDefinition::new(
                target,
                migration.description,
                ManifestMigration { actions },
            ));
        }

        debug!(
            package = expected_name,
            commands = definition.commands.len(),
            migrations = definition.migrations.len(),
            "Manifest converted"
        );
        Ok(definition)
    }
}

/// Validated file actions of one command or migration.
#[derive(Debug, Clone)]
struct FileActions {
    package_dir: PathBuf,
    files: Vec<FileAction>,
}

impl FileActions {
    fn new(name: &str, package_dir: &Path, files: Vec<FileAction>) -> Result<Self, DomainError> {
        for file in &files {
            match (&file.content, &file.source) {
                (Some(_), None) | (None, Some(_)) => {}
                _ => {
                    return Err(invalid(
                        name,
                        format!("file '{}' needs exactly one of content or source", file.path),
                    ));
                }
            }
        }
        Ok(Self {
            package_dir: package_dir.to_path_buf(),
            files,
        })
    }

    /// Render every action into a file set rooted at the deepest directory
    /// shared by all files.
    fn plan(&self, vars: &RenderContext) -> Result<Option<FileSet>, ActionError> {
        if self.files.is_empty() {
            return Ok(None);
        }

        let mut planned = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = PathBuf::from(vars.render(&file.path));
            if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
                return Err(FileActionError::EscapesProject { path }.into());
            }
            let content = match (&file.content, &file.source) {
                (Some(content), _) => vars.render(content),
                (None, Some(source)) => {
                    let source = self.package_dir.join(source);
                    let raw = fs::read_to_string(&source).map_err(|e| {
                        FileActionError::SourceUnreadable {
                            path: source.clone(),
                            source: e,
                        }
                    })?;
                    vars.render(&raw)
                }
                (None, None) => {
                    return Err(FileActionError::NoContent {
                        path: file.path.clone(),
                    }
                    .into());
                }
            };
            planned.push((path, content, file.overwrite));
        }

        let root = common_root(planned.iter().map(|(p, _, _)| p.as_path()));
        let mut set = FileSet::new(&root);
        for (path, content, overwrite) in planned {
            let relative = path.strip_prefix(&root).unwrap_or(&path).to_path_buf();
            if overwrite {
                set.add_file(relative, content);
            } else {
                set.add_file_if_missing(relative, content);
            }
        }
        Ok(Some(set))
    }

    fn run(&self, vars: &RenderContext, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
        if let Some(set) = self.plan(vars)? {
            ctx.write(&set)?;
        }
        Ok(())
    }
}

/// Deepest directory containing every path.
fn common_root<'a>(paths: impl Iterator<Item = &'a Path>) -> PathBuf {
    let mut root: Option<Vec<Component<'a>>> = None;
    for path in paths {
        let parent: Vec<_> = path.parent().map(|p| p.components().collect()).unwrap_or_default();
        root = Some(match root {
            None => parent,
            Some(current) => current
                .into_iter()
                .zip(parent)
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        });
    }
    root.unwrap_or_default().into_iter().collect()
}

struct ManifestCommand {
    package: String,
    version: Version,
    actions: FileActions,
}

impl CommandHandler for ManifestCommand {
    fn execute(
        &self,
        options: &CommandOptions,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), ActionError> {
        let version = options
            .get("version")
            .cloned()
            .unwrap_or_else(|| self.version.to_string());
        let vars = RenderContext::new()
            .with_variables(options)
            .with_variable("PACKAGE_NAME", self.package.as_str())
            .with_variable("VERSION", version);
        self.actions.run(&vars, ctx)
    }
}

struct ManifestMigration {
    actions: FileActions,
}

impl MigrationAction for ManifestMigration {
    fn apply(
        &self,
        options: &MigrationOptions,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), ActionError> {
        let target = options.target_version.to_string();
        let vars = RenderContext::new()
            .with_variables(&options.extra)
            .with_variable("PACKAGE_NAME", options.package_name.as_str())
            .with_variable("VERSION", target.as_str())
            .with_variable("TARGET_VERSION", target)
            .with_variable("FROM_VERSION", options.from_version.to_string())
            .with_variable("TO_VERSION", options.to_version.to_string());
        self.actions.run(&vars, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACME: &str = r#"
[package]
name = "acme"
version = "1.2.0"
description = "Acme config"

[[commands]]
name = "setup"
description = "Write the config"
[[commands.options]]
name = "dir"
default = "config"
[[commands.files]]
path = "{{dir}}/acme.json"
content = "{ \"version\": \"{{VERSION}}\" }"

[[migrations]]
target_version = "1.2.0"
description = "second"

[[migrations]]
target_version = "1.1.0"
description = "first"
[[migrations.files]]
path = "config/acme.json"
source = "files/acme-1.1.json"
"#;

    #[test]
    fn parses_commands_and_migrations() {
        let manifest = Manifest::parse("acme", ACME, ManifestFormat::Toml).unwrap();
        let def = manifest.into_definition("acme", Path::new("/pkgs/acme")).unwrap();

        assert_eq!(def.version(), &Version::new(1, 2, 0));
        let setup = def.setup_command().unwrap();
        assert_eq!(setup.options[0].default.as_deref(), Some("config"));
        assert_eq!(def.migrations.len(), 2);
    }

    #[test]
    fn json_manifest_is_equivalent() {
        let raw = r#"{
            "package": { "name": "acme", "version": "2.0.0" },
            "migrations": [ { "targetVersion": "2.0.0", "description": "big bang" } ]
        }"#;
        let def = Manifest::parse("acme", raw, ManifestFormat::Json)
            .unwrap()
            .into_definition("acme", Path::new("/pkgs/acme"))
            .unwrap();
        assert_eq!(def.migrations[0].target_version, Version::new(2, 0, 0));
        assert!(def.setup_command().is_none());
    }

    #[test]
    fn missing_package_section_is_invalid() {
        let err = Manifest::parse("acme", "[[commands]]\nname = \"setup\"\n", ManifestFormat::Toml)
            .unwrap()
            .into_definition("acme", Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("missing [package] section"));
    }

    #[test]
    fn bad_version_is_invalid() {
        let raw = "[package]\nname = \"acme\"\nversion = \"latest\"\n";
        let err = Manifest::parse("acme", raw, ManifestFormat::Toml)
            .unwrap()
            .into_definition("acme", Path::new("."))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPackage { .. }));
    }

    #[test]
    fn unknown_action_fields_are_rejected() {
        let raw = "[package]\nname = \"acme\"\nversion = \"1.0.0\"\n\
                   [[commands]]\nname = \"setup\"\n\
                   [[commands.files]]\npath = \"a\"\nshell = \"rm -rf /\"\n";
        assert!(Manifest::parse("acme", raw, ManifestFormat::Toml).is_err());
    }

    #[test]
    fn file_needs_exactly_one_body() {
        let raw = "[package]\nname = \"acme\"\nversion = \"1.0.0\"\n\
                   [[commands]]\nname = \"setup\"\n\
                   [[commands.files]]\npath = \"a\"\n";
        let err = Manifest::parse("acme", raw, ManifestFormat::Toml)
            .unwrap()
            .into_definition("acme", Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("exactly one of content or source"));
    }

    #[test]
    fn name_must_match_directory() {
        let err = Manifest::parse("other", ACME, ManifestFormat::Toml)
            .unwrap()
            .into_definition("other", Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("manifest declares name 'acme'"));
    }

    #[test]
    fn plan_roots_at_shared_directory() {
        let actions = FileActions {
            package_dir: PathBuf::from("."),
            files: vec![
                FileAction {
                    path: "config/{{NAME}}/a.json".into(),
                    content: Some("{{NAME}}".into()),
                    source: None,
                    overwrite: true,
                },
                FileAction {
                    path: "config/{{NAME}}/nested/b.json".into(),
                    content: Some("b".into()),
                    source: None,
                    overwrite: false,
                },
            ],
        };
        let set = actions
            .plan(&RenderContext::new().with_variable("NAME", "acme"))
            .unwrap()
            .unwrap();

        assert_eq!(set.root(), Path::new("config/acme"));
        let files: Vec<_> = set.files().collect();
        assert_eq!(files[0].path, PathBuf::from("a.json"));
        assert_eq!(files[0].content, "acme");
        assert_eq!(files[1].path, PathBuf::from("nested/b.json"));
        assert!(!files[1].overwrite);
    }

    #[test]
    fn plan_rejects_escaping_paths() {
        let actions = FileActions {
            package_dir: PathBuf::from("."),
            files: vec![FileAction {
                path: "../outside.txt".into(),
                content: Some(String::new()),
                source: None,
                overwrite: true,
            }],
        };
        let err = actions.plan(&RenderContext::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FileActionError>(),
            Some(FileActionError::EscapesProject { .. })
        ));
    }

    #[test]
    fn missing_source_fails_at_plan_time() {
        let actions = FileActions {
            package_dir: PathBuf::from("/no/such/package"),
            files: vec![FileAction {
                path: "config/acme.json".into(),
                content: None,
                source: Some("files/acme.json".into()),
                overwrite: true,
            }],
        };
        let err = actions.plan(&RenderContext::new()).unwrap_err();
        assert!(err.to_string().contains("cannot read source"));
    }

    #[test]
    fn common_root_of_siblings_and_top_level() {
        let paths = [Path::new("a/b/c.txt"), Path::new("a/d.txt")];
        assert_eq!(common_root(paths.into_iter()), PathBuf::from("a"));

        let paths = [Path::new("a/b.txt"), Path::new("c.txt")];
        assert_eq!(common_root(paths.into_iter()), PathBuf::new());
    }
}
