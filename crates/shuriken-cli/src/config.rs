//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables: `SHURIKEN_REGISTRY__PATH`, `SHURIKEN_OUTPUT__NO_COLOR`, ...
//! 2. `--config <FILE>` (must exist)
//! 3. `.shuriken.toml` in the current directory
//! 4. The user config file (see [`AppConfig::config_path`])
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name of the per-project configuration.
pub const LOCAL_CONFIG_FILE: &str = ".shuriken.toml";

const ENV_PREFIX: &str = "SHURIKEN";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where installed packages are recorded.
    pub registry: RegistryConfig,
    /// Where manifest packages are discovered.
    pub packages: PackagesConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Source directory: one sub-directory per package.
    pub path: PathBuf,
    /// Pre-built directory, preferred over `path` when it exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: shuriken_home().join("registry.json"),
        }
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            path: shuriken_home().join("packages"),
            dist_path: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            packages: PackagesConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// `~/.shuriken`, or `.shuriken` when no home directory is known.
pub fn shuriken_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".shuriken"))
        .unwrap_or_else(|| PathBuf::from(".shuriken"))
}

impl AppConfig {
    /// Load configuration from every source, in the order listed above.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path(), Path::new(LOCAL_CONFIG_FILE), config_file)
    }

    fn load_from(
        user_file: &Path,
        local_file: &Path,
        explicit: Option<&PathBuf>,
    ) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;

        let mut builder = Config::builder()
            .add_source(defaults)
            .add_source(File::from(user_file).format(FileFormat::Toml).required(false))
            .add_source(File::from(local_file).format(FileFormat::Toml).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.shuriken.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "shuriken", "shuriken")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Value of a dotted key, for `shuriken config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let show = |p: &Path| p.display().to_string();
        match key {
            "registry.path" => Some(show(&self.registry.path)),
            "packages.path" => Some(show(&self.packages.path)),
            "packages.dist_path" => Some(self.packages.dist_path.as_deref().map(show).unwrap_or_default()),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "logging.file" => Some(self.logging.file.as_deref().map(show).unwrap_or_default()),
            _ => None,
        }
    }

    /// Every key [`Self::get`] understands.
    pub const KEYS: &'static [&'static str] = &[
        "registry.path",
        "packages.path",
        "packages.dist_path",
        "output.no_color",
        "logging.file",
    ];
}
