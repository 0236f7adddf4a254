//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "shuriken",
    bin_name = "shuriken",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Package setup, migrations and generators for your project",
    long_about = "shuriken installs packages of generator commands into a project, \
                  records them in a registry and migrates them between versions.",
    after_help = "EXAMPLES:\n\
        \x20 shuriken setup jarvis\n\
        \x20 shuriken run jarvis component -o name=Button -o use=src/components\n\
        \x20 shuriken update jarvis --version 1.1.0\n\
        \x20 shuriken list --format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install a package into the current project.
    #[command(
        visible_alias = "add",
        about = "Install a package",
        after_help = "EXAMPLES:\n\
            \x20 shuriken setup jarvis\n\
            \x20 shuriken setup jarvis -o dir=app/components\n\
            \x20 shuriken setup acme --pkg-version 1.0.0"
    )]
    Setup(SetupArgs),

    /// Migrate an installed package to a newer version.
    #[command(
        visible_alias = "up",
        about = "Update an installed package",
        after_help = "EXAMPLES:\n\
            \x20 shuriken update acme\n\
            \x20 shuriken update acme --version 1.2.0"
    )]
    Update(UpdateArgs),

    /// Run one of a package's commands.
    #[command(
        about = "Run a package command",
        after_help = "EXAMPLES:\n\
            \x20 shuriken run jarvis component\n\
            \x20 shuriken run jarvis component -o name=NavBar -o use=src/layout -o format=ts"
    )]
    Run(RunArgs),

    /// List available packages.
    #[command(
        visible_alias = "ls",
        about = "List available packages",
        after_help = "EXAMPLES:\n\
            \x20 shuriken list\n\
            \x20 shuriken list --format json"
    )]
    List(ListArgs),

    /// Initialise a shuriken configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 shuriken init           # user config directory\n\
            \x20 shuriken init --local   # .shuriken.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 shuriken completions bash > ~/.local/share/bash-completion/completions/shuriken\n\
            \x20 shuriken completions zsh  > ~/.zfunc/_shuriken\n\
            \x20 shuriken completions fish > ~/.config/fish/completions/shuriken.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the shuriken configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 shuriken config get registry.path\n\
            \x20 shuriken config list\n\
            \x20 shuriken config path"
    )]
    Config(ConfigCommands),
}

// ── setup ─────────────────────────────────────────────────────────────────────

/// Arguments for `shuriken setup`.
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Package to install.
    #[arg(value_name = "PACKAGE", help = "Package name")]
    pub package: String,

    /// Install this version instead of the package's own.
    #[arg(
        long = "pkg-version",
        value_name = "VERSION",
        help = "Version to record (default: the package version)"
    )]
    pub pkg_version: Option<String>,

    /// Options passed to the setup command.
    #[arg(
        short = 'o',
        long = "option",
        value_name = "KEY=VALUE",
        help = "Option for the setup command (repeatable)"
    )]
    pub options: Vec<String>,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `shuriken update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Installed package to migrate.
    #[arg(value_name = "PACKAGE", help = "Package name")]
    pub package: String,

    /// Stop at this version instead of the latest.
    #[arg(
        long = "version",
        value_name = "VERSION",
        help = "Target version (default: the package version)"
    )]
    pub target_version: Option<String>,

    /// Options passed to every migration.
    #[arg(
        short = 'o',
        long = "option",
        value_name = "KEY=VALUE",
        help = "Option for the migrations (repeatable)"
    )]
    pub options: Vec<String>,
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `shuriken run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Package providing the command.
    #[arg(value_name = "PACKAGE", help = "Package name")]
    pub package: String,

    /// Command to run.
    #[arg(value_name = "COMMAND", help = "Command name")]
    pub command: String,

    /// Options passed to the command.
    #[arg(
        short = 'o',
        long = "option",
        value_name = "KEY=VALUE",
        help = "Command option (repeatable)"
    )]
    pub options: Vec<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `shuriken list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `shuriken init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.shuriken.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `shuriken completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `shuriken config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
