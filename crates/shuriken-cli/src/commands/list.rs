//! Implementation of the `shuriken list` command.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{instrument, warn};

use shuriken_core::error::ShurikenError;

use crate::{
    app::{App, packages_dir},
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One line of `shuriken list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRow {
    pub name: String,
    pub version: Option<String>,
    pub description: String,
    pub commands: Vec<String>,
    pub installed_version: Option<String>,
    /// Why the definition could not be loaded, if it could not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[instrument(skip_all, fields(format = ?args.format))]
pub fn execute(args: ListArgs, app: &App, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let rows = collect(app)?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Packages:")?;
            if rows.is_empty() {
                output.print("  (none)")?;
            }
            for row in &rows {
                print_row(row, output)?;
            }
            output.print("")?;
            output.print(&format!(
                "Manifest packages are read from {}",
                packages_dir(config).display()
            ))?;
        }
        ListFormat::List => {
            for row in &rows {
                output.data(&row.name)?;
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).map_err(|e| {
                CliError::Core(ShurikenError::Internal {
                    message: format!("serialising package list: {e}"),
                })
            })?;
            output.data(&json)?;
        }
    }

    Ok(())
}

/// Catalog packages in catalog order, then installed packages no source provides.
fn collect(app: &App) -> CliResult<Vec<PackageRow>> {
    let registry = app.lifecycle.registry();
    let mut seen = BTreeSet::new();
    let mut rows = Vec::new();

    for name in app.catalog.list()? {
        let installed_version = registry.get(&name)?.map(|p| p.installed_version.to_string());
        let row = match app.catalog.get(&name) {
            Ok(def) => PackageRow {
                name: name.clone(),
                version: Some(def.version().to_string()),
                description: def.metadata.description.clone(),
                commands: def.commands.iter().map(|c| c.name.clone()).collect(),
                installed_version,
                error: None,
            },
            Err(e) => {
                warn!(package = %name, error = %e, "Package definition unusable");
                PackageRow {
                    name: name.clone(),
                    version: None,
                    description: String::new(),
                    commands: Vec::new(),
                    installed_version,
                    error: Some(e.to_string()),
                }
            }
        };
        seen.insert(name);
        rows.push(row);
    }

    for installed in registry.list()? {
        if seen.contains(&installed.name) {
            continue;
        }
        rows.push(PackageRow {
            name: installed.name.clone(),
            version: None,
            description: installed.description.clone(),
            commands: Vec::new(),
            installed_version: Some(installed.installed_version.to_string()),
            error: Some("no package source provides it".into()),
        });
    }

    Ok(rows)
}

fn print_row(row: &PackageRow, output: &OutputManager) -> CliResult<()> {
    let version = row.version.as_deref().unwrap_or("?");
    let installed = match &row.installed_version {
        Some(v) => format!("  [installed {v}]"),
        None => String::new(),
    };
    output.print(&format!("  {} {}{}", row.name, version, installed))?;
    if !row.description.is_empty() {
        output.print(&format!("      {}", row.description))?;
    }
    if !row.commands.is_empty() {
        output.print(&format!("      commands: {}", row.commands.join(", ")))?;
    }
    if let Some(error) = &row.error {
        output.warning(&format!("    {}: {}", row.name, error))?;
    }
    Ok(())
}
