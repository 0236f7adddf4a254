//! `jarvis`: React component generator.
//!
//! Commands:
//! - `setup`: make sure the components directory exists
//! - `component`: generate a component directory from templates

mod templates;

use std::path::{Path, PathBuf};

use heck::ToKebabCase;
use semver::Version;
use tracing::{debug, info};

use shuriken_core::{
    application::{ActionError, CommandDefinition, CommandHandler, ExecutionContext, PackageDefinition},
    domain::{CommandOption, CommandOptions, FileSet, PackageMetadata, RenderContext},
};

pub const NAME: &str = "jarvis";
pub const DEFAULT_COMPONENTS_DIR: &str = "src/components";

pub fn definition() -> PackageDefinition {
    PackageDefinition::new(PackageMetadata::new(
        NAME,
        Version::new(1, 0, 0),
        "Generates React component templates on demand",
    ))
    .with_command(
        CommandDefinition::new("setup", "Prepare the components directory", Setup).with_option(
            CommandOption::new("dir", "Where components live").with_default(DEFAULT_COMPONENTS_DIR),
        ),
    )
    .with_command(
        CommandDefinition::new("component", "Generate a new React component", Component)
            .with_option(CommandOption::new("name", "Component name; prompted when absent"))
            .with_option(CommandOption::new(
                "use",
                "Base directory for the component; prompted when absent",
            ))
            .with_option(CommandOption::new(
                "format",
                "ts or js; follows tsconfig.json when absent",
            ))
            .with_option(CommandOption::new(
                "storybook",
                "true or false; follows the project's Storybook setup when absent",
            )),
    )
}

struct Setup;

impl CommandHandler for Setup {
    fn execute(
        &self,
        options: &CommandOptions,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), ActionError> {
        let dir = options
            .get("dir")
            .map(String::as_str)
            .unwrap_or(DEFAULT_COMPONENTS_DIR);
        let path = ctx.root.join(dir);

        if ctx.filesystem.exists(&path) {
            debug!(path = %path.display(), "Components directory already present");
        } else {
            ctx.filesystem.create_dir_all(&path)?;
            info!(path = %path.display(), "Created components directory");
        }
        Ok(())
    }
}

struct Component;

/// Which files a component gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flavor {
    typescript: bool,
    stories: bool,
    types: bool,
    tests: bool,
}

impl Flavor {
    fn resolve(options: &CommandOptions, ctx: &ExecutionContext<'_>) -> Result<Self, ActionError> {
        let typescript = match options.get("format").map(String::as_str) {
            None => ctx.project.is_typescript,
            Some("ts") => true,
            Some("js") => false,
            Some(other) => return Err(format!("unknown format '{other}', expected ts or js").into()),
        };
        let stories = match options.get("storybook").map(String::as_str) {
            None => ctx.project.has_storybook,
            Some(value) => value == "true",
        };
        Ok(Self {
            typescript,
            stories,
            types: typescript,
            tests: ctx.project.has_unit_tests,
        })
    }
}

impl Component {
    fn name(options: &CommandOptions, ctx: &ExecutionContext<'_>) -> Result<String, ActionError> {
        let raw = match options.get("name") {
            Some(name) => name.clone(),
            None => ctx
                .prompter
                .input("What shall we name your new component?", None)?,
        };
        let name = raw.trim().to_string();
        if name.is_empty() || name.to_kebab_case().is_empty() {
            return Err("component name cannot be empty".into());
        }
        Ok(name)
    }

    fn base_dir(options: &CommandOptions, ctx: &ExecutionContext<'_>) -> Result<PathBuf, ActionError> {
        if let Some(dir) = options.get("use") {
            return Ok(PathBuf::from(dir));
        }
        let here = ctx.prompter.confirm(
            &format!(
                "Create this component in the current directory ({})?",
                ctx.root.display()
            ),
            true,
        )?;
        if here {
            return Ok(PathBuf::new());
        }
        let dir = ctx.prompter.input(
            "Folder where this component should live",
            Some(DEFAULT_COMPONENTS_DIR.to_string()),
        )?;
        Ok(PathBuf::from(dir.trim()))
    }
}

/// Plan the files for component `name` under `base`.
fn component_files(name: &str, base: &Path, flavor: Flavor) -> FileSet {
    let vars = RenderContext::for_name(name);
    let kebab = name.to_kebab_case();
    let (jsx, js) = if flavor.typescript {
        ("tsx", "ts")
    } else {
        ("jsx", "js")
    };

    let mut set = FileSet::new(base.join(&kebab));
    let component = if flavor.typescript {
        templates::COMPONENT_TS
    } else {
        templates::COMPONENT_JS
    };
    set.add_file(format!("{kebab}.{jsx}"), vars.render(component));

    let index = if flavor.typescript {
        templates::INDEX_TS
    } else {
        templates::INDEX_JS
    };
    set.add_file(format!("index.{js}"), vars.render(index));

    if flavor.stories {
        set.add_file(format!("{kebab}.stories.{jsx}"), vars.render(templates::STORIES));
    }
    if flavor.types {
        set.add_file(format!("{kebab}.types.ts"), vars.render(templates::TYPES));
    }
    if flavor.tests {
        set.add_file(format!("{kebab}.test.{jsx}"), vars.render(templates::TEST));
    }
    set
}

impl CommandHandler for Component {
    fn execute(
        &self,
        options: &CommandOptions,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), ActionError> {
        let flavor = Flavor::resolve(options, ctx)?;
        let name = Self::name(options, ctx)?;
        let base = Self::base_dir(options, ctx)?;

        let set = component_files(&name, &base, flavor);
        let target = ctx.root.join(set.root());
        if ctx.filesystem.exists(&target) {
            return Err(format!("component directory {} already exists", target.display()).into());
        }

        let report = ctx.write(&set)?;
        info!(
            component = %name,
            dir = %target.display(),
            files = report.written.len(),
            "Component generated"
        );
        Ok(())
    }
}
