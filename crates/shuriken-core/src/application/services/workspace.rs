//! The project shuriken operates on.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::plugin::ExecutionContext;
use crate::application::ports::{Filesystem, Prompter};
use crate::domain::ProjectContext;

/// Project root plus the I/O ports actions run against.
pub struct Workspace {
    root: PathBuf,
    filesystem: Box<dyn Filesystem>,
    prompter: Box<dyn Prompter>,
    project: ProjectContext,
}

impl Workspace {
    /// Open `root`, detecting what kind of project it is.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(
        root: impl AsRef<Path>,
        filesystem: Box<dyn Filesystem>,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        let root = root.as_ref().to_path_buf();
        let project = detect(filesystem.as_ref(), &root);
        debug!(
            typescript = project.is_typescript,
            project_type = %project.project_type,
            storybook = project.has_storybook,
            unit_tests = project.has_unit_tests,
            "Detected project"
        );
        Self {
            root,
            filesystem,
            prompter,
            project,
        }
    }

    /// Use a known context instead of detecting one.
    pub fn with_project(mut self, project: ProjectContext) -> Self {
        self.project = project;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    pub fn context(&self) -> ExecutionContext<'_> {
        ExecutionContext {
            root: &self.root,
            filesystem: self.filesystem.as_ref(),
            prompter: self.prompter.as_ref(),
            project: &self.project,
        }
    }
}

/// Inspect `root` through `filesystem`.
pub fn detect(filesystem: &dyn Filesystem, root: &Path) -> ProjectContext {
    let package_json = filesystem.read_to_string(&root.join("package.json")).ok();
    ProjectContext::analyze(|p| filesystem.exists(&root.join(p)), package_json.as_deref())
}
