pub mod file_set;
pub mod migration;
pub mod package;
pub mod project;
pub mod registry;
pub mod render;

pub use file_set::{DirectoryToCreate, FileSet, FileToWrite, FsEntry};
pub use migration::{MigrationFailure, MigrationOptions, MigrationResult};
pub use package::{CommandOption, CommandOptions, InstalledPackage, PackageMetadata};
pub use project::{ProjectContext, ProjectType};
pub use registry::{Registry, RegistryDocument};
pub use render::RenderContext;
