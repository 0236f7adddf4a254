//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "set up a package" or "run its migrations".

pub mod catalog;
pub mod command_service;
pub mod executor;
pub mod lifecycle;
pub mod resolver;
pub mod workspace;
pub mod writer;

pub use catalog::PackageCatalog;
pub use command_service::CommandService;
pub use executor::{ExecutionReport, MigrationExecutor};
pub use lifecycle::{LifecycleRequest, LifecycleService, SetupOutcome};
pub use resolver::MigrationPath;
pub use workspace::Workspace;
pub use writer::{WriteReport, write_file_set};
