//! Package sources: compiled-in registrations and manifest directories.

mod builtin;
mod directory;
pub mod manifest;

pub use builtin::BuiltinSource;
pub use directory::DirectorySource;
