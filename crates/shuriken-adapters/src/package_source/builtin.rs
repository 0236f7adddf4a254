//! Packages registered at compile time.

use tracing::debug;

use shuriken_core::{
    application::{PackageDefinition, ports::PackageSource},
    error::ShurikenResult,
};

use crate::packages::{BUILTIN_PACKAGES, PackageFactory};

/// Source backed by a static table of package factories.
#[derive(Debug, Clone, Default)]
pub struct BuiltinSource {
    factories: Vec<(&'static str, PackageFactory)>,
}

impl BuiltinSource {
    /// An empty source; see [`Self::with_defaults`] for the shipped packages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with every package shipped in the binary.
    pub fn with_defaults() -> Self {
        BUILTIN_PACKAGES
            .iter()
            .fold(Self::new(), |source, &(name, factory)| {
                source.register(name, factory)
            })
    }

    /// Add a package; a later registration under the same name wins.
    pub fn register(mut self, name: &'static str, factory: PackageFactory) -> Self {
        self.factories.retain(|(n, _)| *n != name);
        self.factories.push((name, factory));
        self
    }
}

impl PackageSource for BuiltinSource {
    fn label(&self) -> String {
        "built-in".to_string()
    }

    fn list(&self) -> ShurikenResult<Vec<String>> {
        Ok(self.factories.iter().map(|(n, _)| n.to_string()).collect())
    }

    fn load(&self, name: &str) -> ShurikenResult<Option<PackageDefinition>> {
        let found = self
            .factories
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, factory)| factory());
        debug!(package = name, found = found.is_some(), "Built-in lookup");
        Ok(found)
    }

    fn locations(&self, name: &str) -> Vec<String> {
        vec![format!("built-in:{name}")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_jarvis() {
        let source = BuiltinSource::with_defaults();
        assert_eq!(source.list().unwrap(), ["jarvis"]);

        let jarvis = source.load("jarvis").unwrap().unwrap();
        assert_eq!(jarvis.version().to_string(), "1.0.0");
        assert!(jarvis.setup_command().is_some());
        assert!(jarvis.command("component").is_some());
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(BuiltinSource::with_defaults().load("ghost").unwrap().is_none());
        assert!(BuiltinSource::new().list().unwrap().is_empty());
    }
}
