//! Package Catalog - discovers package definitions across sources.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument};

use crate::application::ApplicationError;
use crate::application::plugin::PackageDefinition;
use crate::application::ports::PackageSource;
use crate::domain::DomainValidator as validator;
use crate::error::{ShurikenError, ShurikenResult};

/// Looks packages up across ordered sources and caches what it loads.
///
/// Earlier sources take priority. A loaded definition is kept for the life of
/// the catalog and never reloaded.
pub struct PackageCatalog {
    sources: Vec<Box<dyn PackageSource>>,
    cache: RwLock<HashMap<String, Arc<PackageDefinition>>>,
}

impl PackageCatalog {
    pub fn new(sources: Vec<Box<dyn PackageSource>>) -> Self {
        Self {
            sources,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Package names from every source, first occurrence wins.
    #[instrument(skip(self))]
    pub fn list(&self) -> ShurikenResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for source in &self.sources {
            for name in source.list()? {
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
        debug!(count = names.len(), "Listed packages");
        Ok(names)
    }

    /// Load `name`, from the cache if it was loaded before.
    #[instrument(skip(self))]
    pub fn get(&self, name: &str) -> ShurikenResult<Arc<PackageDefinition>> {
        validator::validate_package_name(name).map_err(ShurikenError::Domain)?;

        if let Some(hit) = self
            .cache
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?
            .get(name)
        {
            debug!("Cache hit");
            return Ok(Arc::clone(hit));
        }

        for source in &self.sources {
            if let Some(definition) = source.load(name)? {
                info!(
                    source = %source.label(),
                    version = %definition.version(),
                    "Loaded package"
                );
                let definition = Arc::new(definition);
                self.cache
                    .write()
                    .map_err(|_| ApplicationError::StoreLockError)?
                    .insert(name.to_string(), Arc::clone(&definition));
                return Ok(definition);
            }
        }

        let searched = self
            .sources
            .iter()
            .flat_map(|s| s.locations(name))
            .collect();
        Err(ApplicationError::PackageNotFound {
            name: name.to_string(),
            searched,
        }
        .into())
    }
}
