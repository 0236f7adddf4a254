//! In-memory registry for tests.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicUsize, Ordering},
};

use shuriken_core::{
    application::{ApplicationError, ports::RegistryStore},
    domain::{InstalledPackage, Registry},
    error::ShurikenResult,
};

/// Registry held in memory; counts every write.
///
/// Clones share state, so a test can hand one to a service and inspect the
/// other.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistryStore {
    state: Arc<RwLock<Registry>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed entries without counting them as writes.
    pub fn with_package(self, package: InstalledPackage) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.upsert(package);
        }
        self
    }

    /// Number of `upsert` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn get(&self, name: &str) -> ShurikenResult<Option<InstalledPackage>> {
        let state = self
            .state
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(state.get(name).cloned())
    }

    fn upsert(&self, package: InstalledPackage) -> ShurikenResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        state.upsert(package);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn list(&self) -> ShurikenResult<Vec<InstalledPackage>> {
        let state = self
            .state
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(state.iter().cloned().collect())
    }
}
