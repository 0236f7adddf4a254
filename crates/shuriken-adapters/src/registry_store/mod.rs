//! Registry store adapters.

mod json;
mod memory;

pub use json::JsonRegistryStore;
pub use memory::MemoryRegistryStore;
