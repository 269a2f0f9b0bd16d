//! Named cache store lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Cache, MemoryCache};

/// Cache store error.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The requested store name has no registered store.
    #[error("Cache store [{0}] is not defined")]
    UndefinedStore(String),
}

/// Registry of named cache stores with a default store name.
///
/// Stores are shared as `Arc<dyn Cache>`, so every renderer resolving the
/// same name writes to the same storage.
#[derive(Clone)]
pub struct CacheManager {
    default: String,
    stores: BTreeMap<String, Arc<dyn Cache>>,
}

impl CacheManager {
    /// Create a manager whose default store is `default`.
    ///
    /// The default store still has to be registered before it can be resolved.
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            stores: BTreeMap::new(),
        }
    }

    /// Register a store, returning the manager for chaining.
    #[must_use]
    pub fn with_store(mut self, name: impl Into<String>, store: Arc<dyn Cache>) -> Self {
        self.register(name, store);
        self
    }

    /// Register or replace a named store.
    pub fn register(&mut self, name: impl Into<String>, store: Arc<dyn Cache>) {
        self.stores.insert(name.into(), store);
    }

    /// Resolve a store by name, or the default store when `name` is `None`.
    pub fn store(&self, name: Option<&str>) -> Result<Arc<dyn Cache>, CacheError> {
        let name = name.unwrap_or(&self.default);
        self.stores
            .get(name)
            .cloned()
            .ok_or_else(|| CacheError::UndefinedStore(name.to_owned()))
    }

    /// Name of the default store.
    pub fn default_store(&self) -> &str {
        &self.default
    }

    /// Names of all registered stores, sorted.
    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }
}

impl Default for CacheManager {
    /// A single in-memory store named `memory`, used as the default.
    fn default() -> Self {
        Self::new("memory").with_store("memory", Arc::new(MemoryCache::new()))
    }
}
