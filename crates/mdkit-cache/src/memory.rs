//! In-process cache implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Cache, CacheBucket};

struct Entry {
    etag: String,
    value: Vec<u8>,
}

type Entries = Arc<RwLock<HashMap<(String, String), Entry>>>;

/// Process-local [`Cache`] backed by a shared hash map.
///
/// Every bucket handle, and every clone of the cache, reads and writes the
/// same storage. Entries live until the last handle is dropped.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Entries,
}

impl MemoryCache {
    /// Create an empty memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all buckets.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            name: name.to_owned(),
            entries: Arc::clone(&self.entries),
        })
    }
}

struct MemoryCacheBucket {
    name: String,
    entries: Entries,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read().unwrap();
        let entry = entries.get(&(self.name.clone(), key.to_owned()))?;
        if !etag.is_empty() && entry.etag != etag {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, etag: &str, value: &[u8]) {
        self.entries.write().unwrap().insert(
            (self.name.clone(), key.to_owned()),
            Entry {
                etag: etag.to_owned(),
                value: value.to_vec(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("markdown");

        bucket.set("key", "etag1", b"<p>hello</p>");

        assert_eq!(bucket.get("key", "etag1"), Some(b"<p>hello</p>".to_vec()));
        assert_eq!(bucket.get("key", "other"), None);
        assert_eq!(bucket.get("key", ""), Some(b"<p>hello</p>".to_vec()));
    }

    #[test]
    fn test_buckets_are_isolated() {
        let cache = MemoryCache::new();
        let a = cache.bucket("alpha");
        let b = cache.bucket("beta");

        a.set("key", "", b"alpha");
        b.set("key", "", b"beta");

        assert_eq!(a.get("key", ""), Some(b"alpha".to_vec()));
        assert_eq!(b.get("key", ""), Some(b"beta".to_vec()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_handles_share_storage() {
        let cache = MemoryCache::new();
        let clone = cache.clone();

        cache.bucket("markdown").set("key", "", b"shared");

        assert_eq!(
            clone.bucket("markdown").get("key", ""),
            Some(b"shared".to_vec())
        );
    }

    #[test]
    fn test_overwrite_replaces_etag() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("markdown");

        bucket.set("key", "v1", b"first");
        bucket.set("key", "v2", b"second");

        assert_eq!(bucket.get("key", "v1"), None);
        assert_eq!(bucket.get("key", "v2"), Some(b"second".to_vec()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_new_cache_is_empty() {
        assert!(MemoryCache::new().is_empty());
    }
}
