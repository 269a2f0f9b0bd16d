//! Cache store abstraction for mdkit.
//!
//! Rendered HTML is memoized through two traits that keep the renderer
//! independent of where entries live:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store with etag-based validation
//!
//! Stores are looked up by name through a [`CacheManager`], which also knows
//! which store is the default one.
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: Process-local store shared between bucket handles
//! - [`FileCache`]: File-based implementation with version validation
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mdkit_cache::{CacheBucketExt, CacheManager, MemoryCache};
//!
//! let caches = CacheManager::new("memory").with_store("memory", Arc::new(MemoryCache::new()));
//! let bucket = caches.store(None).unwrap().bucket("markdown");
//!
//! let html = bucket
//!     .remember_string("key", "", || Ok::<_, std::convert::Infallible>("<p>hi</p>".to_owned()))
//!     .unwrap();
//! assert_eq!(html, "<p>hi</p>");
//! assert_eq!(bucket.get_string("key", ""), Some("<p>hi</p>".to_owned()));
//! ```

mod ext;
mod file;
mod manager;
mod memory;

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use manager::{CacheError, CacheManager};
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Each bucket stores key-value pairs where values are validated by an etag.
/// The etag is an opaque string chosen by the caller. A cache hit occurs only
/// when both the key and etag match.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists **and** was stored with the same
    /// `etag`. Returns `None` on cache miss or etag mismatch.
    ///
    /// If `etag` is an empty string, etag validation is skipped and the cached
    /// data is returned regardless of the stored etag.
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>>;

    /// Store a value in the cache.
    ///
    /// Overwrites any existing entry for the same key, regardless of the
    /// previous etag.
    fn set(&self, key: &str, etag: &str, value: &[u8]);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name may return
    /// independent handles that share the same underlying storage.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str, _etag: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _etag: &str, _value: &[u8]) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Backs the `null` store driver. All lookups return `None`.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}
