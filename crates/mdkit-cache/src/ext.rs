//! Extension trait for [`CacheBucket`] with typed convenience methods.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Kept on an extension trait so [`CacheBucket`] stays object-safe and
/// implementors only deal with raw bytes.
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, etag mismatch, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str, etag: &str) -> Option<T> {
        let bytes = self.get(key, etag)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, etag: &str, value: &T) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, etag, &bytes);
        }
    }

    /// Retrieve a cached UTF-8 string.
    ///
    /// Returns `None` on cache miss, etag mismatch, or invalid UTF-8.
    fn get_string(&self, key: &str, etag: &str) -> Option<String> {
        let bytes = self.get(key, etag)?;
        String::from_utf8(bytes).ok()
    }

    /// Store a string value in the cache.
    fn set_string(&self, key: &str, etag: &str, value: &str) {
        self.set(key, etag, value.as_bytes());
    }

    /// Return the cached string for `key`, computing and storing it on a miss.
    ///
    /// Entries never expire. When `compute` fails the error is returned and
    /// nothing is written.
    fn remember_string<E, F>(&self, key: &str, etag: &str, compute: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        if let Some(cached) = self.get_string(key, etag) {
            tracing::debug!(key, "cache hit");
            return Ok(cached);
        }

        tracing::debug!(key, "cache miss");
        let value = compute()?;
        self.set_string(key, etag, &value);
        Ok(value)
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
