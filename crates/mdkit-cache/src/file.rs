//! File-based cache implementation.
//!
//! [`FileCache`] stores entries as files on disk, one directory per bucket.
//! Each entry is a single file with a binary header followed by the data:
//!
//! ```text
//! [etag_len: u32 LE][etag bytes][data bytes]
//! ```
//!
//! On construction the `VERSION` file in the cache root is compared with the
//! running version. A mismatch or a missing file wipes the whole directory so
//! HTML rendered by an older build is never served.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use crate::{Cache, CacheBucket};

/// File-based [`Cache`] rooted at a directory on disk.
///
/// ```text
/// {root}/
/// +-- VERSION            # cache version string
/// +-- markdown/          # bucket "markdown"
///     +-- 5d41402a...    # one entry per cache key
/// ```
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a file cache at `root`, validating the cache version.
    ///
    /// Errors during validation are logged but never fatal.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        validate_version(&root, version);
        Self { root }
    }

    /// Root directory of the cache.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileCacheBucket {
            dir: self.root.join(name),
        })
    }
}

struct FileCacheBucket {
    dir: PathBuf,
}

impl FileCacheBucket {
    /// Path for `key`, or `None` when the key would escape the bucket directory.
    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !contained {
            tracing::debug!(key, "rejecting cache key outside bucket");
            return None;
        }
        Some(self.dir.join(relative))
    }
}

impl CacheBucket for FileCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        let mut file = File::open(self.entry_path(key)?).ok()?;

        let mut len_buf = [0u8; 4];
        file.read_exact(&mut len_buf).ok()?;
        let etag_len = u32::from_le_bytes(len_buf) as usize;

        let mut stored_etag = vec![0u8; etag_len];
        file.read_exact(&mut stored_etag).ok()?;

        if !etag.is_empty() && stored_etag != etag.as_bytes() {
            return None;
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data).ok()?;
        Some(data)
    }

    fn set(&self, key: &str, etag: &str, value: &[u8]) {
        let Some(path) = self.entry_path(key) else {
            return;
        };
        let Some(parent) = path.parent() else {
            return;
        };
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::warn!(error = %e, "failed to create cache bucket directory");
            return;
        }

        let etag_bytes = etag.as_bytes();
        let Ok(etag_len) = u32::try_from(etag_bytes.len()) else {
            return;
        };
        let mut buf = Vec::with_capacity(4 + etag_bytes.len() + value.len());
        buf.extend_from_slice(&etag_len.to_le_bytes());
        buf.extend_from_slice(etag_bytes);
        buf.extend_from_slice(value);

        if let Err(e) = fs::write(&path, &buf) {
            tracing::warn!(error = %e, path = %path.display(), "failed to write cache entry");
        }
    }
}

/// Validate the cache version, wiping the directory on mismatch.
fn validate_version(root: &Path, version: &str) {
    let version_file = root.join("VERSION");

    match fs::read_to_string(&version_file) {
        Ok(stored) if stored == version => {
            tracing::debug!("cache version matches: {version}");
            return;
        }
        Ok(stored) => {
            tracing::info!(
                "cache version mismatch (stored={stored}, current={version}), wiping cache"
            );
        }
        Err(_) => {
            tracing::info!("no cache VERSION file found, initializing cache");
        }
    }

    if root.exists()
        && let Err(e) = fs::remove_dir_all(root)
    {
        tracing::warn!("failed to remove cache directory: {e}");
    }
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!("failed to create cache directory: {e}");
        return;
    }
    if let Err(e) = fs::write(&version_file, version) {
        tracing::warn!("failed to write cache VERSION file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn cache_in(tmp: &TempDir) -> FileCache {
        FileCache::new(tmp.path().join("cache"), "v1")
    }

    #[test]
    fn test_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let bucket = cache_in(&tmp).bucket("markdown");

        bucket.set("5d41402abc4b2a76", "", b"<h1>hello</h1>");

        assert_eq!(
            bucket.get("5d41402abc4b2a76", ""),
            Some(b"<h1>hello</h1>".to_vec())
        );
    }

    #[test]
    fn test_etag_mismatch_misses() {
        let tmp = TempDir::new().unwrap();
        let bucket = cache_in(&tmp).bucket("markdown");

        bucket.set("key", "correct", b"data");

        assert_eq!(bucket.get("key", "correct"), Some(b"data".to_vec()));
        assert_eq!(bucket.get("key", "wrong"), None);
        assert_eq!(bucket.get("key", ""), Some(b"data".to_vec()));
    }

    #[test]
    fn test_missing_key_misses() {
        let tmp = TempDir::new().unwrap();
        let bucket = cache_in(&tmp).bucket("markdown");

        assert_eq!(bucket.get("nonexistent", ""), None);
    }

    #[test]
    fn test_buckets_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        cache.bucket("alpha").set("key", "", b"alpha-data");
        cache.bucket("beta").set("key", "", b"beta-data");

        assert_eq!(cache.bucket("alpha").get("key", ""), Some(b"alpha-data".to_vec()));
        assert_eq!(cache.bucket("beta").get("key", ""), Some(b"beta-data".to_vec()));
    }

    #[test]
    fn test_traversal_keys_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);
        let bucket = cache.bucket("markdown");

        bucket.set("../escaped", "", b"nope");
        bucket.set("/absolute", "", b"nope");
        bucket.set("", "", b"nope");

        assert!(!tmp.path().join("cache/escaped").exists());
        assert_eq!(bucket.get("../escaped", ""), None);
        assert_eq!(bucket.get("", ""), None);
    }

    #[test]
    fn test_entries_survive_reopen_with_same_version() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        FileCache::new(root.clone(), "v1")
            .bucket("markdown")
            .set("key", "", b"preserved");

        let reopened = FileCache::new(root, "v1");
        assert_eq!(
            reopened.bucket("markdown").get("key", ""),
            Some(b"preserved".to_vec())
        );
    }

    #[test]
    fn test_version_mismatch_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        FileCache::new(root.clone(), "v1")
            .bucket("markdown")
            .set("key", "", b"stale");

        let upgraded = FileCache::new(root.clone(), "v2");

        assert_eq!(upgraded.bucket("markdown").get("key", ""), None);
        assert_eq!(fs::read_to_string(root.join("VERSION")).unwrap(), "v2");
    }

    #[test]
    fn test_nonexistent_root_is_created() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("deeply/nested/cache");

        let cache = FileCache::new(root.clone(), "v1");

        assert!(root.exists());
        assert_eq!(cache.root(), root.as_path());
        assert_eq!(fs::read_to_string(root.join("VERSION")).unwrap(), "v1");
    }
}
