//! Response cache stores for the offline-first fetcher.
//!
//! A cache is opaque key-value storage keyed by request URL. Values are raw
//! response bodies; parsing happens in the fetcher so a corrupt entry is
//! just a miss.

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};

use crate::error::FetchError;

/// Key-value store of response bodies keyed by URL.
pub trait ResponseCache: Send + Sync + 'static {
    /// Returns the cached body for `url`, or `None` on a miss.
    fn get(&self, url: &str) -> impl Future<Output = Result<Option<Vec<u8>>, FetchError>> + Send;

    /// Stores `body` for `url`, replacing any previous entry.
    fn put(&self, url: &str, body: &[u8]) -> impl Future<Output = Result<(), FetchError>> + Send;
}

/// Process-local cache. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry synchronously.
    pub fn insert(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_owned(), body.into());
    }

    /// Copy of the entry for `url`, if any.
    #[must_use]
    pub fn snapshot(&self, url: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResponseCache for MemoryCache {
    async fn get(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        Ok(self.snapshot(url))
    }

    async fn put(&self, url: &str, body: &[u8]) -> Result<(), FetchError> {
        self.insert(url, body);
        Ok(())
    }
}

/// One file per URL under a cache directory. File names are the SHA-256 hex
/// digest of the URL, so any URL maps to a safe path.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `url`.
    #[must_use]
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(url)))
    }
}

impl ResponseCache for DiskCache {
    async fn get(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let path = self.path_for(url);
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FetchError::Cache {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    async fn put(&self, url: &str, body: &[u8]) -> Result<(), FetchError> {
        let path = self.path_for(url);
        let dir = self.dir.clone();
        let body = body.to_vec();
        let target = path.clone();

        // Each write gets its own temp file in the cache dir, then renames
        // over the entry. Readers and other writers never see a torn file.
        let written = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&body)?;
            tmp.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .unwrap_or_else(|join| Err(std::io::Error::other(join)));

        written.map_err(|source| FetchError::Cache {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Hex SHA-256 digest of `url`.
#[must_use]
pub fn cache_key(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}
