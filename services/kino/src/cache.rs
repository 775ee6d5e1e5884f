//! Retrieval cache
//!
//! Memoizes the pagination driver on disk, keyed by the retrieval arguments.
//! The cache wraps the driver call; the driver itself knows nothing about it.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::errors::ServiceError;
use shared::Retrieval;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::draw_client::DrawSource;
use crate::pagination::{retrieve, RetrievalMode};

/// Key derived from every argument that shapes a retrieval
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `scope` is the source's `DrawSource::cache_scope`
    pub fn new(scope: &str, date: NaiveDate, mode: &RetrievalMode) -> Self {
        Self(format!("draws-{}-{}-{}", scope, date, mode))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait RetrievalCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<Retrieval>, ServiceError>;

    async fn put(&self, key: &CacheKey, retrieval: &Retrieval) -> Result<(), ServiceError>;
}

/// One JSON file per key inside a cache directory
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl RetrievalCache for DiskCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Retrieval>, ServiceError> {
        let path = self.entry_path(key);

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ServiceError::cache_io(path.display(), e)),
        };

        match serde_json::from_str(&contents) {
            Ok(retrieval) => Ok(Some(retrieval)),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unreadable cache entry"
                );
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &CacheKey, retrieval: &Retrieval) -> Result<(), ServiceError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ServiceError::cache_io(self.dir.display(), e))?;

        let path = self.entry_path(key);
        let json = serde_json::to_string(retrieval).map_err(ServiceError::serialization_error)?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| ServiceError::cache_io(path.display(), e))
    }
}

/// Serve a retrieval from the cache, or run the driver and store its result
pub async fn cached_retrieve<S>(
    cache: &dyn RetrievalCache,
    key: &CacheKey,
    source: &S,
    date: NaiveDate,
    mode: &RetrievalMode,
) -> Result<Retrieval, ServiceError>
where
    S: DrawSource + ?Sized,
{
    if let Some(retrieval) = cache.get(key).await? {
        info!(key = %key, draws_count = retrieval.draws.len(), "Cache hit");
        return Ok(retrieval);
    }

    info!(key = %key, "Cache miss");
    let retrieval = retrieve(source, date, mode).await?;
    cache.put(key, &retrieval).await?;

    Ok(retrieval)
}
