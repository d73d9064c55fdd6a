use std::{collections::HashMap, path::PathBuf, sync::Mutex};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::errors::StoreError;

/// String-keyed blob storage the record store persists into.
/// Implementations can be file-backed, in-memory, or remote KV.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Raw blob under `key`, or `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Keys become file names, so they are restricted to `[a-z0-9_]`.
fn check_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !ok {
        return Err(StoreError::Storage(format!("invalid storage key: {key:?}")));
    }
    Ok(())
}

/// One `<key>.json` file per key under a data directory.
///
/// Writes go to `<key>.json.tmp` first and are renamed over the target so a
/// crash mid-write never leaves a half-written blob behind.
#[derive(Clone, Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (and create if missing) the data directory.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        match fs::read_to_string(self.path_for(key)).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        check_key(key)?;
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value.as_bytes()).await?;
        fs::rename(&tmp, &target).await?;
        debug!(key, bytes = value.len(), "blob written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process map, for tests and benches.
#[derive(Default)]
pub struct MemoryBackend {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.blobs.lock().map_err(|_| StoreError::Storage("memory backend lock poisoned".into()))
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        check_key(key)?;
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn file_backend_crud_persists() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("kv_backend_{}", Uuid::new_v4()));
        let backend = FileBackend::new(&dir).await?;

        // initially empty
        assert_eq!(backend.get("blog_posts").await?, None);

        backend.set("blog_posts", "[]".into()).await?;
        assert_eq!(backend.get("blog_posts").await?.as_deref(), Some("[]"));
        assert!(tokio::fs::metadata(dir.join("blog_posts.json")).await.is_ok());
        assert!(tokio::fs::metadata(dir.join("blog_posts.json.tmp")).await.is_err());

        // reopen from disk
        let reopened = FileBackend::new(&dir).await?;
        assert_eq!(reopened.get("blog_posts").await?.as_deref(), Some("[]"));

        reopened.remove("blog_posts").await?;
        reopened.remove("blog_posts").await?;
        assert_eq!(reopened.get("blog_posts").await?, None);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_data_dir() {
        let backend = MemoryBackend::new();
        assert!(matches!(backend.set("../etc/passwd", "x".into()).await, Err(StoreError::Storage(_))));
        assert!(backend.get("").await.is_err());
        assert!(backend.get("Blog").await.is_err());
    }

    #[tokio::test]
    async fn memory_backend_overwrites() -> Result<(), StoreError> {
        let backend = MemoryBackend::new();
        backend.set("k", "1".into()).await?;
        backend.set("k", "2".into()).await?;
        assert_eq!(backend.get("k").await?.as_deref(), Some("2"));
        backend.remove("missing").await?;
        Ok(())
    }
}
