use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::StoreError;
use crate::storage::backend::KvBackend;

fn corrupt(key: &str, e: serde_json::Error) -> StoreError {
    StoreError::Corrupt { key: key.to_string(), reason: e.to_string() }
}

/// A typed collection persisted as one JSON array under a fixed key.
///
/// Every operation reads and parses the whole blob; mutations serialize and
/// write the whole array back. Read-modify-write sequences are not locked
/// here: callers sharing a collection serialize them (see `RecordStore`).
pub struct JsonCollection<T> {
    backend: Arc<dyn KvBackend>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn KvBackend>, key: &'static str) -> Self {
        Self { backend, key, _marker: PhantomData }
    }

    /// Whether the key has ever been written.
    pub async fn is_initialized(&self) -> Result<bool, StoreError> {
        Ok(self.backend.get(self.key).await?.is_some())
    }

    /// All records; an unwritten key reads as an empty collection.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        match self.backend.get(self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| corrupt(self.key, e)),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the whole collection.
    pub async fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_string(items).map_err(|e| corrupt(self.key, e))?;
        self.backend.set(self.key, data).await
    }

    /// Load, apply `f`, persist. Nothing is written if `f` fails.
    pub async fn update<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, StoreError>,
    {
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.save(&items).await?;
        Ok(out)
    }
}

/// A single JSON object under a fixed key, absent until first stored.
pub struct JsonDocument<T> {
    backend: Arc<dyn KvBackend>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn KvBackend>, key: &'static str) -> Self {
        Self { backend, key, _marker: PhantomData }
    }

    pub async fn load(&self) -> Result<Option<T>, StoreError> {
        match self.backend.get(self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| corrupt(self.key, e)),
            None => Ok(None),
        }
    }

    pub async fn store(&self, value: &T) -> Result<(), StoreError> {
        let data = serde_json::to_string(value).map_err(|e| corrupt(self.key, e))?;
        self.backend.set(self.key, data).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(self.key).await
    }
}
