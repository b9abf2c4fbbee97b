//! # Snapshot Store
//!
//! A whole list stored as one JSON array under one key.
//!
//! ## Read/Write Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  load()                                                                 │
//! │    key absent ─────────────► []                                         │
//! │    value not valid JSON ───► [] (warn)                                  │
//! │    storage read fails ─────► [] (warn)                                  │
//! │    otherwise ──────────────► the stored list                            │
//! │                                                                         │
//! │  save(items)                                                            │
//! │    serializes the FULL list and overwrites the key                      │
//! │    failures propagate to the caller                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A corrupted snapshot is not something the user can act on, so reads
//! never fail; writes do, because a lost mutation must be reported.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::local_storage::LocalStorageRepository;

/// Typed list snapshot bound to one storage key.
pub struct SnapshotStore<T> {
    storage: LocalStorageRepository,
    key: String,
    _items: PhantomData<fn() -> T>,
}

impl<T> SnapshotStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: LocalStorageRepository, key: impl Into<String>) -> Self {
        SnapshotStore {
            storage,
            key: key.into(),
            _items: PhantomData,
        }
    }

    /// Storage key this snapshot lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored list; never fails (see module docs).
    pub async fn load(&self) -> Vec<T> {
        match self.try_load().await {
            Ok(items) => {
                debug!(key = %self.key, count = items.len(), "Snapshot loaded");
                items
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unreadable snapshot");
                Vec::new()
            }
        }
    }

    /// Reads the stored list, reporting why a read failed.
    pub async fn try_load(&self) -> DbResult<Vec<T>> {
        match self.storage.get_item(&self.key).await? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| DbError::corrupt(&self.key, e.to_string()))
            }
        }
    }

    /// Overwrites the stored list with `items`.
    pub async fn save(&self, items: &[T]) -> DbResult<()> {
        let raw =
            serde_json::to_string(items).map_err(|e| DbError::corrupt(&self.key, e.to_string()))?;
        self.storage.set_item(&self.key, &raw).await?;

        debug!(key = %self.key, count = items.len(), "Snapshot saved");
        Ok(())
    }
}

impl<T> Clone for SnapshotStore<T> {
    fn clone(&self) -> Self {
        SnapshotStore {
            storage: self.storage.clone(),
            key: self.key.clone(),
            _items: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SnapshotStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("key", &self.key)
            .finish()
    }
}
