//! In-Memory Local Store Implementation
//!
//! Records are kept in a `BTreeMap` ordered by key, so a full scan returns
//! them in key order. Scalar ids are generated from a per-store sequence
//! starting at 1.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use mercato_domain::error::{CompositionError, Result};
use mercato_domain::ports::{LocalStore, Record};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Map-backed implementation of the LocalStore port
///
/// Cloning shares the underlying map.
pub struct InMemoryStore<T: Record> {
    rows: Arc<RwLock<BTreeMap<T::Key, T>>>,
    seq: Arc<AtomicI32>,
}

impl<T: Record> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            seq: self.seq.clone(),
        }
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            seq: Arc::new(AtomicI32::new(0)),
        }
    }

    /// Create a store pre-populated with keyed records
    ///
    /// Records without a key are skipped.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let rows = records
            .into_iter()
            .filter_map(|record| record.key().map(|key| (key, record)))
            .collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
            seq: Arc::new(AtomicI32::new(0)),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no record
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn keyed<T: Record>(record: &T) -> Result<T::Key> {
    record
        .key()
        .ok_or_else(|| CompositionError::store_failure("record carries no key"))
}

impl<T: Record> LocalStore<T> for InMemoryStore<T> {
    #[instrument(level = "debug", skip_all)]
    fn create(&self, record: T) -> impl std::future::Future<Output = Result<T>> + Send {
        let rows = self.rows.clone();
        let seq = self.seq.clone();

        async move {
            let mut rows = rows.write().await;
            let record = match record.key() {
                Some(_) => record,
                None => {
                    // skip ids already taken by caller-supplied keys
                    let mut candidate = record;
                    loop {
                        let next = seq.fetch_add(1, Ordering::SeqCst) + 1;
                        let generated = candidate.with_generated_key(next);
                        let free = generated.key().map_or(true, |key| !rows.contains_key(&key));
                        if free {
                            break generated;
                        }
                        candidate = generated;
                    }
                }
            };

            let key = keyed(&record)?;
            debug!(key = %key, "Storing record");
            rows.insert(key, record.clone());
            Ok(record)
        }
    }

    fn read_by_key(&self, key: &T::Key) -> impl std::future::Future<Output = Result<Option<T>>> + Send {
        let rows = self.rows.clone();
        let key = key.clone();

        async move { Ok(rows.read().await.get(&key).cloned()) }
    }

    fn read_all(&self) -> impl std::future::Future<Output = Result<Vec<T>>> + Send {
        let rows = self.rows.clone();

        async move { Ok(rows.read().await.values().cloned().collect()) }
    }

    #[instrument(level = "debug", skip_all)]
    fn update(&self, record: T) -> impl std::future::Future<Output = Result<T>> + Send {
        let rows = self.rows.clone();

        async move {
            let key = keyed(&record)?;
            debug!(key = %key, "Replacing record");
            rows.write().await.insert(key, record.clone());
            Ok(record)
        }
    }

    fn delete_by_key(&self, key: &T::Key) -> impl std::future::Future<Output = Result<()>> + Send {
        let rows = self.rows.clone();
        let key = key.clone();

        async move {
            if rows.write().await.remove(&key).is_none() {
                debug!(key = %key, "Nothing to delete");
            }
            Ok(())
        }
    }

    fn delete(&self, record: T) -> impl std::future::Future<Output = Result<()>> + Send {
        let rows = self.rows.clone();

        async move {
            let key = keyed(&record)?;
            rows.write().await.remove(&key);
            Ok(())
        }
    }
}
