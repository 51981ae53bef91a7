//! Composition engine - local records enriched with remote representations
//!
//! The engine coordinates one [`LocalStore`] with zero, one or two remote
//! resolutions per record. What a record references, and where the resolved
//! objects are nested, is decided by a per-entity [`Composition`] policy.

use std::collections::HashSet;
use std::future::Future;
use std::marker::PhantomData;

use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

use super::config::{CompositionConfig, DeletePolicy};
use super::links::RemoteLinks;
use crate::error::{CompositionError, Result};
use crate::ports::{EntityKey, LocalStore, Record, RemoteResolver};
use crate::remote::RemoteEndpoints;

/// Enrichment policy for one entity type
///
/// A policy is a zero-sized description: it splits an incoming composed
/// representation into the record to persist and the nested objects the
/// caller supplied, joins them back, and resolves whatever is still missing.
pub trait Composition: Send + Sync + 'static {
    /// Persisted shape: own attributes plus foreign-key ids
    type Record: Record;
    /// External shape: the record plus resolved nested objects
    type Composed: Send + 'static;
    /// Nested remote objects, one `Option` per reference (`()` for none)
    type Links: Default + Send + 'static;

    /// Name used in not-found messages and logs
    const ENTITY_TYPE: &'static str;

    /// Discipline applied by [`Composer::remove`]
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Blind;

    /// Collapse records repeated under the same key when listing
    const DISTINCT_LIST: bool = false;

    /// Separate the record from caller-supplied nested objects
    fn split(composed: Self::Composed) -> (Self::Record, Self::Links);

    /// Assemble the outgoing representation
    fn join(record: Self::Record, links: Self::Links) -> Self::Composed;

    /// Drop nested objects that disagree with the record's foreign keys
    fn retain_consistent(record: &Self::Record, links: Self::Links) -> Self::Links;

    /// Resolve every reference whose slot in `links` is still empty
    fn resolve_missing<R: RemoteResolver>(
        remote: &RemoteLinks<R>,
        record: &Self::Record,
        links: Self::Links,
    ) -> impl Future<Output = Result<Self::Links>> + Send;

    /// Write-time invariants on the record
    fn validate(_record: &Self::Record) -> Result<()> {
        Ok(())
    }
}

/// Stateless composition service for one entity type
///
/// ## Static Dispatch
///
/// The engine is generic over the policy, the store and the resolver; each
/// service instantiates it with its own concrete types.
pub struct Composer<C, S, R> {
    store: S,
    remote: RemoteLinks<R>,
    config: CompositionConfig,
    _policy: PhantomData<fn() -> C>,
}

type Key<C> = <<C as Composition>::Record as Record>::Key;

impl<C, S, R> Composer<C, S, R>
where
    C: Composition,
    S: LocalStore<C::Record>,
    R: RemoteResolver,
{
    /// Create a new Composer with the given collaborators and configuration
    pub fn new(store: S, resolver: R, endpoints: RemoteEndpoints, config: CompositionConfig) -> Self {
        let remote = RemoteLinks::new(resolver, endpoints, config.enrichment_mode);
        Self {
            store,
            remote,
            config,
            _policy: PhantomData,
        }
    }

    /// Create a new Composer with default configuration
    pub fn with_collaborators(store: S, resolver: R, endpoints: RemoteEndpoints) -> Self {
        Self::new(store, resolver, endpoints, CompositionConfig::default())
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the remote resolution helper
    pub fn remote(&self) -> &RemoteLinks<R> {
        &self.remote
    }

    /// Get the engine configuration
    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Read one record by key and compose it
    ///
    /// # Errors
    ///
    /// - `EntityNotFound` when the key is incomplete or absent; no remote call is made
    /// - `RemoteUnavailable` when any reference fails to resolve (fail-closed)
    /// - `Timeout` when the configured deadline elapses
    #[instrument(level = "debug", skip_all, fields(entity_type = C::ENTITY_TYPE, key = %key))]
    pub async fn get(&self, key: &Key<C>) -> Result<C::Composed> {
        self.within_deadline(async {
            let record = self.read_existing(key).await?;
            self.compose(record).await
        })
        .await
    }

    /// Compose every record in the store's scan order
    ///
    /// References of distinct records are resolved concurrently, at most
    /// `max_in_flight` records at a time. The first failure cancels every
    /// outstanding resolution and fails the whole list.
    #[instrument(level = "debug", skip_all, fields(entity_type = C::ENTITY_TYPE))]
    pub async fn list(&self) -> Result<Vec<C::Composed>> {
        self.within_deadline(async {
            let mut records = self.store.read_all().await?;
            if C::DISTINCT_LIST {
                let mut seen = HashSet::new();
                records.retain(|record| record.key().map_or(true, |key| seen.insert(key)));
            }
            self.fan_out(records).await
        })
        .await
    }

    /// Compose the first record, in scan order, matching `predicate`
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` naming `field` and `value` when nothing matches
    #[instrument(level = "debug", skip_all, fields(entity_type = C::ENTITY_TYPE, field = field))]
    pub async fn find_by<P>(&self, field: &'static str, value: &str, predicate: P) -> Result<C::Composed>
    where
        P: Fn(&C::Record) -> bool + Send + Sync,
    {
        self.within_deadline(async {
            let record = self
                .store
                .read_all()
                .await?
                .into_iter()
                .find(|record| predicate(record))
                .ok_or_else(|| CompositionError::not_found_by(C::ENTITY_TYPE, field, value))?;
            self.compose(record).await
        })
        .await
    }

    /// Persist a new record and echo the caller's nested objects
    ///
    /// Only own attributes and foreign-key ids reach the store. Nested
    /// objects that match the persisted foreign keys are returned as given;
    /// missing ones stay empty unless `resolve_on_write` is set.
    pub async fn save(&self, composed: C::Composed) -> Result<C::Composed> {
        let (record, supplied) = C::split(composed);
        C::validate(&record)?;

        let persisted = self.store.create(record).await?;
        debug!(entity_type = C::ENTITY_TYPE, key = ?persisted.key(), "Record created");

        self.recompose(persisted, supplied).await
    }

    /// Re-persist a record under the key embedded in it
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` when the representation carries no key
    pub async fn update(&self, composed: C::Composed) -> Result<C::Composed> {
        let (record, supplied) = C::split(composed);
        if record.key().is_none() {
            return Err(CompositionError::validation(format!(
                "{} update requires an embedded key",
                C::ENTITY_TYPE
            )));
        }
        C::validate(&record)?;

        let persisted = self.store.update(record).await?;
        self.recompose(persisted, supplied).await
    }

    /// Re-persist own attributes under an existing key
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` when no record exists under `key`
    pub async fn update_by_key(&self, key: &Key<C>, composed: C::Composed) -> Result<C::Composed> {
        let existing = self.read_existing(key).await?;
        let (record, supplied) = C::split(composed);
        let record = record.with_key(existing.key().unwrap_or_else(|| key.clone()));
        C::validate(&record)?;

        let persisted = self.store.update(record).await?;
        self.recompose(persisted, supplied).await
    }

    /// Blind delete; an absent key is a no-op
    pub async fn delete_by_key(&self, key: &Key<C>) -> Result<()> {
        self.store.delete_by_key(key).await
    }

    /// Delete after confirming existence, handing the full record to the store
    pub async fn delete(&self, key: &Key<C>) -> Result<()> {
        let existing = self.read_existing(key).await?;
        self.store.delete(existing).await
    }

    /// Delete using the entity type's configured discipline
    pub async fn remove(&self, key: &Key<C>) -> Result<()> {
        match C::DELETE_POLICY {
            DeletePolicy::Blind => self.delete_by_key(key).await,
            DeletePolicy::CheckExisting => self.delete(key).await,
        }
    }

    async fn read_existing(&self, key: &Key<C>) -> Result<C::Record> {
        if !key.is_complete() {
            debug!(entity_type = C::ENTITY_TYPE, key = %key, "Incomplete key cannot match a record");
            return Err(CompositionError::not_found(C::ENTITY_TYPE, key));
        }

        self.store
            .read_by_key(key)
            .await?
            .ok_or_else(|| CompositionError::not_found(C::ENTITY_TYPE, key))
    }

    async fn compose(&self, record: C::Record) -> Result<C::Composed> {
        let links = C::resolve_missing(&self.remote, &record, C::Links::default()).await?;
        Ok(C::join(record, links))
    }

    async fn recompose(&self, record: C::Record, supplied: C::Links) -> Result<C::Composed> {
        let links = C::retain_consistent(&record, supplied);
        let links = if self.config.resolve_on_write {
            C::resolve_missing(&self.remote, &record, links).await?
        } else {
            links
        };
        Ok(C::join(record, links))
    }

    /// Index-tagged fan-out reassembled into a pre-sized slot buffer
    async fn fan_out(&self, records: Vec<C::Record>) -> Result<Vec<C::Composed>> {
        let total = records.len();
        let mut slots: Vec<Option<C::Composed>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        let mut pending = stream::iter(records.into_iter().enumerate())
            .map(|(index, record)| async move { (index, self.compose(record).await) })
            .buffer_unordered(self.config.max_in_flight.max(1));

        while let Some((index, composed)) = pending.next().await {
            slots[index] = Some(composed?);
        }

        debug!(entity_type = C::ENTITY_TYPE, count = total, "List composed");
        Ok(slots.into_iter().flatten().collect())
    }

    async fn within_deadline<T>(&self, operation: impl Future<Output = Result<T>>) -> Result<T> {
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, operation)
                .await
                .unwrap_or_else(|_| {
                    warn!(
                        entity_type = C::ENTITY_TYPE,
                        timeout_ms = limit.as_millis() as u64,
                        "Composition deadline elapsed, outstanding calls cancelled"
                    );
                    Err(CompositionError::timeout(
                        C::ENTITY_TYPE,
                        limit.as_millis() as u64,
                    ))
                }),
            None => operation.await,
        }
    }
}
