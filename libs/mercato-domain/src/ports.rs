//! Ports (trait definitions) for external dependencies
//!
//! This module defines the contracts (ports) that external adapters must implement.
//! Following hexagonal architecture, the domain defines what it needs, and the
//! infrastructure provides implementations:
//!
//! - [`LocalStore`]: key-addressed persistence for one record type
//! - [`RemoteResolver`]: fetches another service's representation by URL
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait` to ensure zero-cost abstractions and static dispatch.

use std::fmt;
use std::future::Future;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::Result;

/// A key addressing one record in a local store
///
/// Scalar keys are plain integers. Composite keys are dedicated value types
/// whose components may be missing when they come from an external caller;
/// such keys are incomplete and can never match a stored record.
pub trait EntityKey:
    Clone + Ord + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static
{
    /// Whether every component of the key is present
    fn is_complete(&self) -> bool {
        true
    }
}

impl EntityKey for i32 {}

/// A record persisted by a [`LocalStore`]
///
/// Records carry own attributes and foreign-key ids only, never a resolved
/// remote object.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Key type addressing this record
    type Key: EntityKey;

    /// The record's key, `None` while a scalar id has not been assigned yet
    fn key(&self) -> Option<Self::Key>;

    /// Return the record re-addressed under `key`
    fn with_key(self, key: Self::Key) -> Self;

    /// Return the record with a store-generated scalar id
    ///
    /// Composite-keyed records always carry their key and keep the default.
    fn with_generated_key(self, _seq: i32) -> Self {
        self
    }
}

/// Port for local persistence of one record type
///
/// Implementations must convert backend failures into
/// `CompositionError::StoreFailure`. A missing key on read is `Ok(None)`,
/// never an error.
pub trait LocalStore<T: Record>: Send + Sync {
    /// Persist a new record, assigning a scalar key when absent
    fn create(&self, record: T) -> impl Future<Output = Result<T>> + Send;

    /// Look a record up by key
    fn read_by_key(&self, key: &T::Key) -> impl Future<Output = Result<Option<T>>> + Send;

    /// Full scan, in the store's own order
    fn read_all(&self) -> impl Future<Output = Result<Vec<T>>> + Send;

    /// Re-persist the full record under the key it carries
    fn update(&self, record: T) -> impl Future<Output = Result<T>> + Send;

    /// Remove by key; a missing key is a silent no-op
    fn delete_by_key(&self, key: &T::Key) -> impl Future<Output = Result<()>> + Send;

    /// Remove using the full record, for stores that need the object
    fn delete(&self, record: T) -> impl Future<Output = Result<()>> + Send;
}

/// Failure of a single remote resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Network-level failure (connect, timeout, reset)
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote answered with a non-success status
    #[error("unexpected status {0}")]
    Status(u16),

    /// The payload could not be decoded into the expected shape
    #[error("malformed payload: {0}")]
    Decode(String),
}

/// Port for fetching remote representations
///
/// One synchronous attempt per call: no retry, backoff or circuit breaking.
pub trait RemoteResolver: Send + Sync {
    /// GET `url` and decode the JSON body
    ///
    /// Returns `Ok(None)` only when the adapter is configured to treat a
    /// remote 404 as an absent value.
    fn get_json<T>(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<Option<T>, ResolveError>> + Send
    where
        T: DeserializeOwned + Send + 'static;
}
