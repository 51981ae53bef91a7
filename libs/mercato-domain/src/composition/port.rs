//! Port trait for composition services
//!
//! This module defines the trait that abstracts one entity type's composition
//! operations. The HTTP surface is written against it, while the concrete
//! [`Composer`] provides the implementation.

use std::future::Future;

use super::engine::{Composer, Composition};
use crate::error::Result;
use crate::ports::{LocalStore, Record, RemoteResolver};

/// Port trait for one entity type's operations
pub trait CompositionPort: Send + Sync {
    /// Key addressing one entity
    type Key: Send + Sync;
    /// Outgoing representation
    type Composed: Send;

    /// Name used in logs and error messages
    fn entity_type(&self) -> &'static str;

    /// Compose every entity in scan order
    fn list(&self) -> impl Future<Output = Result<Vec<Self::Composed>>> + Send;

    /// Compose one entity by key
    fn get(&self, key: &Self::Key) -> impl Future<Output = Result<Self::Composed>> + Send;

    /// Create from a composed representation
    fn save(&self, composed: Self::Composed) -> impl Future<Output = Result<Self::Composed>> + Send;

    /// Update using the key embedded in the representation
    fn update(&self, composed: Self::Composed)
        -> impl Future<Output = Result<Self::Composed>> + Send;

    /// Update the entity stored under `key`
    fn update_by_key(
        &self,
        key: &Self::Key,
        composed: Self::Composed,
    ) -> impl Future<Output = Result<Self::Composed>> + Send;

    /// Delete following the entity type's delete discipline
    fn remove(&self, key: &Self::Key) -> impl Future<Output = Result<()>> + Send;
}

impl<C, S, R> CompositionPort for Composer<C, S, R>
where
    C: Composition,
    S: LocalStore<C::Record>,
    R: RemoteResolver,
{
    type Key = <C::Record as Record>::Key;
    type Composed = C::Composed;

    fn entity_type(&self) -> &'static str {
        C::ENTITY_TYPE
    }

    fn list(&self) -> impl Future<Output = Result<Vec<Self::Composed>>> + Send {
        Composer::list(self)
    }

    fn get(&self, key: &Self::Key) -> impl Future<Output = Result<Self::Composed>> + Send {
        Composer::get(self, key)
    }

    fn save(&self, composed: Self::Composed) -> impl Future<Output = Result<Self::Composed>> + Send {
        Composer::save(self, composed)
    }

    fn update(
        &self,
        composed: Self::Composed,
    ) -> impl Future<Output = Result<Self::Composed>> + Send {
        Composer::update(self, composed)
    }

    fn update_by_key(
        &self,
        key: &Self::Key,
        composed: Self::Composed,
    ) -> impl Future<Output = Result<Self::Composed>> + Send {
        Composer::update_by_key(self, key, composed)
    }

    fn remove(&self, key: &Self::Key) -> impl Future<Output = Result<()>> + Send {
        Composer::remove(self, key)
    }
}
