//! Domain errors for composition operations
//!
//! This module defines every failure the composition engine can surface.
//! These are domain-level errors: transport and storage details are folded
//! into string reasons by the adapters before they reach this layer.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while composing, persisting or removing an entity
///
/// The engine never downgrades one of these into a partial success. Mapping
/// to transport status codes is the caller's concern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// The local store has no record under the requested key
    #[error("{entity_type} with {field}: {key} not found")]
    EntityNotFound {
        entity_type: &'static str,
        field: &'static str,
        key: String,
    },

    /// A remote resolver call failed (transport, status or payload)
    #[error("Remote {target_service} unavailable while resolving id {id}: {reason}")]
    RemoteUnavailable {
        target_service: &'static str,
        id: String,
        reason: String,
    },

    /// Malformed input to a write operation
    #[error("Validation failed: {0}")]
    ValidationFailure(String),

    /// The local store failed to execute an operation
    #[error("Storage operation failed: {0}")]
    StoreFailure(String),

    /// The request deadline elapsed; outstanding remote calls were cancelled
    #[error("Composition of {entity_type} timed out after {duration_ms}ms")]
    Timeout {
        entity_type: &'static str,
        duration_ms: u64,
    },
}

impl CompositionError {
    /// Create a not-found error for the given entity type and key
    pub fn not_found(entity_type: &'static str, key: impl fmt::Display) -> Self {
        Self::not_found_by(entity_type, "id", key)
    }

    /// Create a not-found error for a lookup on another attribute
    pub fn not_found_by(entity_type: &'static str, field: &'static str, value: impl fmt::Display) -> Self {
        Self::EntityNotFound {
            entity_type,
            field,
            key: value.to_string(),
        }
    }

    /// Create a remote-unavailable error naming the failing dependency
    pub fn remote_unavailable(
        target_service: &'static str,
        id: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::RemoteUnavailable {
            target_service,
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a validation error with a message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailure(msg.into())
    }

    /// Create a store failure with a message
    pub fn store_failure(msg: impl Into<String>) -> Self {
        Self::StoreFailure(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(entity_type: &'static str, duration_ms: u64) -> Self {
        Self::Timeout {
            entity_type,
            duration_ms,
        }
    }

    /// Whether this error originates from a local miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}

/// Result type alias for composition operations
pub type Result<T> = std::result::Result<T, CompositionError>;
