//! Engine configuration
//!
//! Immutable once the engine is built; the engine holds no other state.

use std::time::Duration;

/// What a failed remote resolution does to the enclosing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentMode {
    /// Any resolver failure fails the whole read or write
    #[default]
    FailClosed,
    /// A failed reference renders as absent and the operation continues
    Partial,
}

/// How `remove` treats a key for a given entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Delete by key; an absent key is a silent no-op
    Blind,
    /// Read first, fail with `EntityNotFound` on absence, delete the full record
    CheckExisting,
}

/// Configuration for a [`Composer`](super::Composer)
#[derive(Debug, Clone)]
pub struct CompositionConfig {
    /// Entities composed concurrently during a list (default: 8)
    pub max_in_flight: usize,
    /// Deadline for a whole `get`/`list`; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Failure policy for remote resolution (default: fail-closed)
    pub enrichment_mode: EnrichmentMode,
    /// Resolve references the caller left empty on save/update (default: false)
    pub resolve_on_write: bool,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 8,
            request_timeout: None,
            enrichment_mode: EnrichmentMode::FailClosed,
            resolve_on_write: false,
        }
    }
}
