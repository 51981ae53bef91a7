//! # Mercato In-Memory Store
//!
//! Implements the [`LocalStore`](mercato_domain::ports::LocalStore) port
//! with an ordered map guarded by an async lock. Used by the API binary when
//! no durable backend is configured, and by integration tests.

pub mod infrastructure;

pub use infrastructure::InMemoryStore;
