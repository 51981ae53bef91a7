//! # Mercato HTTP Adapter
//!
//! Implements the [`RemoteResolver`](mercato_domain::ports::RemoteResolver)
//! port over plain HTTP/JSON with `reqwest`.

pub mod infrastructure;

pub use infrastructure::{HttpResolver, HttpResolverConfig};
