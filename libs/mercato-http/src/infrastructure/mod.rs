//! Infrastructure adapters backed by HTTP

mod http_resolver;

pub use http_resolver::{HttpResolver, HttpResolverConfig};
