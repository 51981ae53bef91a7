//! Composition engine module
//!
//! Orchestrates local store reads/writes with remote resolution of foreign
//! references, for single reads, ordered list fan-out, writes and deletes.

mod config;
mod engine;
mod links;
mod port;

pub use config::{CompositionConfig, DeletePolicy, EnrichmentMode};
pub use engine::{Composer, Composition};
pub use links::RemoteLinks;
pub use port::CompositionPort;
