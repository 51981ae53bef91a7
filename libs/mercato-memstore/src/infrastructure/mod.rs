//! Infrastructure adapters backed by process memory

mod memory_store;

pub use memory_store::InMemoryStore;
