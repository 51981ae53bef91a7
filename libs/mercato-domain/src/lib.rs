//! # Mercato Domain Layer
//!
//! This crate contains the composition engine shared by the Mercato storefront
//! services and the entity catalogue built on it. Every service owns a local
//! store of records and enriches them, on read, with representations owned by
//! other services:
//!
//! - **Engine**: [`composition::Composer`], generic over a per-entity policy
//! - **Entities**: carts, orders, payments, products, order items, favourites,
//!   users with their addresses, credentials and verification tokens
//! - **Ports**: [`ports::LocalStore`] and [`ports::RemoteResolver`]
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (HTTP clients,
//! databases, web frameworks). Stores and resolvers are expressed as traits
//! implemented by adapter crates.
//!
//! ## Example
//!
//! ```rust
//! use mercato_domain::cart::{Cart, CartComposition};
//! use mercato_domain::composition::Composer;
//! use mercato_domain::ports::{LocalStore, RemoteResolver};
//!
//! // The engine is generic over any store and resolver implementation
//! async fn example<S, R>(carts: Composer<CartComposition, S, R>) -> mercato_domain::Result<()>
//! where
//!     S: LocalStore<Cart>,
//!     R: RemoteResolver,
//! {
//!     let cart = carts.get(&1).await?;
//!     println!("Cart {:?} belongs to {:?}", cart.cart_id, cart.user);
//!     Ok(())
//! }
//! ```

pub mod cart;
pub mod composition;
pub mod datetime;
pub mod error;
pub mod favourite;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod ports;
pub mod product;
pub mod remote;
pub mod user;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use composition::{Composer, Composition, CompositionConfig, CompositionPort, EnrichmentMode};
pub use error::{CompositionError, Result};
pub use ports::{LocalStore, Record, RemoteResolver, ResolveError};
pub use remote::RemoteEndpoints;
