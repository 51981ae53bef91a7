//! Favourite domain module
//!
//! A favourite marks a product liked by a user at a given instant. The
//! triple (user, product, instant) is the key; user and product are both
//! resolved remotely.

mod entity;
mod ids;

pub use entity::{Favourite, FavouriteComposition, FavouriteDto};
pub use ids::FavouriteId;
