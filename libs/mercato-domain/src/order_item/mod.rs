//! Shipping domain module
//!
//! Order items are addressed by the pair (product, order) and reference both
//! remotely. Both references of one item are resolved concurrently.

mod entity;
mod ids;

pub use entity::{OrderItem, OrderItemComposition, OrderItemDto};
pub use ids::OrderItemId;
