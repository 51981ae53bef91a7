use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ports::EntityKey;

/// Composite key of an order item
///
/// Components come straight from callers and may be missing. A key with a
/// missing component is incomplete and never matches a stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemId {
    pub product_id: Option<i32>,
    pub order_id: Option<i32>,
}

impl OrderItemId {
    /// Create a complete key
    pub fn new(product_id: i32, order_id: i32) -> Self {
        Self {
            product_id: Some(product_id),
            order_id: Some(order_id),
        }
    }
}

impl EntityKey for OrderItemId {
    fn is_complete(&self) -> bool {
        self.product_id.is_some() && self.order_id.is_some()
    }
}

impl fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrderItemId(productId={}, orderId={})",
            component(self.product_id),
            component(self.order_id)
        )
    }
}

fn component(value: Option<i32>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}
