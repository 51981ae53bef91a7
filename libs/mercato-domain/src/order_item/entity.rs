use serde::{Deserialize, Serialize};

use super::ids::OrderItemId;
use crate::composition::{Composition, RemoteLinks};
use crate::error::{CompositionError, Result};
use crate::ports::{Record, RemoteResolver};
use crate::remote::{consistent, OrderInfo, ProductInfo};

/// Persisted order item: the key pair and the ordered quantity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: i32,
    pub order_id: i32,
    pub ordered_quantity: i32,
}

impl Record for OrderItem {
    type Key = OrderItemId;

    fn key(&self) -> Option<OrderItemId> {
        Some(OrderItemId::new(self.product_id, self.order_id))
    }

    fn with_key(mut self, key: OrderItemId) -> Self {
        if let Some(product_id) = key.product_id {
            self.product_id = product_id;
        }
        if let Some(order_id) = key.order_id {
            self.order_id = order_id;
        }
        self
    }
}

/// Order item with the product and the order nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub product_id: i32,
    pub order_id: i32,
    pub ordered_quantity: i32,
    #[serde(default)]
    pub product: Option<ProductInfo>,
    #[serde(default)]
    pub order: Option<OrderInfo>,
}

/// Enrichment policy for order items
pub struct OrderItemComposition;

impl Composition for OrderItemComposition {
    type Record = OrderItem;
    type Composed = OrderItemDto;
    type Links = (Option<ProductInfo>, Option<OrderInfo>);

    const ENTITY_TYPE: &'static str = "OrderItem";

    fn split(dto: OrderItemDto) -> (OrderItem, Self::Links) {
        let item = OrderItem {
            product_id: dto.product_id,
            order_id: dto.order_id,
            ordered_quantity: dto.ordered_quantity,
        };
        (item, (dto.product, dto.order))
    }

    fn join(item: OrderItem, (product, order): Self::Links) -> OrderItemDto {
        OrderItemDto {
            product_id: item.product_id,
            order_id: item.order_id,
            ordered_quantity: item.ordered_quantity,
            product,
            order,
        }
    }

    fn retain_consistent(item: &OrderItem, (product, order): Self::Links) -> Self::Links {
        (
            consistent(product, item.product_id),
            consistent(order, item.order_id),
        )
    }

    fn resolve_missing<R: RemoteResolver>(
        remote: &RemoteLinks<R>,
        item: &OrderItem,
        (product, order): Self::Links,
    ) -> impl std::future::Future<Output = Result<Self::Links>> + Send {
        let (product_id, order_id) = (item.product_id, item.order_id);
        async move {
            tokio::try_join!(
                remote.fill(product_id, product),
                remote.fill(order_id, order)
            )
        }
    }

    fn validate(item: &OrderItem) -> Result<()> {
        if item.ordered_quantity < 0 {
            return Err(CompositionError::validation(
                "orderedQuantity must not be negative",
            ));
        }
        Ok(())
    }
}
