//! Orders - no remote references
//!
//! An order belongs to a cart owned by the same service; the cart id is kept
//! as a plain local foreign key and no remote call is ever made for orders.
//! Deletes confirm existence first.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::composition::{Composition, DeletePolicy, RemoteLinks};
use crate::datetime;
use crate::error::Result;
use crate::ports::{Record, RemoteResolver};

/// Persisted order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: Option<i32>,
    pub order_date: Option<NaiveDateTime>,
    pub order_desc: Option<String>,
    pub order_fee: Option<f64>,
    pub cart_id: Option<i32>,
}

impl Record for Order {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.order_id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.order_id = Some(key);
        self
    }

    fn with_generated_key(self, seq: i32) -> Self {
        self.with_key(seq)
    }
}

/// Order as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(default)]
    pub order_id: Option<i32>,
    #[serde(default, with = "datetime::option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "15-01-2024__10:30:00:000000"))]
    pub order_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub order_desc: Option<String>,
    #[serde(default)]
    pub order_fee: Option<f64>,
    #[serde(default)]
    pub cart_id: Option<i32>,
}

/// Composition policy for orders
pub struct OrderComposition;

impl Composition for OrderComposition {
    type Record = Order;
    type Composed = OrderDto;
    type Links = ();

    const ENTITY_TYPE: &'static str = "Order";
    const DELETE_POLICY: DeletePolicy = DeletePolicy::CheckExisting;

    fn split(dto: OrderDto) -> (Order, ()) {
        let order = Order {
            order_id: dto.order_id,
            order_date: dto.order_date,
            order_desc: dto.order_desc,
            order_fee: dto.order_fee,
            cart_id: dto.cart_id,
        };
        (order, ())
    }

    fn join(order: Order, _: ()) -> OrderDto {
        OrderDto {
            order_id: order.order_id,
            order_date: order.order_date,
            order_desc: order.order_desc,
            order_fee: order.order_fee,
            cart_id: order.cart_id,
        }
    }

    fn retain_consistent(_: &Order, links: ()) {
        links
    }

    fn resolve_missing<R: RemoteResolver>(
        _remote: &RemoteLinks<R>,
        _order: &Order,
        links: (),
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        std::future::ready(Ok(links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composer;
    use crate::remote::RemoteEndpoints;
    use crate::testing::{MemoryStore, StubResolver};

    type OrderService = Composer<OrderComposition, MemoryStore<Order>, StubResolver>;

    fn order(id: i32, desc: &str, fee: f64) -> Order {
        Order {
            order_id: Some(id),
            order_date: None,
            order_desc: Some(desc.to_string()),
            order_fee: Some(fee),
            cart_id: Some(1),
        }
    }

    fn service(rows: Vec<Order>) -> OrderService {
        Composer::with_collaborators(
            MemoryStore::with_rows(rows),
            StubResolver::default(),
            RemoteEndpoints::default(),
        )
    }

    #[tokio::test]
    async fn test_list_orders_makes_no_remote_calls() {
        let service = service(vec![order(1, "Order 1", 100.0), order(2, "Order 2", 200.0)]);

        let result = service.list().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].order_desc.as_deref(), Some("Order 1"));
        assert_eq!(result[1].order_fee, Some(200.0));
        assert_eq!(service.remote().resolver().call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_existing_order_reads_then_deletes() {
        let service = service(vec![order(1, "Test Order", 100.0)]);

        service.remove(&1).await.unwrap();

        assert_eq!(service.store().reads(), 1);
        assert!(service.store().snapshot(&1).is_none());
    }

    #[tokio::test]
    async fn test_save_order_keeps_cart_reference() {
        let service = service(vec![]);

        let saved = service
            .save(OrderDto {
                order_id: None,
                order_date: None,
                order_desc: Some("New Order".to_string()),
                order_fee: Some(150.0),
                cart_id: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(saved.order_id, Some(1));
        assert_eq!(saved.cart_id, Some(1));
        assert_eq!(saved.order_desc.as_deref(), Some("New Order"));
    }
}
