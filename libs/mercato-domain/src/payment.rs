//! Payments - single reference to the paid order

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::composition::{Composition, RemoteLinks};
use crate::error::Result;
use crate::ports::{Record, RemoteResolver};
use crate::remote::{consistent, OrderInfo};

/// Progress of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        };
        f.write_str(label)
    }
}

/// Persisted payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub payment_id: Option<i32>,
    pub order_id: i32,
    pub is_payed: bool,
    pub payment_status: PaymentStatus,
}

impl Record for Payment {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.payment_id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.payment_id = Some(key);
        self
    }

    fn with_generated_key(self, seq: i32) -> Self {
        self.with_key(seq)
    }
}

/// Payment as exposed to callers, with the order nested under `order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    #[serde(default)]
    pub payment_id: Option<i32>,
    pub order_id: i32,
    pub is_payed: bool,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub order: Option<OrderInfo>,
}

/// Enrichment policy for payments
pub struct PaymentComposition;

impl Composition for PaymentComposition {
    type Record = Payment;
    type Composed = PaymentDto;
    type Links = Option<OrderInfo>;

    const ENTITY_TYPE: &'static str = "Payment";

    fn split(dto: PaymentDto) -> (Payment, Option<OrderInfo>) {
        let payment = Payment {
            payment_id: dto.payment_id,
            order_id: dto.order_id,
            is_payed: dto.is_payed,
            payment_status: dto.payment_status,
        };
        (payment, dto.order)
    }

    fn join(payment: Payment, order: Option<OrderInfo>) -> PaymentDto {
        PaymentDto {
            payment_id: payment.payment_id,
            order_id: payment.order_id,
            is_payed: payment.is_payed,
            payment_status: payment.payment_status,
            order,
        }
    }

    fn retain_consistent(payment: &Payment, order: Option<OrderInfo>) -> Option<OrderInfo> {
        consistent(order, payment.order_id)
    }

    fn resolve_missing<R: RemoteResolver>(
        remote: &RemoteLinks<R>,
        payment: &Payment,
        order: Option<OrderInfo>,
    ) -> impl std::future::Future<Output = Result<Option<OrderInfo>>> + Send {
        remote.fill(payment.order_id, order)
    }
}
