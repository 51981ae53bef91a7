//! Remote representations and their well-known addresses
//!
//! Every foreign reference points at one of a fixed set of downstream
//! services. The base address of each is part of [`RemoteEndpoints`], which is
//! injected into the engine at construction instead of living in a global.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::datetime;

/// Downstream services a local record may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteTarget {
    User,
    Product,
    Order,
}

impl RemoteTarget {
    /// Name used in logs and `RemoteUnavailable` errors
    pub fn service_name(&self) -> &'static str {
        match self {
            Self::User => "user-service",
            Self::Product => "product-service",
            Self::Order => "order-service",
        }
    }
}

/// Fixed base URL per remote entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoints {
    pub user: String,
    pub product: String,
    pub order: String,
}

impl Default for RemoteEndpoints {
    fn default() -> Self {
        Self {
            user: "http://USER-SERVICE/user-service/api/users".to_string(),
            product: "http://PRODUCT-SERVICE/product-service/api/products".to_string(),
            order: "http://ORDER-SERVICE/order-service/api/orders".to_string(),
        }
    }
}

impl RemoteEndpoints {
    /// Base URL configured for a target
    pub fn base_url(&self, target: RemoteTarget) -> &str {
        match target {
            RemoteTarget::User => &self.user,
            RemoteTarget::Product => &self.product,
            RemoteTarget::Order => &self.order,
        }
    }

    /// `base + "/" + id`
    pub fn url_for(&self, target: RemoteTarget, id: i32) -> String {
        format!("{}/{}", self.base_url(target).trim_end_matches('/'), id)
    }
}

/// A representation owned by another service
///
/// Nested under a composed representation, its identifier must equal the
/// local foreign-key value it was resolved from.
pub trait Resolved: DeserializeOwned + Send + 'static {
    /// Service that owns this representation
    const TARGET: RemoteTarget;

    /// Identifier carried by the payload, if any
    fn remote_id(&self) -> Option<i32>;

    /// Fill in the identifier of a payload that omitted it
    fn stamp_id(&mut self, id: i32);
}

/// Keep a nested object only when it agrees with the local foreign key
///
/// An object with no identifier is adopted and stamped with `id`.
pub fn consistent<T: Resolved>(nested: Option<T>, id: i32) -> Option<T> {
    match nested {
        Some(mut obj) => match obj.remote_id() {
            Some(remote) if remote != id => None,
            Some(_) => Some(obj),
            None => {
                obj.stamp_id(id);
                Some(obj)
            }
        },
        None => None,
    }
}

/// User as served by the user service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub user_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Resolved for UserInfo {
    const TARGET: RemoteTarget = RemoteTarget::User;

    fn remote_id(&self) -> Option<i32> {
        self.user_id
    }

    fn stamp_id(&mut self, id: i32) {
        self.user_id = Some(id);
    }
}

/// Product as served by the product service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInfo {
    pub product_id: Option<i32>,
    pub product_title: Option<String>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub price_unit: Option<f64>,
    pub quantity: Option<i32>,
}

impl Resolved for ProductInfo {
    const TARGET: RemoteTarget = RemoteTarget::Product;

    fn remote_id(&self) -> Option<i32> {
        self.product_id
    }

    fn stamp_id(&mut self, id: i32) {
        self.product_id = Some(id);
    }
}

/// Order as served by the order service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct OrderInfo {
    pub order_id: Option<i32>,
    #[serde(with = "datetime::option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "15-01-2024__10:30:00:000000"))]
    pub order_date: Option<NaiveDateTime>,
    pub order_desc: Option<String>,
    pub order_fee: Option<f64>,
}

impl Resolved for OrderInfo {
    const TARGET: RemoteTarget = RemoteTarget::Order;

    fn remote_id(&self) -> Option<i32> {
        self.order_id
    }

    fn stamp_id(&mut self, id: i32) {
        self.order_id = Some(id);
    }
}
