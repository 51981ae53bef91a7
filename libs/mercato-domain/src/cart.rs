//! Carts - single reference to the owning user
//!
//! A cart persists only its id and the id of its user. The user itself is
//! resolved from the user service on every read and nested under `user`.

use serde::{Deserialize, Serialize};

use crate::composition::{Composition, RemoteLinks};
use crate::error::Result;
use crate::ports::{Record, RemoteResolver};
use crate::remote::{consistent, UserInfo};

/// Persisted cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub cart_id: Option<i32>,
    pub user_id: i32,
}

impl Record for Cart {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.cart_id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.cart_id = Some(key);
        self
    }

    fn with_generated_key(self, seq: i32) -> Self {
        self.with_key(seq)
    }
}

/// Cart as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    #[serde(default)]
    pub cart_id: Option<i32>,
    pub user_id: i32,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// Enrichment policy for carts
pub struct CartComposition;

impl Composition for CartComposition {
    type Record = Cart;
    type Composed = CartDto;
    type Links = Option<UserInfo>;

    const ENTITY_TYPE: &'static str = "Cart";

    fn split(dto: CartDto) -> (Cart, Option<UserInfo>) {
        (
            Cart {
                cart_id: dto.cart_id,
                user_id: dto.user_id,
            },
            dto.user,
        )
    }

    fn join(cart: Cart, user: Option<UserInfo>) -> CartDto {
        CartDto {
            cart_id: cart.cart_id,
            user_id: cart.user_id,
            user,
        }
    }

    fn retain_consistent(cart: &Cart, user: Option<UserInfo>) -> Option<UserInfo> {
        consistent(user, cart.user_id)
    }

    fn resolve_missing<R: RemoteResolver>(
        remote: &RemoteLinks<R>,
        cart: &Cart,
        user: Option<UserInfo>,
    ) -> impl std::future::Future<Output = Result<Option<UserInfo>>> + Send {
        remote.fill(cart.user_id, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{Composer, CompositionConfig};
    use crate::remote::RemoteEndpoints;
    use crate::testing::{user_url, MemoryStore, StubResolver};

    fn service(rows: Vec<Cart>) -> Composer<CartComposition, MemoryStore<Cart>, StubResolver> {
        let resolver = StubResolver::default()
            .respond(user_url(1), serde_json::json!({ "userId": 1, "firstName": "John", "email": "john.doe@example.com" }))
            .respond(user_url(2), serde_json::json!({ "userId": 2, "firstName": "Jane" }));
        Composer::new(
            MemoryStore::with_rows(rows),
            resolver,
            RemoteEndpoints::default(),
            CompositionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_list_carts_with_user_data() {
        let service = service(vec![
            Cart { cart_id: Some(1), user_id: 1 },
            Cart { cart_id: Some(2), user_id: 2 },
        ]);

        let result = service.list().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].cart_id, Some(1));
        assert_eq!(result[1].cart_id, Some(2));
        assert_eq!(result[0].user.as_ref().unwrap().first_name.as_deref(), Some("John"));
        assert_eq!(result[1].user.as_ref().unwrap().first_name.as_deref(), Some("Jane"));
        assert_eq!(service.remote().resolver().calls_matching("/api/users/"), 2);
    }

    #[tokio::test]
    async fn test_get_cart_with_user_data() {
        let service = service(vec![Cart { cart_id: Some(1), user_id: 1 }]);

        let dto = service.get(&1).await.unwrap();

        assert_eq!(dto.user_id, 1);
        let user = dto.user.unwrap();
        assert_eq!(user.email.as_deref(), Some("john.doe@example.com"));
    }

    #[tokio::test]
    async fn test_save_cart_assigns_id() {
        let service = service(vec![]);

        let saved = service
            .save(CartDto { cart_id: None, user_id: 2, user: None })
            .await
            .unwrap();

        assert_eq!(saved.cart_id, Some(1));
        assert_eq!(saved.user_id, 2);
    }

    #[test]
    fn test_absent_user_serializes_as_null() {
        let dto = CartDto { cart_id: Some(1), user_id: 1, user: None };
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["cartId"], 1);
        assert_eq!(json["userId"], 1);
        assert!(json["user"].is_null());
    }
}
