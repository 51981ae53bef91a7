use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use httpmock::MockServer;
use mercato_domain::composition::CompositionConfig;
use mercato_domain::remote::RemoteEndpoints;
use mercato_http::{HttpResolver, HttpResolverConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::create_router;
use crate::AppState;

fn app(server: &MockServer, config: CompositionConfig) -> Router {
    let endpoints = RemoteEndpoints {
        user: server.url("/user-service/api/users"),
        product: server.url("/product-service/api/products"),
        order: server.url("/order-service/api/orders"),
    };
    let resolver = HttpResolver::new(HttpResolverConfig::default()).unwrap();
    create_router(AppState::new(resolver, endpoints, config))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn mock_user(server: &MockServer, id: i32, first_name: &str) {
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path(format!("/user-service/api/users/{}", id));
            then.status(200)
                .json_body(json!({ "userId": id, "firstName": first_name }));
        })
        .await;
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn test_product_lifecycle() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({
            "productTitle": "New Keyboard",
            "sku": "KEYB-001",
            "priceUnit": 75.5,
            "quantity": 0,
            "category": { "categoryId": 1, "categoryTitle": "Electronics" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["productId"], 1);

    let (status, fetched) = send(&app, Method::GET, "/api/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["productTitle"], "New Keyboard");
    assert_eq!(fetched["category"]["categoryTitle"], "Electronics");

    let (status, listed) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, deleted) = send(&app, Method::DELETE, "/api/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, Value::Bool(true));
}

#[tokio::test]
async fn test_missing_entity_is_404_with_message() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, body) = send(&app, Method::GET, "/api/orders/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order with id: 999 not found");
}

#[tokio::test]
async fn test_delete_follows_entity_policy() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, _) = send(&app, Method::DELETE, "/api/orders/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/api/carts/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Bool(true));
}

#[tokio::test]
async fn test_cart_is_enriched_with_user() {
    let server = MockServer::start_async().await;
    mock_user(&server, 7, "John").await;
    let app = app(&server, CompositionConfig::default());

    let (status, _) = send(&app, Method::POST, "/api/carts", Some(json!({ "userId": 7 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/api/carts/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], 7);
    assert_eq!(body["user"]["userId"], 7);
    assert_eq!(body["user"]["firstName"], "John");
}

#[tokio::test]
async fn test_unavailable_user_service_is_502() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/user-service/api/users/3");
            then.status(500);
        })
        .await;
    let app = app(&server, CompositionConfig::default());
    send(&app, Method::POST, "/api/carts", Some(json!({ "userId": 3 }))).await;

    let (status, body) = send(&app, Method::GET, "/api/carts", None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("user-service"));
}

#[tokio::test]
async fn test_slow_dependency_is_504() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/order-service/api/orders/1");
            then.status(200)
                .json_body(json!({ "orderId": 1 }))
                .delay(Duration::from_millis(500));
        })
        .await;
    let config = CompositionConfig {
        request_timeout: Some(Duration::from_millis(50)),
        ..CompositionConfig::default()
    };
    let app = app(&server, config);
    send(
        &app,
        Method::POST,
        "/api/payments",
        Some(json!({ "orderId": 1, "isPayed": false, "paymentStatus": "NOT_STARTED" })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/payments/1", None).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Composition of Payment timed out after 50ms");
}

#[tokio::test]
async fn test_order_item_addressed_by_composite_path() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/product-service/api/products/2");
            then.status(200)
                .json_body(json!({ "productId": 2, "productTitle": "Product 2" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/order-service/api/orders/1");
            then.status(200)
                .json_body(json!({ "orderId": 1, "orderDesc": "Test Order 1" }));
        })
        .await;
    let app = app(&server, CompositionConfig::default());

    let (status, saved) = send(
        &app,
        Method::POST,
        "/api/shippings",
        Some(json!({
            "productId": 2,
            "orderId": 1,
            "orderedQuantity": 1,
            "product": { "productId": 2, "productTitle": "Echoed" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["product"]["productTitle"], "Echoed");

    let (status, body) = send(&app, Method::GET, "/api/shippings/2/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderedQuantity"], 1);
    assert_eq!(body["product"]["productTitle"], "Product 2");
    assert_eq!(body["order"]["orderDesc"], "Test Order 1");
}

#[tokio::test]
async fn test_favourite_with_malformed_date_is_400() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, body) = send(&app, Method::GET, "/api/favourites/1/1/yesterday", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("likeDate"));
}

#[tokio::test]
async fn test_update_without_key_is_400() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, body) = send(&app, Method::PUT, "/api/carts", Some(json!({ "userId": 1 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Validation failed"));
}

#[tokio::test]
async fn test_user_found_by_username() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());
    send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({
            "firstName": "John",
            "credential": { "username": "testuser", "password": "secret", "roleBasedAuthority": "ROLE_USER" }
        })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/users/username/testuser", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["credential"]["userId"], 1);

    let (status, body) = send(&app, Method::GET, "/api/users/username/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User with username: nobody not found");
}

#[tokio::test]
async fn test_openapi_lists_entity_routes() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/carts"));
    assert!(paths.contains_key("/api/shippings/{productId}/{orderId}"));
    assert!(paths.contains_key("/api/favourites/{userId}/{productId}/{likeDate}"));
    assert!(paths["/api/orders/{orderId}"].get("delete").is_some());
    assert!(paths.contains_key("/api/address/{addressId}"));
    assert!(paths.contains_key("/api/credentials/{credentialId}"));
    assert!(paths.contains_key("/api/verificationTokens/{verificationTokenId}"));
}

#[tokio::test]
async fn test_non_numeric_key_is_400_with_json_body() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    for (method, uri, body) in [
        (Method::GET, "/api/carts/abc", None),
        (Method::PUT, "/api/carts/abc", Some(json!({ "userId": 1 }))),
        (Method::DELETE, "/api/shippings/1/abc", None),
    ] {
        let (status, body) = send(&app, method, uri, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{} answered {:?}", uri, body);
    }
}

#[tokio::test]
async fn test_credential_found_by_username() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());
    let (status, saved) = send(
        &app,
        Method::POST,
        "/api/credentials",
        Some(json!({
            "username": "testuser",
            "password": "secret",
            "roleBasedAuthority": "ROLE_USER",
            "isEnabled": true,
            "user": { "userId": 1, "firstName": "John" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["credentialId"], 1);

    let (status, body) = send(&app, Method::GET, "/api/credentials/username/testuser", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["firstName"], "John");

    let (status, body) = send(&app, Method::GET, "/api/credentials/username/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Credential with username: nonexistent not found");
}

#[tokio::test]
async fn test_verification_token_and_address_routes() {
    let server = MockServer::start_async().await;
    let app = app(&server, CompositionConfig::default());

    let (status, token) = send(
        &app,
        Method::POST,
        "/api/verificationTokens",
        Some(json!({
            "token": "abc123-def456-ghi789",
            "expireDate": "16-01-2024",
            "credential": { "credentialId": 1, "username": "testuser" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["expireDate"], "16-01-2024");

    let (status, body) = send(&app, Method::GET, "/api/verificationTokens/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credential"]["username"], "testuser");

    let (status, body) = send(&app, Method::GET, "/api/verificationTokens/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "VerificationToken with id: 999 not found");

    send(
        &app,
        Method::POST,
        "/api/address",
        Some(json!({ "city": "Miami", "user": { "userId": 1, "firstName": "John" } })),
    )
    .await;
    let (status, listed) = send(&app, Method::GET, "/api/address", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["city"], "Miami");
    assert_eq!(listed[0]["user"]["firstName"], "John");
}
