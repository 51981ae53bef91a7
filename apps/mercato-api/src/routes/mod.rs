//! API routes

pub mod entity;
pub mod keys;
pub mod openapi;

use axum::{body::Body, http::Request, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use mercato_domain::cart::CartDto;
use mercato_domain::favourite::FavouriteDto;
use mercato_domain::order::OrderDto;
use mercato_domain::order_item::OrderItemDto;
use mercato_domain::payment::{PaymentDto, PaymentStatus};
use mercato_domain::product::{Category, ProductDto};
use mercato_domain::remote::{OrderInfo, ProductInfo, UserInfo};
use mercato_domain::user::{
    AddressDto, Credential, CredentialComposition, CredentialDto, RoleBasedAuthority, UserComposition, UserDto,
    VerificationTokenDto,
};

use crate::{dto::ErrorResponse, handlers, AppState, Service};
use openapi::EntityPaths;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(health_handler),
    components(
        schemas(
            CartDto, OrderDto, PaymentDto, PaymentStatus, ProductDto, Category,
            OrderItemDto, FavouriteDto, UserDto, Credential, RoleBasedAuthority,
            AddressDto, CredentialDto, VerificationTokenDto,
            UserInfo, ProductInfo, OrderInfo, ErrorResponse
        )
    ),
    modifiers(&EntityPaths),
    tags(
        (name = "carts", description = "Carts with their owner"),
        (name = "orders", description = "Orders"),
        (name = "payments", description = "Payments with their order"),
        (name = "products", description = "Product catalogue"),
        (name = "shippings", description = "Order items with product and order"),
        (name = "favourites", description = "Liked products with user and product"),
        (name = "users", description = "Users and their credential"),
        (name = "address", description = "Addresses with their user"),
        (name = "credentials", description = "Credentials with their user"),
        (name = "verificationTokens", description = "Verification tokens with their credential"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "Mercato API",
        version = "0.1.0",
        description = "Storefront services composing local records with data owned by other services",
        contact(
            name = "Mercato Team"
        )
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let users = entity::routes(state.users.clone()).merge(
        Router::new()
            .route(
                "/username/:username",
                get(handlers::directory::find_by_username::<Service<UserComposition>>),
            )
            .with_state(state.users.clone()),
    );
    let credentials = entity::routes(state.credentials.clone()).merge(
        Router::new()
            .route(
                "/username/:username",
                get(handlers::directory::find_by_username::<Service<CredentialComposition>>),
            )
            .with_state(state.credentials.clone()),
    );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/carts", entity::routes(state.carts))
        .nest("/api/orders", entity::routes(state.orders))
        .nest("/api/payments", entity::routes(state.payments))
        .nest("/api/products", entity::routes(state.products))
        .nest("/api/shippings", entity::routes(state.order_items))
        .nest("/api/favourites", entity::routes(state.favourites))
        .nest("/api/users", users)
        .nest("/api/address", entity::routes(state.addresses))
        .nest("/api/credentials", credentials)
        .nest("/api/verificationTokens", entity::routes(state.verification_tokens))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %uuid::Uuid::now_v7(),
            )
        }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
