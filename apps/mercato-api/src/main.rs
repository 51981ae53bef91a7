//! Mercato API - storefront composition services
//!
//! Serves carts, orders, payments, products, order items, favourites,
//! users, addresses, credentials and verification tokens over HTTP. Reads
//! are enriched with data fetched from the owning services; records are kept
//! in process memory.

mod config;
mod dto;
mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use mercato_domain::cart::CartComposition;
use mercato_domain::composition::{Composer, Composition, CompositionConfig};
use mercato_domain::favourite::FavouriteComposition;
use mercato_domain::order::OrderComposition;
use mercato_domain::order_item::OrderItemComposition;
use mercato_domain::payment::PaymentComposition;
use mercato_domain::product::ProductComposition;
use mercato_domain::remote::RemoteEndpoints;
use mercato_domain::user::{
    AddressComposition, CredentialComposition, UserComposition, VerificationTokenComposition,
};
use mercato_http::HttpResolver;
use mercato_memstore::InMemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Composition service of one entity type as wired in this binary
pub type Service<C> = Composer<C, InMemoryStore<<C as Composition>::Record>, HttpResolver>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub carts: Arc<Service<CartComposition>>,
    pub orders: Arc<Service<OrderComposition>>,
    pub payments: Arc<Service<PaymentComposition>>,
    pub products: Arc<Service<ProductComposition>>,
    pub order_items: Arc<Service<OrderItemComposition>>,
    pub favourites: Arc<Service<FavouriteComposition>>,
    pub users: Arc<Service<UserComposition>>,
    pub addresses: Arc<Service<AddressComposition>>,
    pub credentials: Arc<Service<CredentialComposition>>,
    pub verification_tokens: Arc<Service<VerificationTokenComposition>>,
}

impl AppState {
    /// Wire one engine per entity type over empty stores
    pub fn new(resolver: HttpResolver, endpoints: RemoteEndpoints, config: CompositionConfig) -> Self {
        fn service<C: Composition>(
            resolver: &HttpResolver,
            endpoints: &RemoteEndpoints,
            config: &CompositionConfig,
        ) -> Arc<Service<C>> {
            Arc::new(Composer::new(
                InMemoryStore::new(),
                resolver.clone(),
                endpoints.clone(),
                config.clone(),
            ))
        }

        Self {
            carts: service(&resolver, &endpoints, &config),
            orders: service(&resolver, &endpoints, &config),
            payments: service(&resolver, &endpoints, &config),
            products: service(&resolver, &endpoints, &config),
            order_items: service(&resolver, &endpoints, &config),
            favourites: service(&resolver, &endpoints, &config),
            users: service(&resolver, &endpoints, &config),
            addresses: service(&resolver, &endpoints, &config),
            credentials: service(&resolver, &endpoints, &config),
            verification_tokens: service(&resolver, &endpoints, &config),
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_json);

    info!("Starting Mercato API");
    info!(
        user_service = %config.endpoints.user,
        product_service = %config.endpoints.product,
        order_service = %config.endpoints.order,
        max_in_flight = config.composition.max_in_flight,
        "Remote endpoints configured"
    );

    let resolver =
        HttpResolver::new(config.resolver.clone()).context("Failed to create HTTP client")?;
    let state = AppState::new(resolver, config.endpoints.clone(), config.composition.clone());

    // Build HTTP router
    let app = routes::create_router(state);

    let addr = config.bind_addr();
    info!(addr = %addr, "Starting HTTP server");

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
