//! Routes of one entity type

use std::sync::Arc;

use axum::{routing::get, Router};
use mercato_domain::composition::CompositionPort;
use serde::{de::DeserializeOwned, Serialize};

use super::keys::RouteKey;
use crate::handlers::entity::{get as get_one, list, remove, save, update, update_by_key};

/// CRUD routes for one entity, relative to its base path
///
/// `/` lists, creates and updates by embedded key; the key suffix reads,
/// updates and deletes a single entity.
pub fn routes<P>(service: Arc<P>) -> Router
where
    P: CompositionPort + 'static,
    P::Key: RouteKey,
    P::Composed: Serialize + DeserializeOwned + 'static,
{
    Router::new()
        .route("/", get(list::<P>).post(save::<P>).put(update::<P>))
        .route(
            P::Key::PATH,
            get(get_one::<P>)
                .put(update_by_key::<P>)
                .delete(remove::<P>),
        )
        .with_state(service)
}
