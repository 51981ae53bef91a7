//! CRUD handlers shared by every entity type
//!
//! Handlers are generic over the composition port; the router instantiates
//! them once per entity with the matching service as state.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use mercato_domain::composition::CompositionPort;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::error::ApiError;
use crate::routes::keys::RouteKey;

type Segments<P> = <<P as CompositionPort>::Key as RouteKey>::Segments;

/// Raw path capture; a rejection is reported like any other malformed key
type KeyPath<P> = Result<Path<Segments<P>>, PathRejection>;

fn route_key<P>(segments: KeyPath<P>) -> Result<P::Key, ApiError>
where
    P: CompositionPort,
    P::Key: RouteKey,
{
    let Path(segments) = segments.map_err(|rejection| ApiError::BadKey(rejection.body_text()))?;
    P::Key::from_segments(segments).map_err(ApiError::BadKey)
}

pub async fn list<P>(State(service): State<Arc<P>>) -> Result<Json<Vec<P::Composed>>, ApiError>
where
    P: CompositionPort,
    P::Composed: Serialize,
{
    debug!(entity_type = service.entity_type(), "Listing");
    let all = service.list().await?;
    info!(entity_type = service.entity_type(), count = all.len(), "Listed");
    Ok(Json(all))
}

pub async fn get<P>(
    State(service): State<Arc<P>>,
    segments: KeyPath<P>,
) -> Result<Json<P::Composed>, ApiError>
where
    P: CompositionPort,
    P::Key: RouteKey,
    P::Composed: Serialize,
{
    let key = route_key::<P>(segments)?;
    Ok(Json(service.get(&key).await?))
}

pub async fn save<P>(
    State(service): State<Arc<P>>,
    Json(body): Json<P::Composed>,
) -> Result<Json<P::Composed>, ApiError>
where
    P: CompositionPort,
    P::Composed: Serialize + DeserializeOwned,
{
    let saved = service.save(body).await?;
    info!(entity_type = service.entity_type(), "Saved");
    Ok(Json(saved))
}

pub async fn update<P>(
    State(service): State<Arc<P>>,
    Json(body): Json<P::Composed>,
) -> Result<Json<P::Composed>, ApiError>
where
    P: CompositionPort,
    P::Composed: Serialize + DeserializeOwned,
{
    Ok(Json(service.update(body).await?))
}

pub async fn update_by_key<P>(
    State(service): State<Arc<P>>,
    segments: KeyPath<P>,
    Json(body): Json<P::Composed>,
) -> Result<Json<P::Composed>, ApiError>
where
    P: CompositionPort,
    P::Key: RouteKey,
    P::Composed: Serialize + DeserializeOwned,
{
    let key = route_key::<P>(segments)?;
    Ok(Json(service.update_by_key(&key, body).await?))
}

pub async fn remove<P>(
    State(service): State<Arc<P>>,
    segments: KeyPath<P>,
) -> Result<Json<bool>, ApiError>
where
    P: CompositionPort,
    P::Key: RouteKey,
{
    let key = route_key::<P>(segments)?;
    service.remove(&key).await?;
    info!(entity_type = service.entity_type(), "Removed");
    Ok(Json(true))
}
