//! Username lookups shared by users and credentials

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use mercato_domain::user::UsernameDirectory;
use serde::Serialize;

use super::error::ApiError;

pub async fn find_by_username<D>(
    State(directory): State<Arc<D>>,
    Path(username): Path<String>,
) -> Result<Json<D::Composed>, ApiError>
where
    D: UsernameDirectory,
    D::Composed: Serialize,
{
    Ok(Json(directory.find_by_username(&username).await?))
}
