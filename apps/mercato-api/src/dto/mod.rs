//! DTOs owned by the HTTP layer
//!
//! Entity representations come from the domain crate; only transport-level
//! bodies live here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "Cart with id: 999 not found")]
    pub error: String,
}
