//! Mapping of domain failures onto HTTP responses

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use mercato_domain::error::CompositionError;
use tracing::{error, warn};

use crate::dto::ErrorResponse;

/// Failure of a request, rendered as `{ "error": message }`
#[derive(Debug)]
pub enum ApiError {
    /// Propagated from the composition engine
    Composition(CompositionError),
    /// Path segments that do not form a key
    BadKey(String),
}

impl From<CompositionError> for ApiError {
    fn from(err: CompositionError) -> Self {
        Self::Composition(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Composition(err) => match err {
                CompositionError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
                CompositionError::ValidationFailure(_) => StatusCode::BAD_REQUEST,
                CompositionError::RemoteUnavailable { .. } => StatusCode::BAD_GATEWAY,
                CompositionError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                CompositionError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadKey(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Composition(err) => err.to_string(),
            Self::BadKey(msg) => msg,
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
