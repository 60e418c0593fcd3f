use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::MagpieError;

/// Application error wrapper for the HTTP layer
///
/// Wraps any error reaching a handler and maps it onto the boundary
/// contract: client-facing failures become 400 with their message,
/// everything else becomes 500 carrying the full diagnostic chain.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<MagpieError>() {
            Some(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {:#}", self.0);
            format!("{:#}", self.0)
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": detail }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
