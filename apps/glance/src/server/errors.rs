//! Maps `BrowseError` kinds to HTTP status codes and JSON error bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::file_system::BrowseError;

/// A `BrowseError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub BrowseError);

impl From<BrowseError> for ApiError {
    fn from(err: BrowseError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BrowseError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            BrowseError::NotFound { .. } => StatusCode::NOT_FOUND,
            BrowseError::NotADirectory { .. } | BrowseError::IsADirectory { .. } | BrowseError::UnsupportedType { .. } => {
                StatusCode::BAD_REQUEST
            }
            BrowseError::Processing { .. } | BrowseError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self.0);
        }

        let mut body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        if let BrowseError::AccessDenied { hint, .. } = &self.0 {
            body["hint"] = json!(hint);
        }

        (status, Json(body)).into_response()
    }
}
