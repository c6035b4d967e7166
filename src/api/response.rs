use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::utils::error::AdvisorError;

/// Every error leaves the server as `{"error": "..."}`.
impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                category = ?self.category(),
                "Request failed: {}",
                self
            );
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
