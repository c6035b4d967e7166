use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::RequiredFields;
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::validate_required_keys;

/// `axum::Json` whose rejections are reported as [`AdvisorError`] bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AdvisorError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AdvisorError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => AdvisorError::UnsupportedContentType,
            other => AdvisorError::InvalidPayload {
                message: other.body_text(),
            },
        }
    }
}

/// Checks required keys on the raw object, then decodes it into `T`.
pub fn parse_request<T>(payload: Value) -> Result<T>
where
    T: RequiredFields + DeserializeOwned,
{
    validate_required_keys(&payload, T::REQUIRED)?;
    serde_json::from_value(payload).map_err(|e| AdvisorError::InvalidPayload {
        message: e.to_string(),
    })
}
