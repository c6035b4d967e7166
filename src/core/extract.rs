//! Best-effort JSON extraction from model free text.
//!
//! Models asked for "strict JSON" still wrap it in prose or code fences, so the
//! object is taken from the first `{` to the last `}` and parsed as-is.

use crate::utils::error::{AdvisorError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn extract_json(text: &str) -> Result<Value> {
    let start = text.find('{');
    let end = text.rfind('}');

    let json_str = match (start, end) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            return Err(AdvisorError::ExtractionError {
                message: "No JSON content found in response".to_string(),
            })
        }
    };

    let value: Value =
        serde_json::from_str(json_str).map_err(|e| AdvisorError::ExtractionError {
            message: e.to_string(),
        })?;

    if !value.is_object() {
        return Err(AdvisorError::ExtractionError {
            message: "extracted content is not a JSON object".to_string(),
        });
    }

    Ok(value)
}

/// Extracts the object and decodes it into `T`; missing fields are extraction errors too.
pub fn extract_as<T: DeserializeOwned>(text: &str) -> Result<T> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(|e| AdvisorError::ExtractionError {
        message: e.to_string(),
    })
}
