use crate::utils::error::{AdvisorError, Result};
use serde_json::{Map, Value};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AdvisorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AdvisorError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 檢查請求 JSON 是否包含所有必填欄位（只看 key 是否存在）
///
/// Every missing key is reported in one error, in the order given by `required`.
pub fn validate_required_keys<'a>(
    payload: &'a Value,
    required: &[&str],
) -> Result<&'a Map<String, Value>> {
    let object = payload
        .as_object()
        .ok_or_else(|| AdvisorError::InvalidPayload {
            message: "request body must be a JSON object".to_string(),
        })?;

    let missing: Vec<String> = required
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AdvisorError::MissingFields { fields: missing });
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base", "https://example.com").is_ok());
        assert!(validate_url("api_base", "http://example.com").is_ok());
        assert!(validate_url("api_base", "").is_err());
        assert!(validate_url("api_base", "invalid-url").is_err());
        assert!(validate_url("api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_secs", 60, 1, 600).is_ok());
        assert!(validate_range("timeout_secs", 0, 1, 600).is_err());
        assert!(validate_range("timeout_secs", 601, 1, 600).is_err());
    }

    #[test]
    fn test_required_keys_present() {
        let payload = json!({"scheme_name": "PM-KISAN", "extra": 1});
        let object = validate_required_keys(&payload, &["scheme_name"]).unwrap();
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_required_keys_reports_all_missing_in_order() {
        let payload = json!({"age": 30, "state": "Bihar"});
        let err = validate_required_keys(&payload, &["age", "income", "state", "occupation"])
            .unwrap_err();
        match err {
            AdvisorError::MissingFields { fields } => {
                assert_eq!(fields, vec!["income".to_string(), "occupation".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_value_counts_as_present() {
        let payload = json!({"scheme_name": null});
        assert!(validate_required_keys(&payload, &["scheme_name"]).is_ok());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let payload = json!(["age", "income"]);
        let err = validate_required_keys(&payload, &["age"]).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidPayload { .. }));
    }
}
