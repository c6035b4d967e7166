use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Content-Type must be application/json")]
    UnsupportedContentType,

    #[error("Invalid request body: {message}")]
    InvalidPayload { message: String },

    #[error("Failed to extract JSON: {message}")]
    ExtractionError { message: String },

    #[error("Model generation failed: {message}")]
    GenerationError { message: String },

    #[error("Model API returned {status}: {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Advisor server returned {status}: {message}")]
    ClientError { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Upstream,
    Extraction,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::MissingFields { .. }
            | AdvisorError::UnsupportedContentType
            | AdvisorError::InvalidPayload { .. } => ErrorCategory::Client,
            AdvisorError::ExtractionError { .. } => ErrorCategory::Extraction,
            AdvisorError::GenerationError { .. }
            | AdvisorError::UpstreamError { .. }
            | AdvisorError::ClientError { .. }
            | AdvisorError::HttpError(_) => ErrorCategory::Upstream,
            AdvisorError::MissingConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AdvisorError::IoError(_) | AdvisorError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client => ErrorSeverity::Low,
            ErrorCategory::Extraction => ErrorSeverity::Medium,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// HTTP 狀態碼：輸入問題為 400，其餘一律 500
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Client => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of an HTTP error body.
    pub fn public_message(&self) -> String {
        match self.category() {
            ErrorCategory::Client => self.to_string(),
            ErrorCategory::Extraction => format!("Failed to process AI response: {}", self),
            _ => format!("An error occurred: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdvisorError::MissingFields { .. } => "Fill in every required field and resubmit",
            AdvisorError::UnsupportedContentType => {
                "Send the request body as JSON with Content-Type: application/json"
            }
            AdvisorError::InvalidPayload { .. } => {
                "Check that numeric fields hold numbers and text fields hold text"
            }
            AdvisorError::ExtractionError { .. } => {
                "The model did not answer in the expected format; try the request again"
            }
            AdvisorError::GenerationError { .. } | AdvisorError::UpstreamError { .. } => {
                "Check GEMINI_API_KEY, the model name and the API quota"
            }
            AdvisorError::ClientError { .. } => "Check the request fields and the server logs",
            AdvisorError::HttpError(_) => "Check network connectivity and the configured URLs",
            AdvisorError::IoError(_) => "Check file paths and permissions",
            AdvisorError::SerializationError(_) => "Check the JSON content",
            AdvisorError::MissingConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::ConfigValidationError { .. } => {
                "Review the command line flags, the .env file and the TOML config"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Client => format!("Request rejected: {}", self),
            ErrorCategory::Extraction => format!("Could not read the model's answer: {}", self),
            ErrorCategory::Upstream => format!("The remote service failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_every_field() {
        let err = AdvisorError::MissingFields {
            fields: vec!["age".to_string(), "state".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required fields: age, state");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Missing required fields: age, state");
    }

    #[test]
    fn test_extraction_errors_are_server_errors() {
        let err = AdvisorError::ExtractionError {
            message: "EOF while parsing".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.public_message(),
            "Failed to process AI response: Failed to extract JSON: EOF while parsing"
        );
    }

    #[test]
    fn test_upstream_errors_are_generic() {
        let err = AdvisorError::UpstreamError {
            status: 403,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert!(err.public_message().starts_with("An error occurred: "));
        assert!(err.public_message().contains("API key not valid"));
    }
}
