use reqwest::StatusCode;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// HTTP request error (connect, timeout, body read)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Upstream API returned a non-success status
    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: StatusCode, message: String },
    /// Provider answered without any response text
    #[error("No data returned from provider")]
    EmptyResponse,
    /// Response text was not a JSON document of the expected shape
    #[error("Invalid benchmark payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// Payload parsed but a required field is absent
    #[error("Benchmark payload is missing required field '{0}'")]
    MissingField(&'static str),
    /// View transition attempted from the wrong state
    #[error("Cannot {event} while in {from:?} view")]
    InvalidTransition {
        from: crate::view::ViewState,
        event: &'static str,
    },
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Short machine-readable name, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HttpRequest(_) => "http_request_error",
            Self::UpstreamError { .. } => "upstream_error",
            Self::EmptyResponse => "empty_response",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::MissingField(_) => "missing_field",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::InternalError(_) => "internal_error",
        }
    }
}
