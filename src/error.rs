use crate::models::ErrorPayload;
use thiserror::Error;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MISSING_CREDENTIALS: &str = "API key or URL is missing in environment variables";
pub const PROMPT_REQUIRED: &str = "Prompt is required";
pub const EXTERNAL_API_ERROR: &str = "External API error";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Upstream request failed: {status} {status_text} - {body}")]
    UpstreamError {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Client error: {0}")]
    ClientError(String),
}

impl RelayError {
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::MethodNotAllowed(_) => 405,
            RelayError::InvalidInput(_) => 400,
            RelayError::ConfigError(_)
            | RelayError::UpstreamError { .. }
            | RelayError::TransportError(_)
            | RelayError::ParseError(_)
            | RelayError::ClientError(_) => 500,
        }
    }

    /// JSON body returned to the caller for this error.
    ///
    /// The first three variants answer with a fixed message. Upstream failures
    /// are reported separately from failures on our side so the caller can
    /// tell the provider rejected the request.
    pub fn payload(&self) -> ErrorPayload {
        match self {
            RelayError::MethodNotAllowed(_) => ErrorPayload::new(METHOD_NOT_ALLOWED),
            RelayError::ConfigError(_) => ErrorPayload::new(MISSING_CREDENTIALS),
            RelayError::InvalidInput(_) => ErrorPayload::new(PROMPT_REQUIRED),
            RelayError::UpstreamError { .. } => {
                ErrorPayload::new(EXTERNAL_API_ERROR).with_details(self.to_string())
            }
            RelayError::TransportError(msg)
            | RelayError::ParseError(msg)
            | RelayError::ClientError(msg) => {
                let details = if msg.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    self.to_string()
                };
                ErrorPayload::new(INTERNAL_SERVER_ERROR).with_details(details)
            }
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, RelayError::UpstreamError { .. })
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
