use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};

/// Inbound body of `POST /api/generate-image`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerationRequest {
    /// Parses a raw request body and returns the prompt.
    ///
    /// An empty body, malformed JSON, a non-string `prompt` and an empty
    /// `prompt` are all reported as missing input.
    pub fn prompt_from_body(body: &[u8]) -> Result<String> {
        if body.is_empty() {
            return Err(RelayError::InvalidInput("request body is empty".into()));
        }

        let request: GenerationRequest = serde_json::from_slice(body)
            .map_err(|e| RelayError::InvalidInput(format!("unreadable request body: {}", e)))?;

        match request.prompt {
            Some(prompt) if !prompt.is_empty() => Ok(prompt),
            _ => Err(RelayError::InvalidInput("prompt is missing or empty".into())),
        }
    }
}

/// Outbound body sent to the text-to-image provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToImagePayload {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub image_url: String,
    /// Set when no recognized field was found and the placeholder was used.
    pub is_placeholder: bool,
}

/// Success body: `{ "message": <image url> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub message: String,
}

impl From<GenerationResult> for GenerationResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            message: result.image_url,
        }
    }
}
