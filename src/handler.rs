use crate::{
    config::ConfigProvider,
    error::{RelayError, Result},
    logger,
    models::{GenerationRequest, GenerationResponse, GenerationResult, TextToImagePayload},
    rapidapi::{resolve_image_url, ImageProvider},
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Status and JSON body produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    pub fn success(result: GenerationResult) -> Self {
        let body = serde_json::to_value(GenerationResponse::from(result)).unwrap_or(Value::Null);
        Self { status: 200, body }
    }

    pub fn from_error(error: &RelayError) -> Self {
        let body = serde_json::to_value(error.payload()).unwrap_or(Value::Null);
        Self {
            status: error.status_code(),
            body,
        }
    }
}

/// Validates a generation request, calls the provider and normalizes its answer.
#[derive(Clone)]
pub struct ImageHandler {
    config: Arc<dyn ConfigProvider>,
    provider: Arc<dyn ImageProvider>,
}

impl ImageHandler {
    pub fn new(
        config: impl ConfigProvider + 'static,
        provider: impl ImageProvider + 'static,
    ) -> Self {
        Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
        }
    }

    /// Runs the whole pipeline and converts every outcome into a response.
    pub async fn handle(&self, method: &str, body: &[u8]) -> HandlerResponse {
        let request_id = Uuid::new_v4();

        match self.process(&request_id, method, body).await {
            Ok(result) => HandlerResponse::success(result),
            Err(e) => {
                match &e {
                    RelayError::MethodNotAllowed(_) | RelayError::InvalidInput(_) => {
                        log::warn!("[req:{}] rejected: {}", request_id, e)
                    }
                    _ => log::error!("[req:{}] error in generate-image: {}", request_id, e),
                }
                HandlerResponse::from_error(&e)
            }
        }
    }

    /// Method, credential and body checks run in that order; the provider is
    /// only called once all three pass.
    pub async fn process(
        &self,
        request_id: &Uuid,
        method: &str,
        body: &[u8],
    ) -> Result<GenerationResult> {
        if method != "POST" {
            return Err(RelayError::MethodNotAllowed(method.to_string()));
        }

        let config = self.config.load();
        let api_key = config
            .api_key()
            .ok_or_else(|| RelayError::ConfigError("no upstream API key configured".into()))?;
        log::debug!(
            "[req:{}] API key available, length {}",
            request_id,
            api_key.len()
        );

        let prompt = GenerationRequest::prompt_from_body(body)?;
        let payload = TextToImagePayload {
            text: prompt,
            width: config.width,
            height: config.height,
        };

        let document = {
            let _timer = logger::timer(&format!("text-to-image [req:{}]", request_id));
            self.provider.text_to_image(api_key, &payload).await?
        };

        let result = resolve_image_url(&document);
        if result.is_placeholder {
            log::warn!(
                "[req:{}] upstream response had no recognized image field, returning placeholder",
                request_id
            );
        }
        Ok(result)
    }
}
