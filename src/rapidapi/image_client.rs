use crate::{
    config::UpstreamConfig,
    error::{RelayError, Result},
    models::TextToImagePayload,
    rapidapi::ImageProvider,
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde_json::Value;

pub const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
pub const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// reqwest-backed client for the RapidAPI text-to-image endpoint.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    config: UpstreamConfig,
}

impl ImageClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);
        if config.bypass_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| RelayError::ClientError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn build_headers(&self, api_key: &str) -> Result<HeaderMap> {
        let key = HeaderValue::from_str(api_key.trim())
            .map_err(|e| RelayError::ClientError(format!("invalid API key header: {}", e)))?;
        let host = HeaderValue::from_str(&self.config.rapidapi_host)
            .map_err(|e| RelayError::ClientError(format!("invalid host header: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(RAPIDAPI_KEY_HEADER, key);
        headers.insert(RAPIDAPI_HOST_HEADER, host);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ImageProvider for ImageClient {
    async fn text_to_image(&self, api_key: &str, payload: &TextToImagePayload) -> Result<Value> {
        log::info!("Making request to: {}", self.config.endpoint);
        log::debug!(
            "Request payload: text={:?} width={} height={}",
            payload.text,
            payload.width,
            payload.height
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(self.build_headers(api_key)?)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    log::error!(
                        "Upstream did not answer within {}s",
                        self.config.timeout.as_secs_f32()
                    );
                }
                RelayError::TransportError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            log::error!(
                "API error response: status={} status_text={} body={}",
                status.as_u16(),
                status_text,
                body
            );
            return Err(RelayError::UpstreamError {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::TransportError(e.to_string()))?;
        let document: Value = serde_json::from_slice(&bytes)
            .map_err(|e| RelayError::ParseError(e.to_string()))?;

        log::debug!("API response: {}", document);
        Ok(document)
    }
}


#[cfg(all(test, feature = "server"))]
mod upstream_tests {
    use super::*;
    use crate::rapidapi::testing::spawn_upstream;
    use serde_json::json;

    fn payload() -> TextToImagePayload {
        TextToImagePayload {
            text: "a paper boat".into(),
            width: 640,
            height: 480,
        }
    }

    fn client_for(endpoint: &str) -> ImageClient {
        ImageClient::new(UpstreamConfig::new().with_endpoint(endpoint).without_proxy()).unwrap()
    }

    #[actix_web::test]
    async fn test_sends_payload_and_headers() {
        let upstream = spawn_upstream(200, r#"{"generated_image":"https://img/1.png"}"#).unwrap();
        let client = client_for(&upstream.endpoint);

        let document = client.text_to_image(" key-123 ", &payload()).await.unwrap();
        assert_eq!(document, json!({ "generated_image": "https://img/1.png" }));

        let recorded = upstream.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].api_key.as_deref(), Some("key-123"));
        assert_eq!(recorded[0].host.as_deref(), Some("chatgpt-42.p.rapidapi.com"));
        assert_eq!(recorded[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(
            recorded[0].body,
            json!({ "text": "a paper boat", "width": 640, "height": 480 })
        );
    }

    #[actix_web::test]
    async fn test_error_status_becomes_upstream_error() {
        let upstream = spawn_upstream(503, "provider overloaded").unwrap();
        let client = client_for(&upstream.endpoint);

        match client.text_to_image("key", &payload()).await {
            Err(RelayError::UpstreamError {
                status,
                status_text,
                body,
            }) => {
                assert_eq!(status, 503);
                assert_eq!(status_text, "Service Unavailable");
                assert_eq!(body, "provider overloaded");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_malformed_json_is_parse_error() {
        let upstream = spawn_upstream(200, "<html>oops</html>").unwrap();
        let client = client_for(&upstream.endpoint);

        let err = client.text_to_image("key", &payload()).await.unwrap_err();
        assert!(matches!(err, RelayError::ParseError(_)));
    }
}
