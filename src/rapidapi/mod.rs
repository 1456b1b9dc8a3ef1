pub mod extract;
pub mod image_client;
#[cfg(all(test, feature = "server"))]
pub(crate) mod testing;

use crate::{error::Result, models::TextToImagePayload};
use async_trait::async_trait;
use serde_json::Value;

pub use extract::{resolve_image_url, PLACEHOLDER_IMAGE_URL};
pub use image_client::ImageClient;

/// Outbound text-to-image call. Returns the provider's JSON body untouched;
/// callers decide how to read a URL out of it.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn text_to_image(&self, api_key: &str, payload: &TextToImagePayload) -> Result<Value>;
}
