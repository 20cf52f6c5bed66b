//! Vision-model text extraction over HTTP.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::VisionConfig;

/// Prompt sent alongside the receipt image.
const RECEIPT_PROMPT: &str = "Read this receipt and reply with the total bill amount \
     and a one-line description of the purchase.";

/// Answer envelope returned by the vision endpoint.
#[derive(Debug, Deserialize)]
struct VisionAnswer {
    answer: String,
}

/// Client for a vision-model endpoint accepting an image and a prompt.
///
/// The answer text is fed through the same field parser as OCR output,
/// which keeps the client free of any vendor-specific response shape.
pub struct VisionClient {
    config: VisionConfig,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> Self {
        Self { config }
    }

    /// Ask the vision service once; the timeout bounds the whole call.
    pub async fn extract_text(&self, image: &Path) -> Result<String, ExtractionError> {
        info!("querying vision service at {}", self.config.endpoint);

        let bytes = tokio::fs::read(image)
            .await
            .map_err(|e| ExtractionError::Vision(format!("failed to read image: {e}")))?;

        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "receipt".to_string());

        let form = reqwest::multipart::Form::new()
            .text("prompt", RECEIPT_PROMPT)
            .part(
                "image",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| ExtractionError::Vision(e.to_string()))?;

        let response = client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::Timeout(self.config.timeout_secs)
                } else {
                    ExtractionError::Vision(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ExtractionError::Vision(format!(
                "service returned {}",
                response.status()
            )));
        }

        let answer: VisionAnswer = response
            .json()
            .await
            .map_err(|e| ExtractionError::Vision(e.to_string()))?;

        debug!(
            "vision service answered with {} characters",
            answer.answer.chars().count()
        );
        Ok(answer.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_a_vision_error() {
        let client = VisionClient::new(VisionConfig {
            enabled: true,
            endpoint: "http://127.0.0.1:1/answer".to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 2,
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, b"bytes").unwrap();

        let result = client.extract_text(&path).await;
        assert!(matches!(
            result,
            Err(ExtractionError::Vision(_) | ExtractionError::Timeout(_))
        ));
    }
}
