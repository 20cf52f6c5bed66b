//! OCR engine wrapper around an external recognizer binary.

use std::path::Path;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::OcrConfig;

/// Wraps the external OCR binary named in [`OcrConfig`].
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Run the engine once over the image and return its stdout transcript.
    ///
    /// The configured timeout bounds the whole run; a killed or failed
    /// engine surfaces as an error, never a panic.
    pub async fn extract_text(&self, image: &Path) -> Result<String, ExtractionError> {
        info!(
            "running OCR engine {} on {}",
            self.config.engine_path.display(),
            image.display()
        );

        let run = Command::new(&self.config.engine_path)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .kill_on_drop(true)
            .output();

        let output = timeout(Duration::from_secs(self.config.timeout_secs), run)
            .await
            .map_err(|_| ExtractionError::Timeout(self.config.timeout_secs))?
            .map_err(|e| ExtractionError::EngineUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::EngineFailed(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("OCR engine returned {} bytes of text", text.len());
        Ok(text)
    }
}
