//! Receipt text extraction engines.
//!
//! Turns an uploaded image into raw text, either by shelling out to an
//! external OCR engine or by asking a vision model. One attempt per engine
//! per request, no caching, no retry; failures surface as
//! [`ExtractionError`] for the assembler to recover from.

mod tesseract;
mod vision;

pub use tesseract::TesseractEngine;
pub use vision::VisionClient;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::config::{OcrConfig, VisionConfig};

/// Ordered fallback chain over the configured extraction engines.
pub struct TextExtractor {
    ocr: Option<TesseractEngine>,
    vision: Option<VisionClient>,
}

impl TextExtractor {
    pub fn from_config(ocr: &OcrConfig, vision: &VisionConfig) -> Self {
        Self {
            ocr: ocr.enabled.then(|| TesseractEngine::new(ocr.clone())),
            vision: vision.enabled.then(|| VisionClient::new(vision.clone())),
        }
    }

    /// Extract raw text from the image: OCR first, vision second.
    ///
    /// The image must decode as a raster format before any engine runs.
    pub async fn extract_text(&self, image: &Path) -> Result<String, ExtractionError> {
        image::open(image).map_err(|e| ExtractionError::UndecodableImage(e.to_string()))?;

        let ocr_error = match &self.ocr {
            Some(engine) => match engine.extract_text(image).await {
                Ok(text) => {
                    debug!("OCR engine produced {} characters", text.chars().count());
                    return Ok(text);
                }
                Err(err) => {
                    warn!("OCR extraction failed: {err}");
                    Some(err)
                }
            },
            None => None,
        };

        if let Some(client) = &self.vision {
            return match client.extract_text(image).await {
                Ok(text) => {
                    debug!("vision service produced {} characters", text.chars().count());
                    Ok(text)
                }
                Err(err) => {
                    warn!("vision extraction failed: {err}");
                    Err(err)
                }
            };
        }

        Err(ocr_error.unwrap_or(ExtractionError::NoEngine))
    }
}
