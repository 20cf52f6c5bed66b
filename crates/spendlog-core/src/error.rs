//! Error types for the spendlog-core library.

use thiserror::Error;

/// Main error type for the spendlog library.
#[derive(Error, Debug)]
pub enum SpendlogError {
    /// Text extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Request validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a receipt image into text.
///
/// These are dependent-service failures: the caller recovers by falling
/// back to whatever explicit fields were supplied.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The upload is not a decodable raster image.
    #[error("image is not a decodable raster format: {0}")]
    UndecodableImage(String),

    /// The OCR engine binary could not be started.
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The OCR engine ran but reported failure.
    #[error("OCR engine failed: {0}")]
    EngineFailed(String),

    /// The vision service call failed.
    #[error("vision service call failed: {0}")]
    Vision(String),

    /// An engine exceeded its configured time budget.
    #[error("extraction timed out after {0}s")]
    Timeout(u64),

    /// No extraction engine is configured.
    #[error("no extraction engine is configured")]
    NoEngine,
}

/// Client-caused request failures. Never persisted; surfaced as 400s.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field is missing after merging.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Automatic mode was requested without an image.
    #[error("automatic mode requires a receipt image")]
    MissingImage,

    /// A supplied field could not be interpreted.
    #[error("invalid value for {field}: {value}")]
    InvalidField {
        field: &'static str,
        value: String,
    },

    /// The mode flag is neither manual nor automatic.
    #[error("unknown transaction type: {0}")]
    UnknownMode(String),
}

/// Result type for the spendlog library.
pub type Result<T> = std::result::Result<T, SpendlogError>;
