//! Configuration structures for the spendlog service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SpendlogError};

/// Main configuration for the spendlog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendlogConfig {
    /// HTTP server and storage configuration.
    pub server: ServerConfig,

    /// External OCR engine configuration.
    pub ocr: OcrConfig,

    /// Vision-AI fallback configuration.
    pub vision: VisionConfig,
}

impl Default for SpendlogConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ocr: OcrConfig::default(),
            vision: VisionConfig::default(),
        }
    }
}

/// HTTP server and storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,

    /// SQLite connection URL. `DATABASE_URL` overrides this when set.
    pub database_url: String,

    /// Directory where uploaded receipt images are saved.
    pub upload_dir: PathBuf,

    /// Fixed path of the regenerated spreadsheet artifact.
    pub export_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            database_url: "sqlite:spendlog.db?mode=rwc".to_string(),
            upload_dir: PathBuf::from("uploads"),
            export_path: PathBuf::from("transactions.csv"),
        }
    }
}

/// External OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Run the external OCR engine on uploaded receipts.
    pub enabled: bool,

    /// Path or name of the OCR engine binary.
    pub engine_path: PathBuf,

    /// Recognition language passed to the engine.
    pub language: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            engine_path: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            timeout_secs: 20,
        }
    }
}

/// Vision-AI fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Ask the vision service when the OCR engine yields nothing.
    pub enabled: bool,

    /// Endpoint accepting a prompt and an image upload.
    pub endpoint: String,

    /// Bearer token sent with each request.
    pub api_key: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl SpendlogConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| SpendlogError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| SpendlogError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = SpendlogConfig::default();
        assert!(config.ocr.enabled);
        assert!(!config.vision.enabled);
        assert_eq!(config.server.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let parsed: SpendlogConfig =
            serde_json::from_str(r#"{"ocr": {"language": "deu"}}"#).unwrap();
        assert_eq!(parsed.ocr.language, "deu");
        assert!(parsed.ocr.enabled);
        assert_eq!(parsed.server.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn config_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spendlog.json");

        let mut config = SpendlogConfig::default();
        config.vision.enabled = true;
        config.vision.endpoint = "http://localhost:8080/answer".to_string();
        config.save(&path).unwrap();

        let loaded = SpendlogConfig::from_file(&path).unwrap();
        assert!(loaded.vision.enabled);
        assert_eq!(loaded.vision.endpoint, "http://localhost:8080/answer");
        assert_eq!(loaded.ocr.timeout_secs, config.ocr.timeout_secs);
    }
}
