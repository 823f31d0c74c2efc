//! Configuration for the digitization pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

fn default_vision_endpoint() -> String {
    "https://vision.googleapis.com/v1/images:annotate".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_raster_dpi() -> u32 {
    300
}

/// Cloud Vision engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// API key for the Vision endpoint. Absence means the cloud engine
    /// is unavailable and the cascade goes straight to the local engine.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_vision_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_vision_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Local Tesseract engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseractConfig {
    /// Tesseract language setting.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitizeConfig {
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub tesseract: TesseractConfig,
    /// Rasterization DPI for PDF pages.
    #[serde(default = "default_raster_dpi")]
    pub raster_dpi: u32,
}

impl Default for DigitizeConfig {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            tesseract: TesseractConfig::default(),
            raster_dpi: default_raster_dpi(),
        }
    }
}

impl DigitizeConfig {
    /// Load configuration from a TOML file if given, otherwise defaults,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides. The Vision key is the
    /// credential-presence fact that gates the cloud engine.
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GOOGLE_VISION_API_KEY") {
            if !key.is_empty() {
                self.vision.api_key = Some(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DigitizeConfig::default();
        assert!(config.vision.api_key.is_none());
        assert!(config.vision.endpoint.contains("images:annotate"));
        assert_eq!(config.tesseract.language, "eng");
        assert_eq!(config.raster_dpi, 300);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: DigitizeConfig = toml::from_str(
            r#"
            raster_dpi = 150

            [vision]
            api_key = "test-key"
            "#,
        )
        .unwrap();
        assert_eq!(config.raster_dpi, 150);
        assert_eq!(config.vision.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.vision.timeout_seconds, 30);
        assert_eq!(config.tesseract.language, "eng");
    }
}
