//! Google Cloud Vision OCR engine.
//!
//! Calls the `images:annotate` endpoint with DOCUMENT_TEXT_DETECTION, one
//! request per page image at full fidelity. Availability is gated on an
//! API key; without one the cascade falls through to the local engine.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::VisionConfig;

use super::engine::{EngineKind, OcrEngine, OcrError};
use super::page::Page;

/// Cloud OCR engine backed by the Vision REST API.
pub struct VisionEngine {
    config: VisionConfig,
    client: Client,
}

/// Annotate request wire format.
#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Annotate response wire format.
#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageResponse {
    #[serde(rename = "fullTextAnnotation")]
    full_text_annotation: Option<TextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl VisionEngine {
    /// Create a new Vision engine with the given configuration.
    pub fn new(config: VisionConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Extract the recognized text from one per-image response.
    ///
    /// A populated `error` object is an engine failure even when the HTTP
    /// call itself succeeded.
    fn text_from_response(response: ImageResponse) -> Result<String, OcrError> {
        if let Some(error) = response.error {
            return Err(OcrError::Failed(format!(
                "vision error {}: {}",
                error.code, error.message
            )));
        }
        Ok(response
            .full_text_annotation
            .map(|annotation| annotation.text)
            .unwrap_or_default())
    }

    async fn annotate(&self, key: &str, page: &Page) -> Result<String, OcrError> {
        let body = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: base64::engine::general_purpose::STANDARD.encode(&page.data),
                },
                features: vec![Feature {
                    kind: "DOCUMENT_TEXT_DETECTION",
                }],
            }],
        };

        debug!(page = page.number, "annotating page via Vision");
        let resp = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| OcrError::Failed(format!("vision request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(OcrError::Failed(format!("HTTP {}: {}", status, body)));
        }

        let annotate: AnnotateResponse = resp
            .json()
            .await
            .map_err(|e| OcrError::Failed(format!("failed to parse vision response: {}", e)))?;

        let first = annotate
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| OcrError::Failed("empty annotate response".to_string()))?;

        Self::text_from_response(first)
    }
}

#[async_trait]
impl OcrEngine for VisionEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::CloudVision
    }

    fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn availability_hint(&self) -> String {
        if self.config.api_key.is_some() {
            format!("Vision API key configured ({})", self.config.endpoint)
        } else {
            "No Vision API key. Set GOOGLE_VISION_API_KEY or vision.api_key in the config"
                .to_string()
        }
    }

    async fn recognize_page(&self, page: &Page) -> Result<String, OcrError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| OcrError::Unavailable("no Vision API key configured".to_string()))?;
        self.annotate(key, page).await
    }
}
