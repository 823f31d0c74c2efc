//! Primary-then-fallback recognition orchestration.
//!
//! Engines are tried in configuration order, cloud first. The first
//! attempt that yields non-empty text for the whole document wins. An
//! error on any page discards that engine's partial output entirely, so
//! text from different engines is never mixed within one document.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DigitizeConfig;
use crate::error::DigitizeError;

use super::engine::{OcrEngine, OcrError};
use super::page::{paginate, Page, SourceDocument};
use super::tesseract::TesseractEngine;
use super::vision::VisionEngine;

/// Default rasterization DPI for PDF pages.
pub const DEFAULT_RASTER_DPI: u32 = 300;

/// Ordered recognition engines with automated fallback.
pub struct RecognitionCascade {
    engines: Vec<Arc<dyn OcrEngine>>,
    dpi: u32,
}

impl RecognitionCascade {
    /// Create a cascade over an ordered engine list.
    pub fn new(engines: Vec<Arc<dyn OcrEngine>>) -> Self {
        Self {
            engines,
            dpi: DEFAULT_RASTER_DPI,
        }
    }

    /// Set the rasterization DPI for PDF pages.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Build the standard cloud-then-local cascade from configuration.
    pub fn from_config(config: &DigitizeConfig) -> Self {
        let engines: Vec<Arc<dyn OcrEngine>> = vec![
            Arc::new(VisionEngine::new(config.vision.clone())),
            Arc::new(TesseractEngine::new().with_language(&config.tesseract.language)),
        ];
        Self::new(engines).with_dpi(config.raster_dpi)
    }

    /// The configured engines, in attempt order.
    pub fn engines(&self) -> &[Arc<dyn OcrEngine>] {
        &self.engines
    }

    /// Recognize a whole document into raw text, page order preserved.
    pub async fn recognize(&self, doc: &SourceDocument) -> Result<String, DigitizeError> {
        let pages = paginate(doc, self.dpi).map_err(map_paginate_error)?;
        self.recognize_pages(&pages).await
    }

    /// Recognize already-rasterized pages.
    ///
    /// Fails with `ExtractionFailed` only when every engine is skipped,
    /// fails, or produces text that is empty after trimming.
    pub async fn recognize_pages(&self, pages: &[Page]) -> Result<String, DigitizeError> {
        for engine in &self.engines {
            if !engine.is_available() {
                debug!(engine = engine.kind().as_str(), "engine unavailable, skipping");
                continue;
            }

            match self.attempt(engine.as_ref(), pages).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!(
                        engine = engine.kind().as_str(),
                        pages = pages.len(),
                        chars = text.len(),
                        "document recognized"
                    );
                    return Ok(text);
                }
                Ok(_) => {
                    warn!(
                        engine = engine.kind().as_str(),
                        "engine produced empty text, falling through"
                    );
                }
                // Unavailability discovered mid-attempt is still not a failure.
                Err(OcrError::Unavailable(hint)) => {
                    debug!(engine = engine.kind().as_str(), hint = %hint, "engine unavailable");
                }
                // An undecodable page cannot be recovered by another engine.
                Err(OcrError::Decode(msg)) => return Err(DigitizeError::Decode(msg)),
                Err(e) => {
                    warn!(
                        engine = engine.kind().as_str(),
                        error = %e,
                        "engine attempt failed, falling through"
                    );
                }
            }
        }

        Err(DigitizeError::ExtractionFailed)
    }

    /// Run one engine over every page in order, aborting the attempt on
    /// the first per-page error. Partial results are discarded by the
    /// caller, never merged with another engine's output.
    async fn attempt(&self, engine: &dyn OcrEngine, pages: &[Page]) -> Result<String, OcrError> {
        let mut texts = Vec::with_capacity(pages.len());
        for page in pages {
            texts.push(engine.recognize_page(page).await?);
        }
        Ok(texts.join("\n"))
    }
}

fn map_paginate_error(err: OcrError) -> DigitizeError {
    match err {
        OcrError::Io(io) => DigitizeError::Io(io),
        OcrError::Decode(msg) => DigitizeError::Decode(msg),
        other => DigitizeError::Decode(other.to_string()),
    }
}
