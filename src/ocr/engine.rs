//! Recognition engine abstraction.

use async_trait::async_trait;
use thiserror::Error;

use super::page::Page;

/// Errors that can occur during a recognition attempt.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine's precondition is unmet (missing credential or binary).
    /// The cascade skips the engine without counting this as a failure.
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// An attempted recognition call failed, including structured errors
    /// reported inside an otherwise successful cloud response.
    #[error("recognition failed: {0}")]
    Failed(String),

    /// A page image could not be decoded. Fatal for the document.
    #[error("failed to decode page image: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which engine produced or attempted a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    CloudVision,
    Tesseract,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloudVision => "cloud-vision",
            Self::Tesseract => "tesseract",
        }
    }
}

/// A text recognition engine.
///
/// Engines are long-lived, process-wide resources: constructed once and
/// shared for the life of the process. Implementations must be safe for
/// concurrent use; an engine whose underlying handle is not `Sync` has to
/// serialize access to it internally.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    fn kind(&self) -> EngineKind;

    /// Whether this engine's precondition is satisfied. An unavailable
    /// engine is skipped by the cascade, not treated as a failure.
    fn is_available(&self) -> bool;

    /// Human-readable availability explanation for diagnostics.
    fn availability_hint(&self) -> String;

    /// Recognize the text on a single page.
    async fn recognize_page(&self, page: &Page) -> Result<String, OcrError>;
}
