//! Caller-facing error taxonomy for the digitization pipeline.

use thiserror::Error;

/// Errors surfaced to the caller of the pipeline.
///
/// Engine unavailability never appears here: an engine whose precondition
/// is unmet (missing credential, missing binary) silently triggers the
/// fallback step instead. Only conditions that end processing for a
/// document are surfaced.
#[derive(Debug, Error)]
pub enum DigitizeError {
    /// The document or one of its pages could not be rasterized or
    /// decoded. Fatal for this document; not retried.
    #[error("failed to decode document: {0}")]
    Decode(String),

    /// Every recognition engine was exhausted without producing non-empty
    /// text. The caller must not proceed to field extraction or
    /// persistence.
    #[error("no text could be extracted from the document")]
    ExtractionFailed,

    /// The claim store reported a failure during the duplicate check.
    #[error("store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
