//! Document digitization pipeline.
//!
//! `Digitizer` wires rasterization, the recognition cascade and the
//! claim extractor into a single entry point, and runs the duplicate
//! gate against the claim store boundary. Each call is an independent,
//! bounded sequence of stages; callers wanting a deadline wrap the call
//! in their own timeout.

use tracing::info;

use crate::config::DigitizeConfig;
use crate::error::DigitizeError;
use crate::extract::ClaimExtractor;
use crate::models::ClaimRecord;
use crate::ocr::{RecognitionCascade, SourceDocument};
use crate::dedupe::{self, DuplicateVerdict};
use crate::store::ClaimStore;

/// The document digitization pipeline.
pub struct Digitizer {
    cascade: RecognitionCascade,
    extractor: ClaimExtractor,
}

impl Digitizer {
    pub fn new(cascade: RecognitionCascade, extractor: ClaimExtractor) -> Self {
        Self { cascade, extractor }
    }

    /// Build the standard pipeline from configuration: the cloud-first
    /// cascade, and the combined regex+NER extractor when the `ner`
    /// feature is compiled in (regex-only otherwise).
    pub fn from_config(config: &DigitizeConfig) -> Self {
        let cascade = RecognitionCascade::from_config(config);

        #[cfg(feature = "ner")]
        let extractor = ClaimExtractor::with_recognizer(std::sync::Arc::new(
            crate::extract::BertRecognizer::new(),
        ));
        #[cfg(not(feature = "ner"))]
        let extractor = ClaimExtractor::regex_only();

        Self::new(cascade, extractor)
    }

    /// The recognition cascade, for engine diagnostics.
    pub fn cascade(&self) -> &RecognitionCascade {
        &self.cascade
    }

    /// Digitize one document into a claim record.
    ///
    /// Fails with `Decode` when a page cannot be rasterized or decoded,
    /// and with `ExtractionFailed` when every engine is exhausted without
    /// producing non-empty text. Field extraction itself never fails.
    pub async fn digitize(&self, doc: &SourceDocument) -> Result<ClaimRecord, DigitizeError> {
        let raw_text = self.cascade.recognize(doc).await?;

        let mut record = self.extractor.extract(&raw_text);
        record.content_hash = Some(doc.content_hash());

        info!(
            fields = record.recognized_field_count(),
            chars = record.raw_text.len(),
            "document digitized"
        );
        Ok(record)
    }

    /// Duplicate gate: look up the record's raw text in the store and
    /// compare byte-for-byte.
    pub async fn check_duplicate(
        &self,
        store: &dyn ClaimStore,
        record: &ClaimRecord,
    ) -> Result<DuplicateVerdict, DigitizeError> {
        let existing: Vec<String> = store
            .find_by_raw_text(&record.raw_text)
            .await
            .map_err(|e| DigitizeError::Store(e.to_string()))?
            .map(|stored| stored.record.raw_text)
            .into_iter()
            .collect();

        Ok(dedupe::is_duplicate(&record.raw_text, &existing))
    }
}
