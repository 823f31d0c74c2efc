//! Field and entity extraction from recognized text.
//!
//! Two strategies feed the claim record: label-anchored regex matching
//! (deterministic, authoritative when a label is present) and named-entity
//! recognition with heuristic assignment (fills the fields the labels
//! missed). Extraction never fails; an unmatched field simply stays
//! unrecognized.

mod assign;
mod entities;
mod fields;
mod ner;

pub use assign::{assign_fields, AssignedFields};
pub use entities::{scan_land_areas, Entity, EntityCategory, ExtractedEntities, LandArea};
pub use fields::{extract_fields, ClaimFields};
pub use ner::{category_for_label, EntityRecognizer, NerError};

#[cfg(feature = "ner")]
pub use ner::BertRecognizer;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::models::ClaimRecord;

/// Extracts a structured claim record from raw recognized text.
pub struct ClaimExtractor {
    recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl ClaimExtractor {
    /// Legacy regex-only extractor: label-anchored fields, coordinates
    /// and land areas, no entity recognition.
    pub fn regex_only() -> Self {
        Self { recognizer: None }
    }

    /// Combined extractor: regex fields plus named-entity recognition
    /// with heuristic assignment for the fields regex left unrecognized.
    pub fn with_recognizer(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer: Some(recognizer),
        }
    }

    /// Extract a claim record from raw text.
    ///
    /// Never fails: a field with no match is `None`, and a recognizer
    /// error degrades to regex-only output. `raw_text` is always set
    /// from the input.
    pub fn extract(&self, raw_text: &str) -> ClaimRecord {
        let fields = extract_fields(raw_text);
        let land_areas = scan_land_areas(raw_text);

        let spans = match &self.recognizer {
            Some(recognizer) => match recognizer.recognize(raw_text) {
                Ok(spans) => spans,
                Err(e) => {
                    warn!(error = %e, "entity recognition failed, keeping regex fields only");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut entities = ExtractedEntities::from_entities(&spans);
        entities.land_areas = land_areas.clone();

        let assigned = assign_fields(&spans);

        debug!(
            entity_spans = spans.len(),
            land_areas = land_areas.len(),
            "extracted claim fields"
        );

        ClaimRecord {
            // Label-anchored matches win; heuristics only fill gaps.
            name: fields.name.or(assigned.name),
            village: fields.village.or(assigned.village),
            district: fields.district.or(assigned.district),
            // State is never assigned from entities.
            state: fields.state,
            claim_type: fields.claim_type,
            status: fields.status,
            latitude: fields.latitude,
            longitude: fields.longitude,
            land_areas,
            raw_text: raw_text.to_string(),
            entities,
            content_hash: None,
            extracted_at: Utc::now(),
        }
    }
}
