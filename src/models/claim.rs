//! Claim record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::{ExtractedEntities, LandArea};

/// The structured result of digitizing one claim document.
///
/// Every field except `raw_text` is optional: `None` means the value was
/// not recognized in the text, never that extraction failed. The full
/// entity listing is kept alongside the assigned fields for audit and
/// manual review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Land-area expressions found in the text, in order of appearance.
    pub land_areas: Vec<LandArea>,
    /// Concatenated page texts, page order preserved.
    pub raw_text: String,
    /// Entity spans grouped by category, kept for review.
    pub entities: ExtractedEntities,
    /// SHA-256 hash of the source document bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    /// When this record was produced.
    pub extracted_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Number of structured fields that were recognized.
    pub fn recognized_field_count(&self) -> usize {
        [
            self.name.is_some(),
            self.village.is_some(),
            self.district.is_some(),
            self.state.is_some(),
            self.claim_type.is_some(),
            self.status.is_some(),
            self.latitude.is_some(),
            self.longitude.is_some(),
        ]
        .iter()
        .filter(|recognized| **recognized)
        .count()
    }
}
