//! Heuristic entity-to-field assignment policy.
//!
//! Fragile by nature (first person is the claimant, first two surviving
//! locations are village and district), so it lives here as an isolated
//! policy that can be replaced without touching the extractor plumbing.

use super::entities::{Entity, EntityCategory};

/// Generic terms that NER tags as locations but that never name a real
/// village or district on a claim form.
const LOCATION_STOPLIST: &[&str] = &["india", "state", "district", "village"];

/// Fields assignable from entity spans alone. The state slot is never
/// filled here; location order is too weak a signal for it and it stays
/// with the reviewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignedFields {
    pub name: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
}

/// Assign fields from ordered entity spans.
///
/// Claimant name is the first person span. Locations are filtered
/// against the stoplist (case-insensitive); the first survivor becomes
/// the village and the second the district. Missing slots stay
/// unrecognized.
pub fn assign_fields(entities: &[Entity]) -> AssignedFields {
    let name = entities
        .iter()
        .find(|entity| entity.category == EntityCategory::Person)
        .map(|entity| entity.text.clone());

    let mut locations = entities
        .iter()
        .filter(|entity| entity.category == EntityCategory::Location)
        .map(|entity| entity.text.as_str())
        .filter(|text| !LOCATION_STOPLIST.contains(&text.to_lowercase().as_str()));

    let village = locations.next().map(str::to_string);
    let district = locations.next().map(str::to_string);

    AssignedFields {
        name,
        village,
        district,
    }
}
