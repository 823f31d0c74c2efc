//! Entity spans and land-area expressions.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category tags produced by named-entity recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Person,
    /// Geo-political entity or location.
    Location,
    Date,
    Organization,
}

/// One recognized entity span. Spans keep document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub category: EntityCategory,
}

/// A land-area expression such as "4.5 hectares".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandArea {
    pub value: f64,
    /// Unit text as written in the document.
    pub unit: String,
}

/// Entity spans grouped by category, each group in original document
/// order, plus the independently scanned land areas. Kept on the claim
/// record for audit and manual review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub persons: Vec<String>,
    pub locations: Vec<String>,
    pub dates: Vec<String>,
    pub organizations: Vec<String>,
    pub land_areas: Vec<LandArea>,
}

impl ExtractedEntities {
    /// Group ordered entity spans by category.
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut grouped = Self::default();
        for entity in entities {
            let bucket = match entity.category {
                EntityCategory::Person => &mut grouped.persons,
                EntityCategory::Location => &mut grouped.locations,
                EntityCategory::Date => &mut grouped.dates,
                EntityCategory::Organization => &mut grouped.organizations,
            };
            bucket.push(entity.text.clone());
        }
        grouped
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
            && self.locations.is_empty()
            && self.dates.is_empty()
            && self.organizations.is_empty()
            && self.land_areas.is_empty()
    }
}

static LAND_AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(hectares?|acres?)").unwrap());

/// Scan raw text for land-area expressions, in order of appearance.
/// Unit text is kept as written.
pub fn scan_land_areas(text: &str) -> Vec<LandArea> {
    LAND_AREA
        .captures_iter(text)
        .filter_map(|cap| {
            let value: f64 = cap[1].parse().ok()?;
            Some(LandArea {
                value,
                unit: cap[2].to_string(),
            })
        })
        .collect()
}
