//! Patient feed parsing.

pub use patient_roster_core::pipeline::dedupe_by_id;
use patient_roster_core::Patient;
use thiserror::Error;

/// Feed errors.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid feed format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

pub type FeedResult<T> = Result<T, FeedError>;

/// Parse a patient feed payload into records.
///
/// The payload must be a JSON array of patients; only surrounding whitespace is
/// tolerated. Duplicate ids are dropped, first one wins.
pub fn parse_patient_feed(payload: &str) -> FeedResult<Vec<Patient>> {
    let payload = payload.trim();
    if !payload.starts_with('[') {
        return Err(FeedError::InvalidFormat(
            "Feed payload is not a JSON array".into(),
        ));
    }

    let patients: Vec<Patient> = serde_json::from_str(payload)?;
    Ok(dedupe_by_id(patients))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {
            "patient_id": 1,
            "patient_name": "Anna",
            "age": 34,
            "photo_url": "https://example.com/anna.png",
            "contact": [{"address": "1 Main St", "number": "555-0100", "email": "anna@example.com"}],
            "medical_issue": "fever"
        },
        {
            "patient_id": 2,
            "patient_name": "Hannah",
            "age": 28,
            "photo_url": "",
            "contact": [],
            "medical_issue": "rash"
        }
    ]"#;

    #[test]
    fn test_parse_feed() {
        let patients = parse_patient_feed(FEED).unwrap();

        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].patient_name, "Anna");
        assert_eq!(patients[0].contact[0].number, "555-0100");
        assert!(patients[1].contact.is_empty());
        assert!(patients[1].contact_card().email.is_absent());
    }

    #[test]
    fn test_parse_with_surrounding_whitespace() {
        let payload = format!("\n  {}\n", FEED);
        let patients = parse_patient_feed(&payload).unwrap();
        assert_eq!(patients.len(), 2);
    }

    #[test]
    fn test_parse_rejects_prefixed_payload() {
        let err = parse_patient_feed(&format!("response: {}", FEED)).unwrap_err();
        assert!(matches!(err, FeedError::InvalidFormat(_)));

        let err = parse_patient_feed(&format!("[2026-10-16] body: {}", FEED)).unwrap_err();
        assert!(matches!(err, FeedError::JsonParse(_)));
    }

    #[test]
    fn test_parse_missing_contact_fields() {
        let payload = r#"[{"patient_id": 5, "patient_name": "Bob", "age": 51,
            "contact": [{"address": "9 Elm"}], "medical_issue": "headache"}]"#;
        let patients = parse_patient_feed(payload).unwrap();

        let card = patients[0].contact_card();
        assert_eq!(card.address.as_deref(), Some("9 Elm"));
        assert!(card.number.is_absent());
        assert!(card.email.is_absent());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_patient_feed(r#"{"error": "offline"}"#).unwrap_err();
        assert!(matches!(err, FeedError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_rejects_bad_record() {
        let err = parse_patient_feed(r#"[{"patient_id": "x"}]"#).unwrap_err();
        assert!(matches!(err, FeedError::JsonParse(_)));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_patient_feed("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_drops_duplicate_ids() {
        let payload = r#"[
            {"patient_id": 1, "patient_name": "Anna", "age": 34, "medical_issue": "fever"},
            {"patient_id": 1, "patient_name": "Anna Again", "age": 35, "medical_issue": "rash"}
        ]"#;
        let patients = parse_patient_feed(payload).unwrap();

        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].patient_name, "Anna");
    }
}
