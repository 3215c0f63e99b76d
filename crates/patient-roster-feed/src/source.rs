//! Patient sources: the collaborator that supplies the raw collection.
//!
//! A source failure never reaches the roster pipeline. [`load_or_empty`] logs it and
//! hands back an empty collection, which renders as the "no results" state.

use std::fs;
use std::path::{Path, PathBuf};

use patient_roster_core::Patient;
use tracing::{info, warn};

use crate::feed::{dedupe_by_id, parse_patient_feed, FeedError, FeedResult};

/// Supplies the full patient collection once per session load.
pub trait PatientSource {
    fn fetch(&self) -> FeedResult<Vec<Patient>>;

    /// Name used in log output.
    fn describe(&self) -> String;
}

/// Load from `source`, degrading any failure to an empty collection.
pub fn load_or_empty(source: &dyn PatientSource) -> Vec<Patient> {
    match source.fetch() {
        Ok(patients) => {
            info!(source = %source.describe(), records = patients.len(), "patient collection loaded");
            patients
        }
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "patient collection unavailable, using empty roster");
            Vec::new()
        }
    }
}

/// Source backed by a JSON payload already in memory (e.g. a fetched response body).
#[derive(Debug, Clone)]
pub struct JsonPatientSource {
    payload: String,
}

impl JsonPatientSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl PatientSource for JsonPatientSource {
    fn fetch(&self) -> FeedResult<Vec<Patient>> {
        parse_patient_feed(&self.payload)
    }

    fn describe(&self) -> String {
        format!("json payload ({} bytes)", self.payload.len())
    }
}

/// Source reading a JSON feed file.
#[derive(Debug, Clone)]
pub struct FilePatientSource {
    path: PathBuf,
}

impl FilePatientSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PatientSource for FilePatientSource {
    fn fetch(&self) -> FeedResult<Vec<Patient>> {
        let payload = fs::read_to_string(&self.path)?;
        parse_patient_feed(&payload)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory source for fixtures and demos.
///
/// `StaticPatientSource::failing` simulates an unreachable repository.
#[derive(Debug, Clone)]
pub struct StaticPatientSource {
    patients: Option<Vec<Patient>>,
}

impl StaticPatientSource {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self {
            patients: Some(patients),
        }
    }

    pub fn failing() -> Self {
        Self { patients: None }
    }
}

impl PatientSource for StaticPatientSource {
    fn fetch(&self) -> FeedResult<Vec<Patient>> {
        self.patients
            .clone()
            .map(dedupe_by_id)
            .ok_or_else(|| FeedError::Unavailable("static source configured to fail".into()))
    }

    fn describe(&self) -> String {
        "static fixture".into()
    }
}
