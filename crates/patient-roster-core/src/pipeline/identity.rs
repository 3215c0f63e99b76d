//! Identity stage: one record per `patient_id`.

use std::collections::HashSet;

use tracing::warn;

use crate::models::Patient;

/// Keep the first record for each `patient_id`, dropping later duplicates.
pub fn dedupe_by_id(patients: Vec<Patient>) -> Vec<Patient> {
    let mut seen = HashSet::with_capacity(patients.len());
    patients
        .into_iter()
        .filter(|p| {
            let first = seen.insert(p.patient_id);
            if !first {
                warn!(patient_id = p.patient_id, "dropping duplicate patient record");
            }
            first
        })
        .collect()
}
