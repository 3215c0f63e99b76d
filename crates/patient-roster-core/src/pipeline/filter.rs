//! Search and issue-filter stage.
//!
//! A record passes when it matches the search text AND (no issue is selected OR its
//! issue is one of the selected ones). Relative order is preserved; the sort stage
//! relies on it for tie-breaking.

use std::collections::BTreeSet;

use crate::models::{FilterState, Patient};

/// Apply search and issue predicates, keeping input order.
pub fn filter_patients<'a>(records: &'a [Patient], state: &FilterState) -> Vec<&'a Patient> {
    let needle = state.search_text.to_lowercase();

    records
        .iter()
        .filter(|p| p.name_contains(&needle))
        .filter(|p| matches_issue(p, &state.active_issues))
        .collect()
}

/// Positions of the records that pass the filters, in input order.
pub fn filter_indices(records: &[Patient], state: &FilterState) -> Vec<usize> {
    let needle = state.search_text.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, p)| p.name_contains(&needle) && matches_issue(p, &state.active_issues))
        .map(|(i, _)| i)
        .collect()
}

fn matches_issue(patient: &Patient, active_issues: &BTreeSet<String>) -> bool {
    active_issues.is_empty() || active_issues.contains(&patient.medical_issue)
}

/// Distinct medical issues present in the collection, in lexicographic order.
pub fn issue_vocabulary(records: &[Patient]) -> BTreeSet<String> {
    records.iter().map(|p| p.medical_issue.clone()).collect()
}
