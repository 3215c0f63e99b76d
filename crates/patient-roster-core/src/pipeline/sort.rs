//! Age sort stage.
//!
//! Age is the only key. `slice::sort_by` is stable, so equal ages keep the order
//! produced by the filter stage in both directions.

use crate::models::{Patient, SortOrder};

/// Order records by age, or leave them untouched for [`SortOrder::None`].
pub fn sort_patients(mut records: Vec<&Patient>, order: SortOrder) -> Vec<&Patient> {
    match order {
        SortOrder::None => {}
        SortOrder::Ascending => records.sort_by(|a, b| a.age.cmp(&b.age)),
        SortOrder::Descending => records.sort_by(|a, b| b.age.cmp(&a.age)),
    }
    records
}

/// Order positions into `records` by age. Same tie-breaking as [`sort_patients`].
pub fn sort_indices(records: &[Patient], indices: &mut [usize], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::Ascending => indices.sort_by_key(|&i| records[i].age),
        SortOrder::Descending => indices.sort_by(|&a, &b| records[b].age.cmp(&records[a].age)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Patient> {
        vec![
            Patient::new(1, "A".into(), 7, "Fever".into()),
            Patient::new(2, "B".into(), 5, "Fever".into()),
            Patient::new(3, "C".into(), 7, "Rash".into()),
            Patient::new(4, "D".into(), 3, "Rash".into()),
            Patient::new(5, "E".into(), 5, "Rash".into()),
        ]
    }

    fn sorted_ids(records: &[Patient], order: SortOrder) -> Vec<u32> {
        sort_patients(records.iter().collect(), order)
            .iter()
            .map(|p| p.patient_id)
            .collect()
    }

    #[test]
    fn test_none_keeps_repository_order() {
        assert_eq!(sorted_ids(&roster(), SortOrder::None), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ascending_is_stable() {
        assert_eq!(sorted_ids(&roster(), SortOrder::Ascending), vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn test_descending_is_stable() {
        // Ties keep input order; descending is not ascending reversed.
        assert_eq!(sorted_ids(&roster(), SortOrder::Descending), vec![1, 3, 2, 5, 4]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_patients(Vec::new(), SortOrder::Ascending).is_empty());
    }

    #[test]
    fn test_indices_match_reference_sort() {
        let records = roster();
        for order in [SortOrder::None, SortOrder::Ascending, SortOrder::Descending] {
            let mut indices: Vec<usize> = (0..records.len()).collect();
            sort_indices(&records, &mut indices, order);
            let ids: Vec<u32> = indices.iter().map(|&i| records[i].patient_id).collect();
            assert_eq!(ids, sorted_ids(&records, order), "order {:?}", order);
        }
    }
}
