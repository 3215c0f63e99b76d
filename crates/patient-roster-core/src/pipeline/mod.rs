//! Derived-state pipeline for the roster view.
//!
//! Pipeline: Identity (dedupe) → Filter (search AND issues) → Sort (age) → Paginate → View
//!
//! Every stage after identity is a pure function of its inputs. [`recompute`] runs the
//! filter/sort/paginate pass; [`crate::session::RosterSession`] dedupes on load and caches
//! the filter/sort output as indices so page changes only re-slice.

mod filter;
mod identity;
mod paginate;
mod sort;

pub use filter::*;
pub use identity::*;
pub use paginate::*;
pub use sort::*;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{FilterState, PageState, Patient};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterView {
    /// Records on the current page, in display order
    pub patients: Vec<Patient>,
    /// Issues offered as filter toggles (from the raw collection)
    pub issue_vocabulary: BTreeSet<String>,
    pub metadata: PageMetadata,
    /// Number of records that passed the filters
    pub filtered_count: usize,
    /// Number of records in the raw collection
    pub total_count: usize,
}

impl RosterView {
    /// True when the filters left nothing to show.
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    /// "Showing X to Y of Z", or `None` when nothing is shown.
    pub fn caption(&self) -> Option<String> {
        self.metadata.caption(self.filtered_count)
    }
}

/// Filter and sort the raw collection.
pub fn filter_and_sort<'a>(records: &'a [Patient], state: &FilterState) -> Vec<&'a Patient> {
    sort_patients(filter_patients(records, state), state.sort_order)
}

/// Filter and sort, returning positions into `records` instead of references.
pub fn filter_and_sort_indices(records: &[Patient], state: &FilterState) -> Vec<usize> {
    let mut indices = filter_indices(records, state);
    sort_indices(records, &mut indices, state.sort_order);
    indices
}

/// Run the full pipeline with the default pager width.
pub fn recompute(records: &[Patient], filter: &FilterState, page: PageState) -> RosterView {
    recompute_with(&Paginator::default(), records, filter, page)
}

/// Run the full pipeline with an explicit paginator.
pub fn recompute_with(
    paginator: &Paginator,
    records: &[Patient],
    filter: &FilterState,
    page: PageState,
) -> RosterView {
    let ordered = filter_and_sort_indices(records, filter);
    build_view(paginator, records, &ordered, issue_vocabulary(records), page)
}

/// Paginate filtered and sorted positions into a view over `records`.
pub(crate) fn build_view(
    paginator: &Paginator,
    records: &[Patient],
    ordered: &[usize],
    issue_vocabulary: BTreeSet<String>,
    page: PageState,
) -> RosterView {
    let Page { items, metadata } = paginator.paginate(ordered, page);

    RosterView {
        patients: items.iter().map(|&i| records[i].clone()).collect(),
        issue_vocabulary,
        metadata,
        filtered_count: ordered.len(),
        total_count: records.len(),
    }
}
