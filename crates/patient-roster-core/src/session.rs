//! Roster session: the state holder driven by the host's event loop.
//!
//! Holds the raw collection (immutable until [`RosterSession::reload`]), the filter and
//! page state, and the cached filter/sort output. The collection holds one record per
//! `patient_id` and the active issues are always a subset of the issue vocabulary.
//! Invalidation rules:
//!
//! - search, issues, sort or reload → refilter, re-sort, back to page 1
//! - page size → re-slice, back to page 1
//! - page number → re-slice only
//!
//! Navigation outside `[1, page_count]` is clamped or ignored here, so the rules hold
//! even when the session is driven programmatically.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::RosterConfig;
use crate::models::{FilterState, PageState, Patient, SortOrder, ViewMode};
use crate::pipeline::{self, clamp_page, page_count, Paginator, RosterView};

/// Interactive roster state for one session.
#[derive(Debug, Clone)]
pub struct RosterSession {
    config: RosterConfig,
    paginator: Paginator,
    records: Vec<Patient>,
    vocabulary: BTreeSet<String>,
    filter: FilterState,
    page: PageState,
    view_mode: ViewMode,
    /// Filtered and sorted positions into `records`; rebuilt only when the filter state
    /// or records change
    ordered: Vec<usize>,
}

impl RosterSession {
    /// Open a session with the default configuration.
    pub fn new(records: Vec<Patient>) -> Self {
        Self::with_config(records, RosterConfig::default())
    }

    /// Open a session with an already validated configuration.
    pub fn with_config(records: Vec<Patient>, config: RosterConfig) -> Self {
        let mut session = Self {
            paginator: Paginator::new(config.page_window),
            page: PageState::first(config.default_page_size),
            config,
            records: Vec::new(),
            vocabulary: BTreeSet::new(),
            filter: FilterState::default(),
            view_mode: ViewMode::default(),
            ordered: Vec::new(),
        };
        session.reload(records);
        session
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn records(&self) -> &[Patient] {
        &self.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Issues present in the loaded collection. Unaffected by active filters.
    pub fn issue_vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn filtered_count(&self) -> usize {
        self.ordered.len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.ordered.len(), self.page.page_size)
    }

    /// Build the view for the current state.
    pub fn view(&self) -> RosterView {
        pipeline::build_view(
            &self.paginator,
            &self.records,
            &self.ordered,
            self.vocabulary.clone(),
            self.page,
        )
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Replace the raw collection. Duplicate ids are dropped, first one wins.
    ///
    /// Search and sort are kept. Active issues missing from the new vocabulary are
    /// dropped. The page resets.
    pub fn reload(&mut self, records: Vec<Patient>) {
        let records = pipeline::dedupe_by_id(records);
        self.vocabulary = pipeline::issue_vocabulary(&records);
        self.records = records;

        let vocabulary = &self.vocabulary;
        self.filter.active_issues.retain(|issue| {
            let known = vocabulary.contains(issue);
            if !known {
                debug!(issue = %issue, "active issue left the vocabulary");
            }
            known
        });

        debug!(
            records = self.records.len(),
            issues = self.vocabulary.len(),
            "roster collection loaded"
        );
        self.refilter();
    }

    // =========================================================================
    // Filter state
    // =========================================================================

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        let search_text = search_text.into();
        if self.filter.search_text != search_text {
            self.filter.search_text = search_text;
            self.refilter();
        }
    }

    /// Flip one issue filter. Issues outside the vocabulary are ignored.
    ///
    /// Returns whether the issue was toggled.
    pub fn toggle_issue(&mut self, issue: &str) -> bool {
        if !self.vocabulary.contains(issue) {
            debug!(issue, "unknown issue toggle ignored");
            return false;
        }
        self.filter.toggle_issue(issue);
        self.refilter();
        true
    }

    /// Replace the active issues. Issues outside the vocabulary are ignored.
    pub fn set_active_issues<I, S>(&mut self, issues: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let issues = self.known_issues(issues.into_iter().map(Into::into));
        if self.filter.active_issues != issues {
            self.filter.active_issues = issues;
            self.refilter();
        }
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        if self.filter.sort_order != sort_order {
            self.filter.sort_order = sort_order;
            self.refilter();
        }
    }

    /// Advance the sort control (none → ascending → descending → none).
    pub fn cycle_sort_order(&mut self) -> SortOrder {
        self.set_sort_order(self.filter.sort_order.cycle());
        self.filter.sort_order
    }

    /// Replace the whole filter state at once. Unknown issues are ignored.
    pub fn set_filter_state(&mut self, mut filter: FilterState) {
        filter.active_issues = self.known_issues(filter.active_issues);
        if self.filter != filter {
            self.filter = filter;
            self.refilter();
        }
    }

    /// Clear search, issue filters and sort.
    pub fn clear_filters(&mut self) {
        self.set_filter_state(FilterState::default());
    }

    // =========================================================================
    // Page state
    // =========================================================================

    /// Change the page size. Sizes outside the configured list are ignored.
    ///
    /// Returns whether the size was accepted.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.config.allows_page_size(page_size) {
            debug!(page_size, allowed = ?self.config.page_sizes, "page size rejected");
            return false;
        }
        if self.page.page_size != page_size {
            self.page = PageState::first(page_size);
            debug!(page_size, "page size changed");
        }
        true
    }

    /// Jump to `page`, clamped into `[1, page_count]`. Returns the resulting page.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let count = self.page_count();
        let clamped = clamp_page(page, count);
        if clamped != page {
            debug!(requested = page, clamped, page_count = count, "page request clamped");
        }
        self.page.current_page = clamped;
        clamped
    }

    /// Move back one page. No-op on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page.current_page <= 1 {
            debug!("previous page ignored on first page");
            return false;
        }
        self.page.current_page -= 1;
        true
    }

    /// Move forward one page. No-op on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page.current_page >= self.page_count() {
            debug!(page = self.page.current_page, "next page ignored on last page");
            return false;
        }
        self.page.current_page += 1;
        true
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Switch between table and card layout. Filters and page are untouched.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    fn known_issues(&self, issues: impl IntoIterator<Item = String>) -> BTreeSet<String> {
        issues
            .into_iter()
            .filter(|issue| {
                let known = self.vocabulary.contains(issue);
                if !known {
                    debug!(issue = %issue, "unknown issue ignored");
                }
                known
            })
            .collect()
    }

    fn refilter(&mut self) {
        self.ordered = pipeline::filter_and_sort_indices(&self.records, &self.filter);
        self.page.current_page = 1;
        debug!(
            filtered = self.ordered.len(),
            search_len = self.filter.search_text.len(),
            issues = self.filter.active_issues.len(),
            sort = ?self.filter.sort_order,
            "roster filters applied"
        );
    }
}
