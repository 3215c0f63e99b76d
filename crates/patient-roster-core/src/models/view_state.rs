//! User-controlled view parameters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Age ordering applied by the sort stage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Repository order
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Next state of the sort control: none → ascending → descending → none.
    pub fn cycle(self) -> Self {
        match self {
            SortOrder::None => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
        }
    }
}

/// Presentation selected by the user. Has no effect on the pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

/// Search, issue filter and sort parameters.
///
/// Any change to these invalidates the filtered/sorted sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against `patient_name`
    pub search_text: String,
    /// Selected issues; empty means no issue filter
    pub active_issues: BTreeSet<String>,
    pub sort_order: SortOrder,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    pub fn with_issues<I, S>(mut self, issues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_issues = issues.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Add the issue if absent, remove it otherwise.
    pub fn toggle_issue(&mut self, issue: &str) {
        if !self.active_issues.remove(issue) {
            self.active_issues.insert(issue.to_string());
        }
    }

    /// True when neither search nor issue filter narrows the collection.
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty() && self.active_issues.is_empty()
    }
}

/// Page position and page size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageState {
    /// 1-indexed page number
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    /// First page with the given size. A zero size is raised to 1.
    pub fn first(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Zero-based index of the first record on the current page.
    pub fn offset(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::first(crate::config::DEFAULT_PAGE_SIZE)
    }
}
