//! Pagination engine.
//!
//! Slices the filtered and sorted sequence into the current page and computes the
//! metadata the pager needs: page count, visible range and the sliding window of
//! page buttons.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_WINDOW;
use crate::models::PageState;

/// Pager metadata for one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMetadata {
    /// Always at least 1, even for an empty sequence
    pub page_count: usize,
    /// Page that was requested, not clamped. The window and the previous/next flags
    /// use the clamped page, so a request past the end still offers a way back.
    pub current_page: usize,
    pub page_size: usize,
    /// 1-based (first, last) positions shown, `None` when nothing is shown
    pub visible_range: Option<(usize, usize)>,
    /// Page numbers offered as buttons
    pub page_window: Vec<usize>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl PageMetadata {
    /// "Showing X to Y of Z" caption, suppressed when nothing is shown.
    pub fn caption(&self, total: usize) -> Option<String> {
        self.visible_range
            .map(|(first, last)| format!("Showing {} to {} of {}", first, last, total))
    }
}

/// A page of records with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub metadata: PageMetadata,
}

/// Number of pages for `total` records, never less than 1.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, page_count]`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Paginator with a configurable number of page buttons.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    window: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_WINDOW)
    }
}

impl Paginator {
    /// Create a paginator showing up to `window` page buttons.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Slice `records` for `page` and compute its metadata.
    ///
    /// A page past the end yields an empty slice rather than an error.
    pub fn paginate<'a, T>(&self, records: &'a [T], page: PageState) -> Page<'a, T> {
        let total = records.len();
        let page_size = page.page_size.max(1);
        let count = page_count(total, page_size);

        let start = page.offset().min(total);
        let end = start.saturating_add(page_size).min(total);
        let items = &records[start..end];

        let current = clamp_page(page.current_page, count);
        let visible_range = if items.is_empty() {
            None
        } else {
            Some((start + 1, end))
        };

        Page {
            items,
            metadata: PageMetadata {
                page_count: count,
                current_page: page.current_page,
                page_size,
                visible_range,
                page_window: self.page_window(current, count),
                can_go_previous: current > 1,
                can_go_next: current < count,
            },
        }
    }

    /// Page numbers for the pager, sliding to keep `current_page` visible.
    ///
    /// With a window of 5: all pages when there are at most 5, `1..=5` near the start,
    /// the last 5 near the end, otherwise `current-2..=current+2`.
    pub fn page_window(&self, current_page: usize, page_count: usize) -> Vec<usize> {
        let count = page_count.max(1);
        if count <= self.window {
            return (1..=count).collect();
        }

        let current = clamp_page(current_page, count);
        let half = self.window / 2;
        let first = if current <= half + 1 {
            1
        } else if current >= count - half {
            count - self.window + 1
        } else {
            current - half
        };

        (first..first + self.window).collect()
    }
}

/// Paginate with the default five-button window.
pub fn paginate<T>(records: &[T], page: PageState) -> Page<'_, T> {
    Paginator::default().paginate(records, page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(current_page: usize, page_size: usize) -> PageState {
        PageState {
            current_page,
            page_size,
        }
    }

    #[test]
    fn test_twelve_records_two_pages() {
        let records: Vec<u32> = (1..=12).collect();

        let first = paginate(&records, page(1, 10));
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.metadata.page_count, 2);
        assert_eq!(first.metadata.visible_range, Some((1, 10)));
        assert!(!first.metadata.can_go_previous);
        assert!(first.metadata.can_go_next);

        let second = paginate(&records, page(2, 10));
        assert_eq!(second.items, &[11, 12]);
        assert_eq!(second.metadata.visible_range, Some((11, 12)));
        assert!(second.metadata.can_go_previous);
        assert!(!second.metadata.can_go_next);
        assert_eq!(
            second.metadata.caption(records.len()).as_deref(),
            Some("Showing 11 to 12 of 12")
        );
    }

    #[test]
    fn test_empty_records() {
        let records: Vec<u32> = Vec::new();
        let result = paginate(&records, page(1, 10));

        assert!(result.items.is_empty());
        assert_eq!(result.metadata.page_count, 1);
        assert_eq!(result.metadata.visible_range, None);
        assert_eq!(result.metadata.caption(0), None);
        assert_eq!(result.metadata.page_window, vec![1]);
        assert!(!result.metadata.can_go_previous);
        assert!(!result.metadata.can_go_next);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let records: Vec<u32> = (1..=5).collect();
        let result = paginate(&records, page(4, 10));

        assert!(result.items.is_empty());
        assert_eq!(result.metadata.visible_range, None);
        assert_eq!(result.metadata.page_count, 1);
        assert_eq!(result.metadata.current_page, 4);
        assert!(!result.metadata.can_go_previous);
        assert!(!result.metadata.can_go_next);
    }

    #[test]
    fn test_page_past_end_flags_follow_last_page() {
        let records: Vec<u32> = (1..=15).collect();
        let result = paginate(&records, page(9, 10));

        assert!(result.items.is_empty());
        assert_eq!(result.metadata.page_window, vec![1, 2]);
        assert!(result.metadata.can_go_previous);
        assert!(!result.metadata.can_go_next);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let records: Vec<u32> = (1..=20).collect();
        let result = paginate(&records, page(2, 10));
        assert_eq!(result.metadata.page_count, 2);
        assert_eq!(result.metadata.visible_range, Some((11, 20)));
    }

    #[test]
    fn test_window_small_page_count() {
        let paginator = Paginator::default();
        assert_eq!(paginator.page_window(1, 1), vec![1]);
        assert_eq!(paginator.page_window(2, 3), vec![1, 2, 3]);
        assert_eq!(paginator.page_window(5, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_slides() {
        let paginator = Paginator::default();
        assert_eq!(paginator.page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginator.page_window(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginator.page_window(4, 10), vec![2, 3, 4, 5, 6]);
        assert_eq!(paginator.page_window(7, 10), vec![5, 6, 7, 8, 9]);
        assert_eq!(paginator.page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(paginator.page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_six_pages() {
        let paginator = Paginator::default();
        assert_eq!(paginator.page_window(3, 6), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginator.page_window(4, 6), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_custom_window_width() {
        let paginator = Paginator::new(3);
        assert_eq!(paginator.page_window(1, 10), vec![1, 2, 3]);
        assert_eq!(paginator.page_window(5, 10), vec![4, 5, 6]);
        assert_eq!(paginator.page_window(10, 10), vec![8, 9, 10]);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }
}
