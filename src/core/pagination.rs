//! Display-range maths for paged lists.
//!
//! Pages are 1-based; a page of `0` is treated as the first page and a limit
//! of `0` as a limit of one, so every function here is total.

use crate::domain::model::PageState;

/// Index of the first record on `page`, 1-based.
pub fn paging_from(page: u32, limit: u32) -> u64 {
    let page = u64::from(page.max(1));
    let limit = u64::from(limit.max(1));
    (page - 1) * limit + 1
}

/// Index of the last record on `page`, clamped to `total` when the last
/// page is partial.
pub fn paging_to(page: u32, limit: u32, total: u64) -> u64 {
    let page = u64::from(page.max(1));
    let limit = u64::from(limit.max(1));
    (page * limit).min(total)
}

pub fn total_pages(limit: u32, total: u64) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn has_previous(page: u32) -> bool {
    page > 1
}

pub fn has_next(page: u32, limit: u32, total: u64) -> bool {
    page.max(1) < total_pages(limit, total)
}

/// Inclusive `[from, to]` of the current page, or `None` when the page has
/// no records (empty list, or a page past the end).
pub fn display_range(state: &PageState) -> Option<(u64, u64)> {
    let from = paging_from(state.current_page, state.limit);
    let to = paging_to(state.current_page, state.limit, state.total_results);
    (from <= to).then_some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_range() {
        assert_eq!(paging_from(1, 5), 1);
        assert_eq!(paging_to(1, 5, 17), 5);
    }

    #[test]
    fn test_partial_last_page_is_clamped() {
        assert_eq!(paging_from(4, 5), 16);
        assert_eq!(paging_to(4, 5, 17), 17);
    }

    #[test]
    fn test_zero_page_and_limit_are_normalised() {
        assert_eq!(paging_from(0, 5), 1);
        assert_eq!(paging_from(3, 0), 3);
        assert_eq!(paging_to(0, 0, 10), 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(5, 0), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(5, 17), 4);
        assert_eq!(total_pages(3, 17), 6);
    }

    #[test]
    fn test_has_next_and_previous() {
        assert!(!has_previous(1));
        assert!(has_previous(2));
        assert!(has_next(1, 5, 17));
        assert!(!has_next(4, 5, 17));
        assert!(!has_next(1, 5, 0));
    }

    #[test]
    fn test_display_range() {
        let state = PageState {
            current_page: 2,
            limit: 3,
            total_results: 17,
        };
        assert_eq!(display_range(&state), Some((4, 6)));

        let empty = PageState::default();
        assert_eq!(display_range(&empty), None);

        let past_end = PageState {
            current_page: 9,
            limit: 5,
            total_results: 17,
        };
        assert_eq!(display_range(&past_end), None);
    }
}
