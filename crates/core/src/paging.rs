//! Offset/limit paging engine shared by every list operation.
//!
//! One window convention for all stores: `page_index` is zero-based,
//! skip = index × size, take = size, and the total is counted over the
//! filtered set BEFORE the window is applied so total-page math holds for
//! any requested page. Metadata reports the same zero-based convention.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page-at-a-time request window.
///
/// No upper bound is enforced on `page_size`; bounding oversized pages is a
/// caller responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
    pub sort_field: Option<String>,
    pub sort_desc: bool,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: None,
            sort_desc: false,
        }
    }
}

impl PageRequest {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
            ..Self::default()
        }
    }

    /// Number of records to skip before the window starts.
    pub fn skip(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    /// Window length.
    pub fn take(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// Page metadata reported alongside a page of results.
///
/// `current_page` is zero-based, matching the request convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    /// Derive metadata for `request` over a dataset of `total_count` records
    /// (counted before windowing).
    pub fn new(request: &PageRequest, total_count: u64) -> Self {
        let size = u64::from(request.page_size.max(1));
        let total_pages = u32::try_from(total_count.div_ceil(size)).unwrap_or(u32::MAX);
        Self {
            current_page: request.page_index,
            total_pages,
            page_size: request.page_size,
            total_count,
            has_previous: request.page_index > 0,
            has_next: u64::from(request.page_index) + 1 < u64::from(total_pages),
        }
    }
}

/// A window of results plus the pre-window total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Metadata for this page under `request`.
    pub fn info(&self, request: &PageRequest) -> PageInfo {
        PageInfo::new(request, self.total_count)
    }
}

/// Apply the request window to an already-filtered, already-sorted slice.
pub fn paginate<T: Clone>(items: &[T], request: &PageRequest) -> Page<T> {
    let total_count = items.len() as u64;
    let skip = usize::try_from(request.skip()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.take()).unwrap_or(usize::MAX);
    let items = items.iter().skip(skip).take(take).cloned().collect();
    Page { items, total_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_match_wire_contract() {
        let request = PageRequest::default();
        assert_eq!(request.page_index, 0);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort_field, None);
        assert!(!request.sort_desc);
    }

    #[test]
    fn window_math() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.skip(), 75);
        assert_eq!(request.take(), 25);
    }

    #[test]
    fn consecutive_pages_are_disjoint_and_cover_in_order() {
        let items: Vec<u32> = (0..25).collect();

        let first = paginate(&items, &PageRequest::new(0, 10));
        let second = paginate(&items, &PageRequest::new(1, 10));

        assert_eq!(first.items, (0..10).collect::<Vec<_>>());
        assert_eq!(second.items, (10..20).collect::<Vec<_>>());
        assert_eq!(first.total_count, 25);
        assert_eq!(second.total_count, 25);
    }

    #[test]
    fn total_count_is_independent_of_requested_page() {
        let items: Vec<u32> = (0..25).collect();
        for index in 0..5 {
            let page = paginate(&items, &PageRequest::new(index, 10));
            assert_eq!(page.total_count, 25);
        }
    }

    #[test]
    fn page_info_derivations() {
        let request = PageRequest::new(1, 10);
        let info = PageInfo::new(&request, 25);
        assert_eq!(info.current_page, 1);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total_count, 25);
        assert!(info.has_previous);
        assert!(info.has_next);

        let last = PageInfo::new(&PageRequest::new(2, 10), 25);
        assert!(last.has_previous);
        assert!(!last.has_next);

        let only = PageInfo::new(&PageRequest::new(0, 10), 7);
        assert_eq!(only.total_pages, 1);
        assert!(!only.has_previous);
        assert!(!only.has_next);
    }

    #[test]
    fn empty_dataset_has_zero_pages() {
        let info = PageInfo::new(&PageRequest::default(), 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_previous);
        assert!(!info.has_next);
    }

    #[test]
    fn past_the_end_window_is_empty_but_counted() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, &PageRequest::new(4, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
    }

    proptest! {
        #[test]
        fn windows_partition_the_dataset(len in 0usize..200, size in 1u32..20) {
            let items: Vec<usize> = (0..len).collect();
            let pages = (len as u32).div_ceil(size);

            let mut seen = Vec::new();
            for index in 0..pages {
                let page = paginate(&items, &PageRequest::new(index, size));
                prop_assert_eq!(page.total_count, len as u64);
                prop_assert!(page.items.len() as u32 <= size);
                seen.extend(page.items);
            }

            // Every element appears exactly once, in order.
            prop_assert_eq!(seen, items);
        }

        #[test]
        fn total_pages_covers_exactly(total in 0u64..10_000, size in 1u32..100) {
            let info = PageInfo::new(&PageRequest::new(0, size), total);
            let capacity = u64::from(info.total_pages) * u64::from(size);
            prop_assert!(capacity >= total);
            if info.total_pages > 0 {
                prop_assert!(capacity - total < u64::from(size));
            }
        }
    }
}
