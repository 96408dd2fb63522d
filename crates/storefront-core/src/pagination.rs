//! # Pagination
//!
//! Page arithmetic for listings: 1-based page numbers on the outside,
//! `skip`/`limit` on the wire.
//!
//! ```text
//!   [First] [Prev]  4  5 (6) 7  8  [Next] [Last]
//!                   └─ window of 5 ─┘
//!   page 6 of 20, limit 12  ─►  skip = 60
//! ```

use serde::{Deserialize, Serialize};

use crate::DEFAULT_PAGE_SIZE;

/// Number of page buttons shown around the current page.
pub const PAGE_WINDOW_WIDTH: u32 = 5;

/// A slice of results: how many to skip and how many to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub skip: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub const fn new(skip: u32, limit: u32) -> Self {
        PageRequest { skip, limit }
    }

    /// Request for a 1-based page number. Page 0 is treated as page 1.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::for_page(3, 12).skip, 24);
    /// assert_eq!(PageRequest::for_page(0, 12).skip, 0);
    /// ```
    pub fn for_page(page: u32, limit: u32) -> Self {
        PageRequest {
            skip: page.max(1).saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }

    /// 1-based page number this request starts on.
    pub fn page_number(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        self.skip / self.limit + 1
    }
}

/// Number of pages needed for `total` results, `limit` per page.
pub fn total_pages(total: u32, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

pub fn has_previous(current: u32) -> bool {
    current > 1
}

pub fn has_next(current: u32, total_pages: u32) -> bool {
    current < total_pages
}

/// Page numbers to render as buttons around `current`.
///
/// ## Behavior
/// - At most `width` pages
/// - Near the start the window is pinned to page 1
/// - Near the end the window is pinned to the last page
/// - Otherwise `current` sits in the middle
///
/// ## Example
/// ```rust
/// use storefront_core::pagination::page_window;
///
/// assert_eq!(page_window(1, 20, 5), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(10, 20, 5), vec![8, 9, 10, 11, 12]);
/// assert_eq!(page_window(20, 20, 5), vec![16, 17, 18, 19, 20]);
/// assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
/// ```
pub fn page_window(current: u32, total_pages: u32, width: u32) -> Vec<u32> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }

    let shown = width.min(total_pages);
    let current = current.clamp(1, total_pages);
    let half = width / 2;

    let start = if total_pages <= width || current <= half + 1 {
        1
    } else if current + half >= total_pages {
        total_pages - shown + 1
    } else {
        current - half
    };

    (start..start + shown).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(194, 12), 17);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_page_number_round_trips_for_page() {
        for page in 1..=10 {
            assert_eq!(PageRequest::for_page(page, 12).page_number(), page);
        }
    }

    #[test]
    fn test_page_window_positions() {
        assert_eq!(page_window(3, 20, PAGE_WINDOW_WIDTH), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(4, 20, PAGE_WINDOW_WIDTH), vec![2, 3, 4, 5, 6]);
        assert_eq!(page_window(18, 20, PAGE_WINDOW_WIDTH), vec![16, 17, 18, 19, 20]);
        assert_eq!(page_window(17, 20, PAGE_WINDOW_WIDTH), vec![15, 16, 17, 18, 19]);
        assert!(page_window(1, 0, PAGE_WINDOW_WIDTH).is_empty());
    }

    #[test]
    fn test_prev_next() {
        assert!(!has_previous(1));
        assert!(has_previous(2));
        assert!(has_next(1, 2));
        assert!(!has_next(2, 2));
    }
}
