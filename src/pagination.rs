//! Paging over the visible rows.
//!
//! Presentation helper for the display surface: the view only tracks which
//! page is current and how large pages are; slicing happens on demand.

use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current: usize,
}

impl Paginator {
    /// `page_size` of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Paginator {
            page_size: page_size.max(1),
            current: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of pages for `total` rows; an empty table still has one page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Move to `page`, failing if it does not exist for `total` rows.
    pub fn go_to(&mut self, page: usize, total: usize) -> Result<(), String> {
        let count = self.page_count(total);
        if page >= count {
            return Err(format!("Page {} out of range [0, {})", page, count));
        }
        self.current = page;
        Ok(())
    }

    /// Change the page size, keeping the first row of the current page visible.
    pub fn resize(&mut self, page_size: usize, total: usize) {
        let first_row = self.current * self.page_size;
        self.page_size = page_size.max(1);
        self.current = first_row / self.page_size;
        self.clamp(total);
    }

    /// Pull the current page back into range after rows disappeared.
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total) - 1;
        if self.current > last {
            self.current = last;
        }
    }

    /// Row range of the current page.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        let start = (self.current * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn info(&self, total: usize) -> PageInfo {
        PageInfo {
            index: self.current,
            size: self.page_size,
            page_count: self.page_count(total),
            total_rows: total,
            first_row: self.bounds(total).start,
        }
    }
}

/// Where the current page sits within the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub index: usize,
    pub size: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub first_row: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let pager = Paginator::new(5);
        assert_eq!(pager.page_count(0), 1);
        assert_eq!(pager.page_count(5), 1);
        assert_eq!(pager.page_count(6), 2);
        assert_eq!(pager.page_count(11), 3);
    }

    #[test]
    fn test_bounds() {
        let mut pager = Paginator::new(5);
        assert_eq!(pager.bounds(7), 0..5);
        pager.go_to(1, 7).unwrap();
        assert_eq!(pager.bounds(7), 5..7);
        assert_eq!(pager.bounds(0), 0..0);
    }

    #[test]
    fn test_go_to_out_of_range() {
        let mut pager = Paginator::new(5);
        assert!(pager.go_to(2, 7).is_err());
        assert_eq!(pager.current(), 0);
    }

    #[test]
    fn test_clamp_after_rows_shrink() {
        let mut pager = Paginator::new(5);
        pager.go_to(2, 12).unwrap();
        pager.clamp(6);
        assert_eq!(pager.current(), 1);
        pager.clamp(0);
        assert_eq!(pager.current(), 0);
    }

    #[test]
    fn test_resize_keeps_first_row() {
        let mut pager = Paginator::new(5);
        pager.go_to(2, 30).unwrap();
        pager.resize(10, 30);
        assert_eq!(pager.current(), 1);
        assert_eq!(pager.bounds(30), 10..20);
    }

    #[test]
    fn test_info() {
        let mut pager = Paginator::new(5);
        pager.go_to(1, 6).unwrap();
        let info = pager.info(6);
        assert_eq!(info.index, 1);
        assert_eq!(info.page_count, 2);
        assert_eq!(info.first_row, 5);
        assert_eq!(info.total_rows, 6);
    }
}
