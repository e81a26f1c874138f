//! Page window arithmetic.

/// A 1-based page number paired with a fixed page size.
///
/// Stateless; everything else is derived from these two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: u64,
    size: u32,
}

impl PageWindow {
    /// Create a window. Returns `None` for page 0 or a zero size.
    pub fn new(page: u64, size: u32) -> Option<Self> {
        if page == 0 || size == 0 {
            return None;
        }
        Some(Self { page, size })
    }

    /// The first page for the given size.
    pub fn first(size: u32) -> Self {
        Self {
            page: 1,
            size: size.max(1),
        }
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Rows per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Zero-based index of the first row in this window.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * u64::from(self.size)
    }

    /// Number of pages needed to show `total_records`, i.e. `ceil(total / size)`.
    pub fn total_pages(&self, total_records: u64) -> u64 {
        total_records.div_ceil(u64::from(self.size))
    }

    /// Whether this is page 1.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Whether this is the last page for `total_records`.
    pub fn is_last(&self, total_records: u64) -> bool {
        self.page >= self.total_pages(total_records)
    }

    /// The same size at another page. Page 0 is clamped to 1.
    pub fn with_page(&self, page: u64) -> Self {
        Self {
            page: page.max(1),
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(PageWindow::new(0, 12).is_none());
        assert!(PageWindow::new(1, 0).is_none());
        assert!(PageWindow::new(1, 12).is_some());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageWindow::first(12).offset(), 0);
        assert_eq!(PageWindow::new(2, 12).unwrap().offset(), 12);
        assert_eq!(PageWindow::new(10, 12).unwrap().offset(), 108);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let window = PageWindow::first(12);
        assert_eq!(window.total_pages(126079), 10507);
        assert_eq!(window.total_pages(24), 2);
        assert_eq!(window.total_pages(25), 3);
        assert_eq!(window.total_pages(0), 0);
    }

    #[test]
    fn test_first_and_last() {
        let first = PageWindow::first(12);
        assert!(first.is_first());
        assert!(!first.is_last(126079));

        let last = first.with_page(10507);
        assert!(!last.is_first());
        assert!(last.is_last(126079));
    }

    #[test]
    fn test_with_page_clamps_zero() {
        assert_eq!(PageWindow::first(12).with_page(0).page(), 1);
    }
}
