//! In-memory page source for tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::fetcher::PageSource;
use super::window::PageWindow;
use crate::api::{ApiError, ArtworkRecord};

/// A catalog of `total` sequential artworks with ids `1..=total`.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    total: u64,
    failing: HashSet<u64>,
    oversized: Option<u32>,
    repeat_first_page: bool,
    calls: Arc<Mutex<Vec<u64>>>,
}

impl MockSource {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Fail every request for `page` with a server error.
    pub fn failing_on(mut self, page: u64) -> Self {
        self.failing.insert(page);
        self
    }

    /// Ignore the requested size and return `rows` per page.
    pub fn with_oversized_pages(mut self, rows: u32) -> Self {
        self.oversized = Some(rows);
        self
    }

    /// Serve page 1's rows for every page.
    pub fn repeating_first_page(mut self) -> Self {
        self.repeat_first_page = true;
        self
    }

    /// Pages requested so far, in order.
    pub fn calls(&self) -> Vec<u64> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageSource for MockSource {
    async fn load(&self, window: PageWindow) -> Result<Vec<ArtworkRecord>, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(window.page());
        }

        if self.failing.contains(&window.page()) {
            return Err(ApiError::ServerError(format!(
                "simulated failure on page {}",
                window.page()
            )));
        }

        let offset = if self.repeat_first_page {
            0
        } else {
            window.offset()
        };
        let size = u64::from(self.oversized.unwrap_or(window.size()));
        let end = (offset + size).min(self.total);

        Ok((offset..end)
            .map(|i| crate::api::types::test_record(i + 1))
            .collect())
    }
}
