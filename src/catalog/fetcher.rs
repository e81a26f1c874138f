//! Single-page fetching.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::window::PageWindow;
use crate::api::{ApiError, ArtworkRecord, CatalogClient};

/// Anything that can produce one page of artwork rows.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Load the rows of `window`.
    async fn load(&self, window: PageWindow) -> Result<Vec<ArtworkRecord>, ApiError>;
}

#[async_trait]
impl PageSource for CatalogClient {
    async fn load(&self, window: PageWindow) -> Result<Vec<ArtworkRecord>, ApiError> {
        let page = self.fetch_page(window.page(), window.size()).await?;
        Ok(page.data)
    }
}

/// Fetches fixed-size pages from a `PageSource`.
#[derive(Debug, Clone)]
pub struct PageFetcher<S> {
    source: S,
    page_size: u32,
}

impl<S: PageSource> PageFetcher<S> {
    /// Create a fetcher. A zero page size is raised to 1.
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch a page, collapsing any failure to an empty page.
    ///
    /// Failures are logged and never returned, so callers cannot tell a
    /// failed fetch from the end of the data. Use [`Self::try_fetch`] when
    /// that difference matters.
    pub async fn fetch(&self, page: u64) -> Vec<ArtworkRecord> {
        match self.try_fetch(page).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(page, error = %e, "Page fetch failed");
                Vec::new()
            }
        }
    }

    /// Fetch a page, keeping the failure explicit.
    ///
    /// The result never holds more than `page_size` rows.
    #[instrument(skip(self), fields(page_size = self.page_size))]
    pub async fn try_fetch(&self, page: u64) -> Result<Vec<ArtworkRecord>, ApiError> {
        let window = PageWindow::new(page, self.page_size).ok_or(ApiError::InvalidPage(page))?;

        let mut rows = self.source.load(window).await?;
        if rows.len() > self.page_size as usize {
            warn!(
                returned = rows.len(),
                "Source returned more rows than requested, truncating"
            );
            rows.truncate(self.page_size as usize);
        }

        debug!("Fetched {} rows", rows.len());
        Ok(rows)
    }
}
