//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Default artwork listing endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Catalog size used by the pager. Not derived from the API.
pub const DEFAULT_TOTAL_RECORDS: u64 = 126_079;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The artwork listing endpoint.
    pub endpoint: String,
    /// Rows per page.
    pub page_size: u32,
    /// Total number of records the pager assumes.
    pub total_records: u64,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Extra attempts for transient fetch failures. Zero means a failed
    /// fetch is not retried.
    pub max_retries: u32,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// The UI theme to use ("dark" or "light").
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            total_records: DEFAULT_TOTAL_RECORDS,
            request_timeout_secs: 30,
            max_retries: 0,
            tick_rate_ms: 100,
            vim_mode: true,
            theme: "dark".to_string(),
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// Checks that:
    /// - The endpoint is an http(s) URL
    /// - The page size and record total are non-zero
    /// - The timeout and tick rate are non-zero
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "endpoint cannot be empty".to_string(),
            ));
        }

        if !self.endpoint.starts_with("https://") && !self.endpoint.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "endpoint '{}' must start with http:// or https://",
                self.endpoint
            )));
        }

        if self.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "page_size must be at least 1".to_string(),
            ));
        }

        if self.total_records == 0 {
            return Err(ConfigError::ValidationError(
                "total_records must be at least 1".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
