//! Artwork catalog API client implementation.
//!
//! This module provides the HTTP client for the public artwork listing
//! endpoint. It handles request building, status mapping, JSON decoding and
//! optional retry logic.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::types::ArtworkPage;
use crate::config::Settings;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// The artwork catalog API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// The HTTP client.
    client: Client,
    /// The listing endpoint, e.g. `https://api.artic.edu/api/v1/artworks`.
    endpoint: String,
    /// Extra attempts for transient failures. Zero disables retries.
    max_retries: u32,
}

impl CatalogClient {
    /// Create a client from application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Self::build_http_client(settings.request_timeout_secs)?;
        let endpoint = normalize_endpoint(&settings.endpoint)?;

        Ok(Self {
            client,
            endpoint,
            max_retries: settings.max_retries,
        })
    }

    /// Create a client for an explicit endpoint with default timeouts and no retries.
    #[cfg(test)]
    pub(crate) fn with_endpoint(endpoint: &str) -> Result<Self> {
        let settings = Settings {
            endpoint: endpoint.to_string(),
            ..Settings::default()
        };
        Self::new(&settings)
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("artpager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)
    }

    /// Fetch one page of the artwork listing.
    ///
    /// Calls `GET {endpoint}?page={page}&limit={limit}`.
    ///
    /// # Arguments
    ///
    /// * `page` - The 1-based page number
    /// * `limit` - Rows per page
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_page(&self, page: u64, limit: u32) -> Result<ArtworkPage> {
        if page == 0 {
            return Err(ApiError::InvalidPage(page));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("Request attempt {}/{}", attempt, self.max_retries + 1);

            match self.execute_get(page, limit).await {
                Ok(result) => {
                    if let Some(pagination) = &result.pagination {
                        debug!(
                            total = pagination.total,
                            total_pages = pagination.total_pages,
                            "Fetched {} artworks",
                            result.data.len()
                        );
                    }
                    return Ok(result);
                }
                Err(e) if Self::is_retryable(&e) && attempt <= self.max_retries => {
                    let delay = Self::calculate_retry_delay(attempt);
                    warn!(
                        "Request failed (attempt {}), retrying in {}ms: {}",
                        attempt, delay, e
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Execute a single GET request.
    async fn execute_get(&self, page: u64, limit: u32) -> Result<ArtworkPage> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("page", page), ("limit", u64::from(limit))])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response(&self, response: Response) -> Result<ArtworkPage> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<ArtworkPage>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// The catalog reports failures as `{"status": 403, "error": "...", "detail": "..."}`.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            let detail = json
                .get("detail")
                .or_else(|| json.get("error"))
                .and_then(|v| v.as_str());
            if let Some(detail) = detail {
                return ApiError::from_status(status, detail);
            }
        }

        ApiError::from_status(status, url)
    }

    /// Check if an error is retryable.
    fn is_retryable(error: &ApiError) -> bool {
        matches!(
            error,
            ApiError::RateLimited | ApiError::ServerError(_) | ApiError::Network(_)
        )
    }

    /// Calculate retry delay with exponential backoff.
    fn calculate_retry_delay(attempt: u32) -> u64 {
        RETRY_DELAY_MS * 2u64.pow(attempt - 1)
    }

    /// Get the listing endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Normalize the endpoint by removing trailing slashes and checking the scheme.
fn normalize_endpoint(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ApiError::InvalidUrl(url.to_string()));
    }

    if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("Endpoint does not use HTTPS: {}", url);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and return the request line.
    async fn serve_once(status_line: &'static str, body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (format!("http://127.0.0.1:{}/api/v1/artworks", addr.port()), handle)
    }

    #[test]
    fn test_normalize_endpoint_removes_trailing_slash() {
        assert_eq!(
            normalize_endpoint("https://api.artic.edu/api/v1/artworks/").unwrap(),
            "https://api.artic.edu/api/v1/artworks"
        );
    }

    #[test]
    fn test_normalize_endpoint_rejects_missing_scheme() {
        let err = normalize_endpoint("api.artic.edu/api/v1/artworks").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_is_retryable() {
        assert!(CatalogClient::is_retryable(&ApiError::RateLimited));
        assert!(CatalogClient::is_retryable(&ApiError::ServerError(
            "test".to_string()
        )));
        assert!(!CatalogClient::is_retryable(&ApiError::NotFound(
            "test".to_string()
        )));
        assert!(!CatalogClient::is_retryable(&ApiError::InvalidResponse(
            "test".to_string()
        )));
    }

    #[test]
    fn test_retry_delay_exponential() {
        assert_eq!(CatalogClient::calculate_retry_delay(1), 1000);
        assert_eq!(CatalogClient::calculate_retry_delay(2), 2000);
        assert_eq!(CatalogClient::calculate_retry_delay(3), 4000);
    }

    #[test]
    fn test_error_from_response_uses_detail() {
        let body = r#"{"status":403,"error":"Invalid limit","detail":"You have requested too many resources per page."}"#;
        let err = CatalogClient::error_from_response(StatusCode::FORBIDDEN, "url", body);
        assert!(err.to_string().contains("too many resources"));
    }

    #[tokio::test]
    async fn test_fetch_page_zero_rejected() {
        let client = CatalogClient::with_endpoint("http://localhost:1/artworks").unwrap();
        let err = client.fetch_page(0, 12).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidPage(0)));
    }

    #[tokio::test]
    async fn test_fetch_page_sends_page_and_limit() {
        let body = r#"{"data":[{"id":1,"title":"One"},{"id":2,"title":"Two"}]}"#.to_string();
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", body).await;

        let client = CatalogClient::with_endpoint(&endpoint).unwrap();
        let page = client.fetch_page(3, 12).await.unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[1].title, "Two");

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /api/v1/artworks?page=3&limit=12"));
    }

    #[tokio::test]
    async fn test_fetch_page_maps_server_error() {
        let (endpoint, _server) =
            serve_once("HTTP/1.1 503 Service Unavailable", "{}".to_string()).await;

        let client = CatalogClient::with_endpoint(&endpoint).unwrap();
        let err = client.fetch_page(1, 12).await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_invalid_json() {
        let (endpoint, _server) = serve_once("HTTP/1.1 200 OK", "not json".to_string()).await;

        let client = CatalogClient::with_endpoint(&endpoint).unwrap();
        let err = client.fetch_page(1, 12).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
