//! HTTP clients for the remote stores and the language model.
//!
//! All clients are synchronous (`ureq`) and are called from async contexts via
//! `tokio::task::spawn_blocking`. [`ApiClient`] holds the shared plumbing:
//! bearer authentication, error mapping, bounded retries and metrics.

mod drive;
mod openai;
mod retry;
mod sheets;

pub use drive::DriveClient;
pub use openai::OpenAiClient;
pub use retry::RetryPolicy;
pub use sheets::SheetsClient;

use crate::error::{StoreError, StoreResult};
use crate::metrics::Metrics;
use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Largest document body accepted from a download.
pub const MAX_BODY_BYTES: u64 = 50 * 1024 * 1024;

/// Shared HTTP plumbing for one API base URL.
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL for the API
    base_url: String,

    /// Bearer token; empty sends no Authorization header
    token: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Retry policy for transient failures
    retry: RetryPolicy,

    /// Metrics collector
    metrics: Metrics,
}

impl ApiClient {
    /// Create a new ApiClient.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout_secs: u64,
        retry: RetryPolicy,
        metrics: Metrics,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Self {
            base_url: base_url.into(),
            token: token.into(),
            agent: Arc::new(agent),
            retry,
            metrics,
        }
    }

    /// Create an ApiClient with a custom base URL and no retries (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(base_url, token, 10, RetryPolicy::none(), Metrics::new())
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        if self.token.is_empty() {
            request
        } else {
            request.set("Authorization", &format!("Bearer {}", self.token))
        }
    }

    /// Execute a GET request with query parameters.
    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> StoreResult<ureq::Response> {
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        self.execute(&url, || {
            let mut request = self.authorize(self.agent.get(&url));
            for (key, value) in query {
                request = request.query(key, value);
            }
            request.call()
        })
    }

    /// Execute a POST request with a JSON body.
    pub fn post_json(&self, path: &str, body: &serde_json::Value) -> StoreResult<ureq::Response> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);

        self.execute(&url, || {
            self.authorize(self.agent.post(&url))
                .set("Content-Type", "application/json")
                .send_json(body)
        })
    }

    /// Run one request, retrying transient failures with exponential backoff.
    fn execute<F>(&self, url: &str, send: F) -> StoreResult<ureq::Response>
    where
        F: Fn() -> Result<ureq::Response, ureq::Error>,
    {
        let mut attempt = 0;
        loop {
            let started = Instant::now();
            let result = send();
            self.metrics
                .record_http_attempt(started.elapsed(), result.is_err());

            match result {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let error = Self::map_error(e);

                    if !self.retry.should_retry(attempt, &error) {
                        tracing::error!("{} - Error: {}", url, error);
                        return Err(error);
                    }

                    let delay = self.retry.backoff_for_attempt(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "{} - Transient error, retrying: {}",
                        url,
                        error
                    );
                    self.metrics.record_http_retry();
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Map a ureq error to a StoreError.
    fn map_error(error: ureq::Error) -> StoreError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => StoreError::Unauthorized,
                    403 => StoreError::Forbidden(message),
                    404 => StoreError::NotFound(message),
                    429 => StoreError::RateLimitExceeded,
                    _ => StoreError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    StoreError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    StoreError::Timeout
                } else {
                    StoreError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Read a response body as text.
    pub fn read_string(response: ureq::Response) -> StoreResult<String> {
        response
            .into_string()
            .map_err(|e| StoreError::BodyError(e.to_string()))
    }

    /// Read a response body as raw bytes.
    ///
    /// Bodies larger than [`MAX_BODY_BYTES`] are rejected, never truncated.
    pub fn read_bytes(response: ureq::Response) -> StoreResult<Vec<u8>> {
        read_limited(response.into_reader(), MAX_BODY_BYTES)
    }
}

fn read_limited(reader: impl Read, limit: u64) -> StoreResult<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| StoreError::BodyError(e.to_string()))?;

    if bytes.len() as u64 > limit {
        return Err(StoreError::BodyError(format!(
            "document exceeds {} bytes",
            limit
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_slashes() {
        let client = ApiClient::with_base_url("https://example.com/v3/", "token");
        assert_eq!(client.build_url("/files"), "https://example.com/v3/files");
        assert_eq!(client.build_url("files/abc"), "https://example.com/v3/files/abc");
    }

    #[test]
    fn test_connection_failure_maps_to_http_error() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1", "");
        let result = client.get("/files", &[]);
        assert!(matches!(result, Err(StoreError::HttpError(_))));
        assert_eq!(client.metrics().http_errors_total(), 1);
    }

    #[test]
    fn test_read_limited_accepts_body_at_limit() {
        let bytes = read_limited(std::io::Cursor::new(vec![7u8; 16]), 16).unwrap();
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn test_read_limited_rejects_oversized_body() {
        let result = read_limited(std::io::Cursor::new(vec![7u8; 17]), 16);
        match result {
            Err(StoreError::BodyError(message)) => assert!(message.contains("exceeds 16 bytes")),
            other => panic!("expected BodyError, got {:?}", other.map(|b| b.len())),
        }
    }
}
