//! HTTP client with tracing, timeouts, and JSON helpers.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - A per-client timeout reported back as [`FetchError::Timeout`]
//! - Status checking and JSON decoding in one call

use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{FetchError, HttpError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Parley.
const USER_AGENT: &str = concat!("Parley/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt carried in a status error.
const BODY_EXCERPT_CHARS: usize = 200;

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self { inner, timeout })
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs a GET request with a timeout shorter than the client's.
    #[instrument(skip(self), fields(url = %url, timeout_ms = timeout.as_millis()))]
    pub async fn get_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<Response, HttpError> {
        debug!("GET request with timeout");

        let response = self.inner.get(url).timeout(timeout).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with JSON body.
    #[instrument(skip(self, body), fields(url = %redact(url)))]
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        debug!("POST request with JSON");

        let response = self.inner.post(url).json(body).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// POSTs a JSON body and decodes a JSON reply.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] when the client timeout elapses,
    /// [`FetchError::Status`] for non-success replies, and
    /// [`FetchError::Json`] when the body does not decode.
    pub async fn post_json_for<B, T>(&self, url: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .post_json(url, body)
            .await
            .map_err(|e| self.classify(e, self.timeout))?;
        decode(response, self.timeout).await
    }

    fn classify(&self, err: HttpError, timeout: Duration) -> FetchError {
        match err {
            HttpError::Request(ref e) if e.is_timeout() => FetchError::Timeout(timeout.as_secs()),
            other => FetchError::Http(other),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response, timeout: Duration) -> Result<T, FetchError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout(timeout.as_secs())
        } else {
            FetchError::Http(HttpError::Request(e))
        }
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Converts a non-success response into [`FetchError`].
///
/// # Errors
///
/// Returns [`FetchError::RateLimited`] for 429 and [`FetchError::Status`]
/// for any other non-success status.
pub async fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if response.is_rate_limited() {
        let retry_after = response.retry_after_secs();
        warn!(?retry_after, "Rate limited");
        return Err(FetchError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = %status, "Request failed");
    Err(FetchError::Status {
        status: status.as_u16(),
        body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
    })
}

/// Joins an endpoint path onto a base URL, tolerating a trailing slash.
///
/// # Errors
///
/// Returns [`HttpError::InvalidUrl`] if the result is not a valid URL.
pub fn join_url(base: &str, path: &str) -> Result<Url, HttpError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

/// Strips the query string so credentials passed as parameters are never logged.
fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    fn is_rate_limited(&self) -> bool;

    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == StatusCode::TOO_MANY_REQUESTS
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }
}

// ============================================================================
// Tests
// ============================================================================
