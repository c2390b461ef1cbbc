// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The fetch seam.
//!
//! Jobs never talk HTTP themselves. They hand a [`FetchRequest`] to a
//! [`Fetcher`] and get the body back; [`crate::HttpFetcher`] is the network
//! implementation. [`RetryingFetcher`] wraps any fetcher with the pacing and
//! retry policy the upstream site tolerates.

use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Headers a browser-like client should send with every request.
pub const BROWSER_HEADERS: [(&str, &str); 4] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Accept-Encoding", "gzip, deflate, br"),
];

/// A GET request: the URL plus headers that override [`BROWSER_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The URL to fetch.
    pub url: String,
    /// Per-request header overrides.
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// A page request with the default headers.
    #[must_use]
    pub fn html(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// A JSON API request.
    #[must_use]
    pub fn json(url: impl Into<String>) -> Self {
        Self::html(url).with_header("Accept", "application/json")
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Looks up a header override, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A failed fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with an error status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// No usable response: connection, timeout or body decoding failure.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl FetchError {
    /// The HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Client(_) => None,
        }
    }

    /// Whether the server reported an internal error (HTTP 500).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500))
    }
}

/// Retrieves the body of a URL.
pub trait Fetcher {
    /// Performs one request.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Status` for a non-success status and
    /// `FetchError::Transport` when no response was received.
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        (**self).fetch(request)
    }
}

/// Pacing and retry settings for upstream requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Attempts after the first.
    pub retries: u32,
    /// Lower bound of the pause before each attempt.
    pub min_delay: Duration,
    /// Upper bound of the pause before each attempt.
    pub max_delay: Duration,
    /// Factor applied to both bounds after each failure.
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            min_delay: Duration::from_millis(750),
            max_delay: Duration::from_millis(1250),
            backoff_multiplier: 1.25,
        }
    }
}

impl RetryPolicy {
    /// A policy that retries without pausing.
    #[must_use]
    pub const fn immediate(retries: u32) -> Self {
        Self {
            retries,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// The pause bounds before attempt `attempt` (0-based).
    #[must_use]
    pub fn delay_bounds(&self, attempt: u32) -> (Duration, Duration) {
        let factor: f64 = self
            .backoff_multiplier
            .powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        (
            scale(self.min_delay, factor),
            scale(self.max_delay, factor),
        )
    }

    /// A uniformly random pause within the bounds for `attempt`.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let (low, high): (Duration, Duration) = self.delay_bounds(attempt);
        if high <= low {
            return low;
        }
        let span: f64 = (high - low).as_secs_f64();
        low + Duration::try_from_secs_f64(span * rand::random::<f64>()).unwrap_or(Duration::ZERO)
    }
}

fn scale(duration: Duration, factor: f64) -> Duration {
    Duration::try_from_secs_f64(duration.as_secs_f64() * factor).unwrap_or(duration)
}

/// Wraps a fetcher with a pause before every attempt and retries on failure.
///
/// The last failure is returned once the retries are used up.
#[derive(Debug, Clone)]
pub struct RetryingFetcher<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F: Fetcher> RetryingFetcher<F> {
    /// Wraps `inner` with `policy`.
    #[must_use]
    pub const fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Returns the policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the wrapped fetcher.
    #[must_use]
    pub const fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: Fetcher> Fetcher for RetryingFetcher<F> {
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            let pause: Duration = self.policy.delay(attempt);
            if !pause.is_zero() {
                std::thread::sleep(pause);
            }
            info!(url = %request.url, "Fetching URL");
            match self.inner.fetch(request) {
                Ok(body) => return Ok(body),
                Err(err) => {
                    warn!(error = %err, attempt, "Fetch failed");
                    if attempt >= self.policy.retries {
                        return Err(err);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
