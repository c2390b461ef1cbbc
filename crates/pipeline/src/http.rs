// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The network [`Fetcher`], a blocking `reqwest` client.

use crate::fetch::{BROWSER_HEADERS, FetchError, FetchRequest, Fetcher};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt::Display;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout of the default client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches over HTTP with [`BROWSER_HEADERS`] plus the request's overrides.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client: Client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Client(err.to_string()))?;
        Ok(Self { client })
    }
}

/// The headers sent for `request`: browser defaults unless overridden.
#[must_use]
pub fn merged_headers(request: &FetchRequest) -> Vec<(&str, &str)> {
    BROWSER_HEADERS
        .iter()
        .filter(|(name, _)| request.header(name).is_none())
        .copied()
        .chain(
            request
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
        .collect()
}

fn header_map(request: &FetchRequest) -> Result<HeaderMap, FetchError> {
    let mut headers: HeaderMap = HeaderMap::new();
    for (name, value) in merged_headers(request) {
        let name: HeaderName =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| transport(request, &err))?;
        let value: HeaderValue =
            HeaderValue::from_str(value).map_err(|err| transport(request, &err))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn transport(request: &FetchRequest, err: &impl Display) -> FetchError {
    FetchError::Transport {
        url: request.url.clone(),
        message: err.to_string(),
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        let headers: HeaderMap = header_map(request)?;
        let response: Response = self
            .client
            .get(&request.url)
            .headers(headers)
            .send()
            .map_err(|err| transport(request, &err))?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        let body: String = response.text().map_err(|err| transport(request, &err))?;
        debug!(url = %request.url, bytes = body.len(), "Fetched");
        Ok(body)
    }
}
