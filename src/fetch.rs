//! Page retrieval for the ingest path
//!
//! Fetches a URL's markup with a browser-like user agent so that pages
//! serving bot-hostile variants still return their readable content. All
//! network failure semantics live here; the analyzer itself never performs
//! I/O.

use crate::error::Error as CrateError;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// User agent presented when fetching pages
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Per-request timeout
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Error type for page fetching
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("Unable to fetch url. Received status {status}")]
    Status {
        /// HTTP status code returned by the upstream server
        status: u16,
    },
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        CrateError::Fetch(err.to_string())
    }
}

/// Fetch a page's markup.
///
/// Returns the response body for 2xx responses and a typed error otherwise;
/// the caller decides how fetch failures surface (the HTTP layer maps them
/// to 422).
#[instrument]
pub async fn fetch_page(url: &str) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;
    debug!("Fetched {} bytes from {}", html.len(), url);
    Ok(html)
}
