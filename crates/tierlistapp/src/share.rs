//! Share links and optional link shortening.
//!
//! Shortening is best effort. Any failure (timeout, HTTP error, a body that is
//! not a URL) is logged and the long link is used instead.

use crate::error::{Result, TierError};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_SHORTENER_ENDPOINT: &str = "https://is.gd/create.php";

pub trait Shortener {
    fn shorten(&self, long_url: &str) -> Result<String>;
}

/// The is.gd `format=simple` API: GET with the long URL as a query
/// parameter, the short URL comes back as the plain-text body.
#[derive(Debug, Clone)]
pub struct IsGdShortener {
    endpoint: String,
    timeout: Duration,
}

impl IsGdShortener {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl Default for IsGdShortener {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTENER_ENDPOINT, Duration::from_secs(5))
    }
}

impl Shortener for IsGdShortener {
    fn shorten(&self, long_url: &str) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TierError::Network(e.to_string()))?;
        let response = client
            .get(&self.endpoint)
            .query(&[("format", "simple"), ("url", long_url)])
            .send()
            .map_err(|e| TierError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TierError::Network(format!("shortener returned {}", status)));
        }
        let body = response
            .text()
            .map_err(|e| TierError::Network(e.to_string()))?;
        accept_short_url(&body)
            .ok_or_else(|| TierError::Network(format!("shortener error: {}", body.trim())))
    }
}

/// Returns the trimmed body if it looks like an http(s) URL.
pub fn accept_short_url(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let lower = trimmed.get(..8).unwrap_or(trimmed).to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub url: String,
    pub shortened: bool,
}

impl ShareLink {
    pub fn long(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            shortened: false,
        }
    }
}

/// Shortens `long_url` when a shortener is given, falling back to the long
/// URL on any failure.
pub fn make_link(long_url: &str, shortener: Option<&dyn Shortener>) -> ShareLink {
    let Some(shortener) = shortener else {
        return ShareLink::long(long_url);
    };
    match shortener.shorten(long_url) {
        Ok(url) => {
            debug!(short = %url, "share link shortened");
            ShareLink {
                url,
                shortened: true,
            }
        }
        Err(e) => {
            warn!(error = %e, "link shortening failed, using long link");
            ShareLink::long(long_url)
        }
    }
}
