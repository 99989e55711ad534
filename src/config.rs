//! Process-level configuration.
//!
//! The PageSpeed API key is resolved once at startup and injected into the
//! clients; it is never re-read per request. A missing key is not an error -
//! the PageSpeed client falls back to the public rate-limited path.

use std::time::Duration;

/// Environment variable holding the PageSpeed Insights API key.
pub const PAGESPEED_API_KEY_VAR: &str = "PAGESPEED_API_KEY";

/// Default PageSpeed Insights v5 endpoint.
pub const PAGESPEED_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional PageSpeed Insights API key.
    pub pagespeed_api_key: Option<String>,
    /// Endpoint for the PageSpeed API. Overridable for tests.
    pub pagespeed_endpoint: String,
    /// Ceiling on the page markup fetch.
    pub fetch_timeout: Duration,
    /// Ceiling on the PageSpeed call. Real audits routinely take longer than
    /// a page fetch, so this ceiling is higher.
    pub pagespeed_timeout: Duration,
    /// Upper bound on retained markup bytes.
    pub max_html_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pagespeed_api_key: None,
            pagespeed_endpoint: PAGESPEED_ENDPOINT.to_string(),
            fetch_timeout: Duration::from_secs(15),
            pagespeed_timeout: Duration::from_secs(30),
            max_html_bytes: 2 * 1024 * 1024, // 2 MiB
        }
    }
}

impl AppConfig {
    /// Build a config from the process environment. An empty key counts as
    /// absent.
    pub fn from_env() -> Self {
        let key = std::env::var(PAGESPEED_API_KEY_VAR)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            pagespeed_api_key: key,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_public_pagespeed_path() {
        let config = AppConfig::default();
        assert!(config.pagespeed_api_key.is_none());
        assert_eq!(config.pagespeed_endpoint, PAGESPEED_ENDPOINT);
        assert!(config.max_html_bytes > 0);
    }
}
