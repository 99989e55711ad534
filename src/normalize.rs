//! Target URL validation and canonicalization.

use url::Url;

use crate::error::{AppError, Result};

/// Host literals that are never audited. Blocking these keeps a caller from
/// steering the fetcher at services on the audit host itself.
const BLOCKED_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0"];

/// Validate and canonicalize a user-supplied domain or URL.
///
/// A bare domain gets an `https://` scheme prepended before parsing. The
/// operation is idempotent: feeding the canonical form back in returns the
/// same URL.
pub fn normalize_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_url("target URL must not be empty"));
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate)
        .map_err(|_| AppError::invalid_url("invalid URL, example: https://example.com"))?;

    match url.host_str() {
        Some(host) if BLOCKED_HOSTS.contains(&host.to_ascii_lowercase().as_str()) => {
            Err(AppError::invalid_url("host not allowed"))
        }
        Some(_) => Ok(url),
        None => Err(AppError::invalid_url(
            "invalid URL, example: https://example.com",
        )),
    }
}
