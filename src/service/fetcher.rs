//! Single-page markup retrieval.

use rquest::header::CONTENT_TYPE;
use rquest::Client;
use url::Url;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::service::http::{create_client, ClientType};

/// Client identifier sent with every page fetch.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; SiteAuditBot/0.2)";

/// Outcome of retrieving the page markup.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Raw markup, truncated to the configured ceiling.
    pub html: String,
    /// URL after redirects; downstream consumers use this, not the input.
    pub final_url: Url,
    pub status: u16,
}

pub struct PageFetcher {
    client: Client,
    max_html_bytes: usize,
}

impl PageFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::HeavyEmulation, config.fetch_timeout)?,
            max_html_bytes: config.max_html_bytes,
        })
    }

    /// Perform the single GET, following redirects. Fails with
    /// `UnsupportedContent` on non-HTML responses and `Fetch` on transport
    /// errors; HTTP error statuses are returned to the caller as data.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        tracing::debug!("[FETCH] GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| AppError::fetch(format!("request failed: {e}")))?;

        let status = response.status().as_u16();

        // Absent content-type is treated as HTML; plenty of small sites omit it.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();
        if !content_type.to_ascii_lowercase().contains("text/html") {
            return Err(AppError::UnsupportedContent(content_type));
        }

        // Re-parse instead of borrowing the client's Url type directly.
        let final_url = Url::parse(response.url().as_str())
            .map_err(|e| AppError::fetch(format!("unparseable final URL: {e}")))?;

        let mut html = response
            .text()
            .await
            .map_err(|e| AppError::fetch(format!("failed to read body: {e}")))?;

        if html.len() > self.max_html_bytes {
            let mut cut = self.max_html_bytes;
            while cut > 0 && !html.is_char_boundary(cut) {
                cut -= 1;
            }
            html.truncate(cut);
            tracing::warn!("[FETCH] body truncated to {} bytes for {}", cut, final_url);
        }

        tracing::info!(
            "[FETCH] {} -> {} ({} bytes, status {})",
            url,
            final_url,
            html.len(),
            status
        );

        Ok(FetchedPage {
            html,
            final_url,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&AppConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn fetches_html_with_status_and_final_url() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<html><head><title>Mock</title></head></html>")
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        let page = fetcher().fetch(&url).await.unwrap();

        assert_eq!(page.status, 200);
        assert!(page.html.contains("<title>Mock</title>"));
        assert_eq!(page.final_url.as_str(), url.as_str());
    }

    #[tokio::test]
    async fn follows_redirects_and_reports_the_final_url() {
        let mut server = mockito::Server::new_async().await;
        let _redirect = server
            .mock("GET", "/")
            .with_status(301)
            .with_header("location", "/landing")
            .create_async()
            .await;
        let _target = server
            .mock("GET", "/landing")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>landed</body></html>")
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        let page = fetcher().fetch(&url).await.unwrap();

        assert!(page.final_url.path().ends_with("/landing"));
        assert_eq!(page.status, 200);
    }

    #[tokio::test]
    async fn rejects_non_html_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();

        match err {
            AppError::UnsupportedContent(ct) => assert_eq!(ct, "application/json"),
            other => panic!("expected UnsupportedContent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_statuses_are_data_not_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(503)
            .with_header("content-type", "text/html")
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        let page = fetcher().fetch(&url).await.unwrap();
        assert_eq!(page.status, 503);
    }

    #[tokio::test]
    async fn truncates_oversized_bodies() {
        let mut server = mockito::Server::new_async().await;
        let big_body = format!("<html>{}</html>", "x".repeat(4096));
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(big_body)
            .create_async()
            .await;

        let config = AppConfig {
            max_html_bytes: 1024,
            ..AppConfig::default()
        };
        let fetcher = PageFetcher::new(&config).unwrap();
        let url = Url::parse(&server.url()).unwrap();
        let page = fetcher.fetch(&url).await.unwrap();

        assert_eq!(page.html.len(), 1024);
    }

    #[tokio::test]
    async fn unreachable_hosts_are_fetch_errors() {
        // Nothing listens on this port once the server is dropped.
        let server = mockito::Server::new_async().await;
        let url = Url::parse(&server.url()).unwrap();
        drop(server);

        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)), "got {err:?}");
    }
}
