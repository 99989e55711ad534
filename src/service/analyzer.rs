//! Pipeline orchestration: normalize, fetch, extract, synthesize, score.

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::AppConfig;
use crate::domain::models::AnalysisReport;
use crate::error::{AppError, Result};
use crate::normalize::normalize_url;
use crate::service::fetcher::PageFetcher;
use crate::service::pagespeed::PageSpeedClient;
use crate::{extractor, issues, scoring};

/// One analyzer instance serves any number of independent, stateless audits.
pub struct SiteAnalyzer {
    fetcher: PageFetcher,
    pagespeed: PageSpeedClient,
}

impl SiteAnalyzer {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            pagespeed: PageSpeedClient::new(config)?,
        })
    }

    /// Audit a user-supplied domain or URL.
    pub async fn analyze(&self, input: &str) -> Result<AnalysisReport> {
        self.analyze_with_cancel(input, &CancellationToken::new())
            .await
    }

    /// Audit with caller-initiated cancellation. When the token fires, the
    /// in-flight network calls are dropped and `AppError::Cancelled` is
    /// returned.
    pub async fn analyze_with_cancel(
        &self,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisReport> {
        let url = normalize_url(input)?;
        self.guarded(input.to_string(), url, cancel).await
    }

    /// Audit an already-validated URL as-is, skipping target normalization.
    pub async fn analyze_url(
        &self,
        url: Url,
        cancel: &CancellationToken,
    ) -> Result<AnalysisReport> {
        self.guarded(url.to_string(), url, cancel).await
    }

    async fn guarded(
        &self,
        input: String,
        url: Url,
        cancel: &CancellationToken,
    ) -> Result<AnalysisReport> {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::warn!("[ANALYZE] cancelled: {}", input);
                Err(AppError::Cancelled)
            }
            report = self.run(input.clone(), url) => report,
        }
    }

    async fn run(&self, input: String, url: Url) -> Result<AnalysisReport> {
        // A transport failure degrades the report; a non-HTML response is
        // fatal for the whole analysis.
        let fetched = match self.fetcher.fetch(&url).await {
            Ok(page) => Some(page),
            Err(err @ AppError::UnsupportedContent(_)) => return Err(err),
            Err(AppError::Fetch(reason)) => {
                tracing::warn!("[ANALYZE] fetch failed, degrading report: {}", reason);
                None
            }
            Err(other) => return Err(other),
        };

        let (final_url, http_status, html) = match fetched {
            Some(page) => (page.final_url, Some(page.status), page.html),
            None => (url, None, String::new()),
        };

        // The PageSpeed call only needs the resolved URL; let it run while
        // extraction chews on the markup.
        let psi = self.pagespeed.audit(&final_url);
        let (pagespeed, findings) = tokio::join!(psi, async { extractor::extract(&html) });

        let issues = issues::synthesize(&findings);
        let scores = scoring::aggregate(&issues, &pagespeed);
        let quick_wins = scoring::quick_wins(&issues);

        tracing::info!(
            "[ANALYZE] {} -> total {} ({} issues, platform {})",
            final_url,
            scores.total,
            issues.len(),
            findings.platform
        );

        Ok(AnalysisReport {
            input,
            final_url: final_url.to_string(),
            http_status,
            platform: findings.platform.to_string(),
            scores,
            pagespeed,
            seo: findings.seo,
            trust: findings.trust,
            signals: findings.signals,
            issues,
            quick_wins,
        })
    }
}
