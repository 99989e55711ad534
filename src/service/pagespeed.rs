//! PageSpeed Insights client.
//!
//! Requests the four audit categories for the mobile strategy and normalizes
//! the result. When a configured API key is rejected, the client retries
//! exactly once on the public keyless path; any other failure is terminal and
//! becomes a degraded outcome the analysis carries instead of aborting.

use std::collections::HashMap;

use anyhow::Context;
use rquest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::AppConfig;
use crate::domain::models::{
    CategoryScores, CoreWebVitals, PageSpeedAudit, PageSpeedOutcome, PageStats,
};
use crate::error::Result;
use crate::service::http::{create_client, ClientType};

/// Audit categories requested from the API.
const CATEGORIES: &[&str] = &["performance", "seo", "best-practices", "accessibility"];

pub struct PageSpeedClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PageSpeedClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Standard, config.pagespeed_timeout)?,
            endpoint: config.pagespeed_endpoint.clone(),
            api_key: config.pagespeed_api_key.clone(),
        })
    }

    /// Run the audit. Never returns an error: terminal failures degrade into
    /// [`PageSpeedOutcome::Degraded`] and the caller keeps going.
    pub async fn audit(&self, url: &Url) -> PageSpeedOutcome {
        match self.attempt(url, self.api_key.as_deref()).await {
            Ok(audit) => {
                tracing::info!(
                    "[PSI] audit complete for {} (performance: {:?})",
                    url,
                    audit.scores.performance
                );
                PageSpeedOutcome::Audited(audit)
            }
            Err(err) if self.api_key.is_some() && is_auth_failure(&format!("{err:#}")) => {
                tracing::warn!("[PSI] API key rejected, retrying on the public path: {err:#}");
                match self.attempt(url, None).await {
                    Ok(audit) => PageSpeedOutcome::Audited(audit),
                    Err(retry_err) => {
                        tracing::warn!("[PSI] keyless retry failed: {retry_err:#}");
                        PageSpeedOutcome::Degraded {
                            error: format!("{retry_err:#}"),
                        }
                    }
                }
            }
            Err(err) => {
                tracing::warn!("[PSI] audit failed for {}: {err:#}", url);
                PageSpeedOutcome::Degraded {
                    error: format!("{err:#}"),
                }
            }
        }
    }

    async fn attempt(&self, url: &Url, key: Option<&str>) -> anyhow::Result<PageSpeedAudit> {
        let mut endpoint =
            Url::parse(&self.endpoint).context("invalid PageSpeed endpoint configured")?;
        {
            let mut query = endpoint.query_pairs_mut();
            query.append_pair("url", url.as_str());
            query.append_pair("strategy", "mobile");
            for category in CATEGORIES {
                query.append_pair("category", category);
            }
            if let Some(key) = key {
                query.append_pair("key", key);
            }
        }

        let response = self
            .client
            .get(endpoint.as_str())
            .send()
            .await
            .context("PageSpeed request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read PageSpeed response")?;

        if !status.is_success() {
            anyhow::bail!("PageSpeed API {}: {}", status, api_error_message(&body));
        }

        let parsed: PsiResponse =
            serde_json::from_str(&body).context("failed to parse PageSpeed response")?;
        convert(parsed)
    }
}

/// Matches messages the API sends for rejected, expired or missing keys.
fn is_auth_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    (lower.contains("key") && (lower.contains("invalid") || lower.contains("not valid")))
        || lower.contains("unauthorized")
        || lower.contains("forbidden")
}

/// Pull the API's own error message out of the body when it parses, otherwise
/// fall back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

// ====== Wire types ======

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PsiResponse {
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
struct LighthouseResult {
    #[serde(default)]
    categories: HashMap<String, PsiCategory>,
    #[serde(default)]
    audits: HashMap<String, PsiAudit>,
}

#[derive(Debug, Deserialize)]
struct PsiCategory {
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PsiAudit {
    #[serde(default)]
    numeric_value: Option<f64>,
    #[serde(default)]
    details: Option<Value>,
}

fn convert(response: PsiResponse) -> anyhow::Result<PageSpeedAudit> {
    let lighthouse = response
        .lighthouse_result
        .context("response missing lighthouseResult")?;

    let score_of = |id: &str| {
        lighthouse
            .categories
            .get(id)
            .and_then(|category| category.score)
            .map(|score| (score * 100.0).round().clamp(0.0, 100.0) as u8)
    };
    let numeric = |id: &str| lighthouse.audits.get(id).and_then(|audit| audit.numeric_value);

    let inp = numeric("interaction-to-next-paint")
        .or_else(|| numeric("experimental-interaction-to-next-paint"));

    let total_byte_weight = numeric("total-byte-weight").map(|v| v as u64);
    let request_count = lighthouse
        .audits
        .get("network-requests")
        .and_then(|audit| audit.details.as_ref())
        .and_then(|details| details.get("items"))
        .and_then(|items| items.as_array())
        .map(|items| items.len());
    let page_stats = (total_byte_weight.is_some() || request_count.is_some()).then_some(PageStats {
        total_byte_weight,
        request_count,
    });

    Ok(PageSpeedAudit {
        scores: CategoryScores {
            performance: score_of("performance"),
            seo: score_of("seo"),
            best_practices: score_of("best-practices"),
            accessibility: score_of("accessibility"),
        },
        metrics: CoreWebVitals {
            lcp_ms: numeric("largest-contentful-paint"),
            cls: numeric("cumulative-layout-shift"),
            inp_ms: inp,
        },
        page_stats,
    })
}
