//! Domain entities for the audit report - behavior lives WITH data.

use serde::Serialize;

// ====== Enums ======

/// Severity of an actionable finding.
///
/// Declaration order is rank order: sorting issues by severity puts critical
/// first, and the same order drives the score penalty weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Points subtracted from a dimension score per issue of this severity.
    pub fn penalty(&self) -> u32 {
        match self {
            Severity::Critical => 25,
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 3,
        }
    }
}

// ====== Issues ======

/// One actionable finding with a stable key and remediation text.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub key: &'static str,
    pub severity: Severity,
    pub fix: &'static str,
    /// Whether this issue feeds the dimension score penalty. Advisory issues
    /// are reported but never scored.
    #[serde(skip)]
    pub scored: bool,
}

impl Issue {
    pub fn new(key: &'static str, severity: Severity, fix: &'static str) -> Self {
        Self {
            key,
            severity,
            fix,
            scored: true,
        }
    }

    pub fn advisory(key: &'static str, severity: Severity, fix: &'static str) -> Self {
        Self {
            key,
            severity,
            fix,
            scored: false,
        }
    }

    /// Leading segment of the key: "seo", "trust" or "ux".
    pub fn dimension(&self) -> &'static str {
        self.key.split('.').next().unwrap_or(self.key)
    }
}

// ====== Extractor findings ======

/// On-page SEO metadata pulled from the markup.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoFindings {
    pub title: Option<String>,
    pub meta_desc: Option<String>,
    /// Text of the first H1, if any.
    pub h1: Option<String>,
    pub h1_count: usize,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub open_graph: OpenGraph,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub og_title: Option<String>,
    pub og_desc: Option<String>,
    pub og_image: Option<String>,
}

impl OpenGraph {
    pub fn is_complete(&self) -> bool {
        self.og_title.is_some() && self.og_desc.is_some() && self.og_image.is_some()
    }
}

/// Presence flags for the six trust/policy page categories.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustFindings {
    pub contact: bool,
    pub shipping: bool,
    pub returns: bool,
    pub privacy: bool,
    pub terms: bool,
    pub faq: bool,
}

impl TrustFindings {
    pub fn get(&self, category: &str) -> bool {
        match category {
            "contact" => self.contact,
            "shipping" => self.shipping,
            "returns" => self.returns,
            "privacy" => self.privacy,
            "terms" => self.terms,
            "faq" => self.faq,
            _ => false,
        }
    }

    pub fn set(&mut self, category: &str, present: bool) {
        match category {
            "contact" => self.contact = present,
            "shipping" => self.shipping = present,
            "returns" => self.returns = present,
            "privacy" => self.privacy = present,
            "terms" => self.terms = present,
            "faq" => self.faq = present,
            _ => {}
        }
    }
}

/// Call-to-action heuristic.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UxFindings {
    pub has_primary_cta: bool,
}

/// Secondary page signals: structured data, tracking scripts, PWA readiness.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalFindings {
    pub structured_data_types: Vec<String>,
    pub tracking: Vec<&'static str>,
    pub pwa_ready: bool,
}

// ====== PageSpeed ======

/// Outcome of the external performance audit.
///
/// The degraded variant is a soft failure: the analysis proceeds and the
/// report carries the error string instead of scores.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PageSpeedOutcome {
    Audited(PageSpeedAudit),
    Degraded { error: String },
}

impl PageSpeedOutcome {
    pub fn audit(&self) -> Option<&PageSpeedAudit> {
        match self {
            PageSpeedOutcome::Audited(audit) => Some(audit),
            PageSpeedOutcome::Degraded { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageSpeedOutcome::Audited(_) => None,
            PageSpeedOutcome::Degraded { error } => Some(error),
        }
    }
}

/// Normalized result of a successful PageSpeed audit.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedAudit {
    pub scores: CategoryScores,
    pub metrics: CoreWebVitals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_stats: Option<PageStats>,
}

/// Category scores as integer percent (0-100).
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub performance: Option<u8>,
    pub seo: Option<u8>,
    pub best_practices: Option<u8>,
    pub accessibility: Option<u8>,
}

/// Core Web Vitals pulled from the audit detail map.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreWebVitals {
    pub lcp_ms: Option<f64>,
    pub cls: Option<f64>,
    pub inp_ms: Option<f64>,
}

/// Secondary page weight statistics, present when the audit reports them.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    pub total_byte_weight: Option<u64>,
    pub request_count: Option<usize>,
}

// ====== Aggregate report ======

/// Per-dimension and total scores, all clamped to 0-100.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub total: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<u8>,
    pub seo: u8,
    pub ux: u8,
    pub trust: u8,
}

/// The final audit report. Assembled once, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub input: String,
    pub final_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    pub platform: String,
    pub scores: Scores,
    pub pagespeed: PageSpeedOutcome,
    pub seo: SeoFindings,
    pub trust: TrustFindings,
    pub signals: SignalFindings,
    pub issues: Vec<Issue>,
    pub quick_wins: Vec<String>,
}
