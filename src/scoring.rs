//! Score aggregation and quick-win selection.
//!
//! Trust and UX scores subtract a fixed penalty per issue severity from 100.
//! The SEO score prefers the external audit's SEO category when available.
//! The total redistributes the performance weight across the remaining
//! dimensions when the external audit is unavailable, so a third-party outage
//! never drags the total down by itself.

use crate::domain::models::{Issue, PageSpeedOutcome, Scores, Severity};

/// Cap on the quick-wins shortlist.
pub const QUICK_WIN_LIMIT: usize = 7;

/// Weights applied when a performance score is available.
const WEIGHTS_WITH_PERF: (f64, f64, f64, f64) = (0.35, 0.30, 0.20, 0.15); // perf, ux, seo, trust
/// Weights applied when the external audit is unavailable.
const WEIGHTS_NO_PERF: (f64, f64, f64) = (0.40, 0.35, 0.25); // seo, ux, trust

pub fn aggregate(issues: &[Issue], pagespeed: &PageSpeedOutcome) -> Scores {
    let trust = penalty_score(scored_dimension(issues, "trust"));
    let ux = penalty_score(scored_dimension(issues, "ux"));

    let audit_scores = pagespeed.audit().map(|audit| audit.scores);
    let seo = audit_scores
        .and_then(|scores| scores.seo)
        .unwrap_or_else(|| penalty_score(scored_dimension(issues, "seo")));
    let performance = audit_scores.and_then(|scores| scores.performance);

    let total = match performance {
        Some(perf) => {
            let (wp, wu, ws, wt) = WEIGHTS_WITH_PERF;
            wp * f64::from(perf) + wu * f64::from(ux) + ws * f64::from(seo) + wt * f64::from(trust)
        }
        None => {
            let (ws, wu, wt) = WEIGHTS_NO_PERF;
            ws * f64::from(seo) + wu * f64::from(ux) + wt * f64::from(trust)
        }
    };

    Scores {
        total: total.round().clamp(0.0, 100.0) as u8,
        performance,
        seo,
        ux,
        trust,
    }
}

/// Remediation texts of up to [`QUICK_WIN_LIMIT`] critical/high/medium
/// issues. Relies on the issue list already being severity-sorted, which
/// makes this a pure projection of it.
pub fn quick_wins(issues: &[Issue]) -> Vec<String> {
    issues
        .iter()
        .filter(|issue| issue.severity < Severity::Low)
        .take(QUICK_WIN_LIMIT)
        .map(|issue| issue.fix.to_string())
        .collect()
}

fn scored_dimension<'a>(
    issues: &'a [Issue],
    dimension: &'a str,
) -> impl Iterator<Item = &'a Issue> {
    issues
        .iter()
        .filter(move |issue| issue.scored && issue.dimension() == dimension)
}

fn penalty_score<'a>(issues: impl Iterator<Item = &'a Issue>) -> u8 {
    let penalty: u32 = issues.map(|issue| issue.severity.penalty()).sum();
    100_u32.saturating_sub(penalty).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CategoryScores, CoreWebVitals, PageSpeedAudit};

    fn degraded() -> PageSpeedOutcome {
        PageSpeedOutcome::Degraded {
            error: "unreachable".to_string(),
        }
    }

    fn audited(performance: Option<u8>, seo: Option<u8>) -> PageSpeedOutcome {
        PageSpeedOutcome::Audited(PageSpeedAudit {
            scores: CategoryScores {
                performance,
                seo,
                best_practices: None,
                accessibility: None,
            },
            metrics: CoreWebVitals::default(),
            page_stats: None,
        })
    }

    fn all_trust_missing_issues() -> Vec<Issue> {
        vec![
            Issue::new("trust.contact.missing", Severity::High, "a"),
            Issue::new("trust.shipping.missing", Severity::High, "b"),
            Issue::new("trust.returns.missing", Severity::High, "c"),
            Issue::new("trust.privacy.missing", Severity::Medium, "d"),
            Issue::new("trust.terms.missing", Severity::Low, "e"),
            Issue::advisory("trust.faq.missing", Severity::Low, "f"),
        ]
    }

    #[test]
    fn trust_score_for_all_categories_missing_is_44() {
        let scores = aggregate(&all_trust_missing_issues(), &degraded());
        // 100 - (3x15 + 8 + 3); the advisory FAQ issue does not penalize.
        assert_eq!(scores.trust, 44);
    }

    #[test]
    fn clean_dimensions_score_100() {
        let scores = aggregate(&[], &degraded());
        assert_eq!(scores.trust, 100);
        assert_eq!(scores.ux, 100);
        assert_eq!(scores.seo, 100);
        assert!(scores.performance.is_none());
        // 0.40*100 + 0.35*100 + 0.25*100
        assert_eq!(scores.total, 100);
    }

    #[test]
    fn scores_never_go_below_zero() {
        let issues: Vec<Issue> = (0..8)
            .map(|_| Issue::new("ux.cta.unclear", Severity::Critical, "x"))
            .collect();
        let scores = aggregate(&issues, &degraded());
        assert_eq!(scores.ux, 0);
    }

    #[test]
    fn seo_score_prefers_the_external_audit() {
        let issues = vec![Issue::new("seo.title.missing", Severity::High, "x")];
        let scores = aggregate(&issues, &audited(Some(80), Some(91)));
        assert_eq!(scores.seo, 91);

        // Without the audit, the penalty formula applies: 100 - 15.
        let scores = aggregate(&issues, &degraded());
        assert_eq!(scores.seo, 85);
    }

    #[test]
    fn total_uses_four_term_weighting_with_performance() {
        let scores = aggregate(&all_trust_missing_issues(), &audited(Some(60), Some(90)));
        // 0.35*60 + 0.30*100 + 0.20*90 + 0.15*44 = 21 + 30 + 18 + 6.6 = 75.6
        assert_eq!(scores.performance, Some(60));
        assert_eq!(scores.total, 76);
    }

    #[test]
    fn total_redistributes_weights_without_performance() {
        let scores = aggregate(&all_trust_missing_issues(), &degraded());
        // seo 100, ux 100, trust 44: 40 + 35 + 11 = 86
        assert_eq!(scores.total, 86);
    }

    #[test]
    fn audit_without_performance_category_falls_back_to_three_terms() {
        let scores = aggregate(&[], &audited(None, Some(90)));
        assert_eq!(scores.seo, 90);
        assert!(scores.performance.is_none());
        // 0.40*90 + 0.35*100 + 0.25*100 = 96
        assert_eq!(scores.total, 96);
    }

    #[test]
    fn quick_wins_exclude_low_and_cap_at_seven() {
        let mut issues = vec![
            Issue::new("seo.noindex", Severity::Critical, "fix-critical"),
            Issue::new("seo.title.missing", Severity::High, "fix-1"),
            Issue::new("seo.metadesc.missing", Severity::High, "fix-2"),
            Issue::new("trust.contact.missing", Severity::High, "fix-3"),
            Issue::new("trust.shipping.missing", Severity::High, "fix-4"),
            Issue::new("trust.returns.missing", Severity::High, "fix-5"),
            Issue::new("trust.privacy.missing", Severity::Medium, "fix-6"),
            Issue::new("ux.cta.unclear", Severity::Medium, "fix-7"),
            Issue::new("seo.canonical.missing", Severity::Low, "never-listed"),
        ];
        issues.sort_by_key(|issue| issue.severity);

        let wins = quick_wins(&issues);
        assert_eq!(wins.len(), QUICK_WIN_LIMIT);
        assert_eq!(wins[0], "fix-critical");
        assert!(!wins.contains(&"never-listed".to_string()));
        // A projection of the sorted issue list: order is preserved.
        assert_eq!(wins[1], "fix-1");
    }

    #[test]
    fn quick_wins_of_a_clean_report_are_empty() {
        assert!(quick_wins(&[]).is_empty());
    }
}
