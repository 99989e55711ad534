//! Issue synthesis: a fixed rule table over the extractor findings.
//!
//! Rules are independent and evaluated unconditionally; each produces at most
//! one issue. The resulting list is stable-sorted by severity rank, so issues
//! of equal severity keep discovery order (SEO, then trust, then UX).

use crate::domain::models::{Issue, Severity};
use crate::extractor::PageFindings;

/// Acceptable title length in characters, inclusive.
const TITLE_LENGTH: (usize, usize) = (25, 65);
/// Acceptable meta description length in characters, inclusive.
const META_DESC_LENGTH: (usize, usize) = (70, 170);

struct TrustRule {
    category: &'static str,
    key: &'static str,
    severity: Severity,
    /// FAQ presence is advisory: reported, but kept out of the trust score.
    scored: bool,
    fix: &'static str,
}

const TRUST_RULES: &[TrustRule] = &[
    TrustRule {
        category: "contact",
        key: "trust.contact.missing",
        severity: Severity::High,
        scored: true,
        fix: "Add a contact page and link it from the main navigation",
    },
    TrustRule {
        category: "shipping",
        key: "trust.shipping.missing",
        severity: Severity::High,
        scored: true,
        fix: "Publish a shipping policy page and link it in the footer",
    },
    TrustRule {
        category: "returns",
        key: "trust.returns.missing",
        severity: Severity::High,
        scored: true,
        fix: "Publish a returns and refunds policy page and link it in the footer",
    },
    TrustRule {
        category: "privacy",
        key: "trust.privacy.missing",
        severity: Severity::Medium,
        scored: true,
        fix: "Add a privacy policy page",
    },
    TrustRule {
        category: "terms",
        key: "trust.terms.missing",
        severity: Severity::Low,
        scored: true,
        fix: "Add a terms of service page",
    },
    TrustRule {
        category: "faq",
        key: "trust.faq.missing",
        severity: Severity::Low,
        scored: false,
        fix: "Add an FAQ page answering common pre-purchase questions",
    },
];

/// Apply the full rule table and return the severity-sorted issue list.
pub fn synthesize(findings: &PageFindings) -> Vec<Issue> {
    let mut issues = Vec::new();

    // SEO rules
    match &findings.seo.title {
        None => issues.push(Issue::new(
            "seo.title.missing",
            Severity::High,
            "Add a unique, descriptive title tag (25-65 characters)",
        )),
        Some(title) => {
            let len = title.chars().count();
            if len < TITLE_LENGTH.0 || len > TITLE_LENGTH.1 {
                issues.push(Issue::new(
                    "seo.title.length",
                    Severity::Medium,
                    "Rewrite the title to 25-65 characters with the main keyword first",
                ));
            }
        }
    }

    match &findings.seo.meta_desc {
        None => issues.push(Issue::new(
            "seo.metadesc.missing",
            Severity::High,
            "Add a compelling meta description (70-170 characters)",
        )),
        Some(desc) => {
            let len = desc.chars().count();
            if len < META_DESC_LENGTH.0 || len > META_DESC_LENGTH.1 {
                issues.push(Issue::new(
                    "seo.metadesc.length",
                    Severity::Medium,
                    "Adjust the meta description to 70-170 characters",
                ));
            }
        }
    }

    if findings.seo.h1_count == 0 {
        issues.push(Issue::new(
            "seo.h1.missing",
            Severity::High,
            "Add one H1 heading with the main keyword near the top",
        ));
    } else if findings.seo.h1_count > 1 {
        issues.push(Issue::new(
            "seo.h1.multiple",
            Severity::Low,
            "Use a single H1 per page and demote the rest to H2",
        ));
    }

    if findings.seo.canonical.is_none() {
        issues.push(Issue::new(
            "seo.canonical.missing",
            Severity::Low,
            "Add a canonical link tag to prevent duplicate content issues",
        ));
    }

    if let Some(robots) = &findings.seo.robots {
        if robots.to_lowercase().contains("noindex") {
            issues.push(Issue::new(
                "seo.noindex",
                Severity::Critical,
                "Remove the noindex directive so search engines can index the page",
            ));
        }
    }

    if !findings.seo.open_graph.is_complete() {
        issues.push(Issue::new(
            "seo.opengraph.incomplete",
            Severity::Low,
            "Add og:title, og:description and og:image for rich link previews",
        ));
    }

    // Trust rules
    for rule in TRUST_RULES {
        if !findings.trust.get(rule.category) {
            let issue = if rule.scored {
                Issue::new(rule.key, rule.severity, rule.fix)
            } else {
                Issue::advisory(rule.key, rule.severity, rule.fix)
            };
            issues.push(issue);
        }
    }

    // UX rules
    if !findings.ux.has_primary_cta {
        issues.push(Issue::new(
            "ux.cta.unclear",
            Severity::Medium,
            "Add a clear primary call to action above the fold",
        ));
    }

    // Stable sort keeps discovery order within a severity.
    issues.sort_by_key(|issue| issue.severity);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{OpenGraph, TrustFindings, UxFindings};
    use crate::extractor::PageFindings;

    fn keys(issues: &[Issue]) -> Vec<&'static str> {
        issues.iter().map(|i| i.key).collect()
    }

    fn clean_findings() -> PageFindings {
        let mut findings = PageFindings::default();
        findings.seo.title = Some("A".repeat(45));
        findings.seo.meta_desc = Some("B".repeat(120));
        findings.seo.h1_count = 1;
        findings.seo.h1 = Some("Welcome".to_string());
        findings.seo.canonical = Some("https://example.com/".to_string());
        findings.seo.open_graph = OpenGraph {
            og_title: Some("t".to_string()),
            og_desc: Some("d".to_string()),
            og_image: Some("i".to_string()),
        };
        findings.trust = TrustFindings {
            contact: true,
            shipping: true,
            returns: true,
            privacy: true,
            terms: true,
            faq: true,
        };
        findings.ux = UxFindings {
            has_primary_cta: true,
        };
        findings
    }

    #[test]
    fn clean_page_has_zero_issues() {
        assert!(synthesize(&clean_findings()).is_empty());
    }

    #[test]
    fn bare_page_produces_the_full_issue_set_sorted() {
        // Title present but empty, one H1, nothing else.
        let mut findings = PageFindings::default();
        findings.seo.h1_count = 1;
        findings.seo.h1 = Some("Welcome".to_string());

        let issues = synthesize(&findings);
        assert_eq!(
            keys(&issues),
            vec![
                // high, discovery order: SEO before trust
                "seo.title.missing",
                "seo.metadesc.missing",
                "trust.contact.missing",
                "trust.shipping.missing",
                "trust.returns.missing",
                // medium
                "trust.privacy.missing",
                "ux.cta.unclear",
                // low
                "seo.canonical.missing",
                "seo.opengraph.incomplete",
                "trust.terms.missing",
                "trust.faq.missing",
            ]
        );
    }

    #[test]
    fn title_length_bounds_are_inclusive() {
        let mut findings = clean_findings();
        findings.seo.title = Some("A".repeat(25));
        assert!(synthesize(&findings).is_empty());

        findings.seo.title = Some("A".repeat(65));
        assert!(synthesize(&findings).is_empty());

        findings.seo.title = Some("A".repeat(24));
        assert_eq!(keys(&synthesize(&findings)), vec!["seo.title.length"]);

        findings.seo.title = Some("A".repeat(66));
        assert_eq!(keys(&synthesize(&findings)), vec!["seo.title.length"]);
    }

    #[test]
    fn meta_description_length_bounds_are_inclusive() {
        let mut findings = clean_findings();
        findings.seo.meta_desc = Some("B".repeat(70));
        assert!(synthesize(&findings).is_empty());

        findings.seo.meta_desc = Some("B".repeat(170));
        assert!(synthesize(&findings).is_empty());

        findings.seo.meta_desc = Some("B".repeat(171));
        assert_eq!(keys(&synthesize(&findings)), vec!["seo.metadesc.length"]);
    }

    #[test]
    fn noindex_is_critical_and_sorts_first() {
        let mut findings = clean_findings();
        findings.seo.robots = Some("NOINDEX, nofollow".to_string());
        findings.trust.contact = false;

        let issues = synthesize(&findings);
        assert_eq!(issues[0].key, "seo.noindex");
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[1].key, "trust.contact.missing");
    }

    #[test]
    fn multiple_h1_is_low_severity() {
        let mut findings = clean_findings();
        findings.seo.h1_count = 3;
        let issues = synthesize(&findings);
        assert_eq!(keys(&issues), vec!["seo.h1.multiple"]);
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn faq_issue_is_advisory() {
        let mut findings = clean_findings();
        findings.trust.faq = false;
        let issues = synthesize(&findings);
        assert_eq!(keys(&issues), vec!["trust.faq.missing"]);
        assert!(!issues[0].scored);
    }
}
