//! Trust/policy page detection.
//!
//! Each category is a keyword table matched against every anchor's href and
//! visible label. Keywords carry English plus Hebrew equivalents; adding a
//! locale or a category is a data change, not new logic.

use super::Anchor;
use crate::domain::models::TrustFindings;

pub struct TrustCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Keyword tables per category. All entries lowercase; anchors are lowercased
/// before matching.
pub const TRUST_CATEGORIES: &[TrustCategory] = &[
    TrustCategory {
        name: "contact",
        keywords: &["contact", "צור קשר", "יצירת קשר"],
    },
    TrustCategory {
        name: "shipping",
        keywords: &["shipping", "delivery", "משלוח", "אספקה"],
    },
    TrustCategory {
        name: "returns",
        keywords: &["return", "refund", "החזר", "ביטול עסקה"],
    },
    TrustCategory {
        name: "privacy",
        keywords: &["privacy", "פרטיות"],
    },
    TrustCategory {
        name: "terms",
        keywords: &["terms", "tos", "תקנון", "תנאי שימוש"],
    },
    TrustCategory {
        name: "faq",
        keywords: &["faq", "שאלות נפוצות", "שאלות ותשובות"],
    },
];

/// Flag each trust category present when any anchor's href or label contains
/// one of its keywords.
pub fn detect(anchors: &[Anchor]) -> TrustFindings {
    let mut findings = TrustFindings::default();
    for category in TRUST_CATEGORIES {
        let present = anchors.iter().any(|anchor| {
            category
                .keywords
                .iter()
                .any(|kw| anchor.href.contains(kw) || anchor.text.contains(kw))
        });
        findings.set(category.name, present);
    }
    findings
}
