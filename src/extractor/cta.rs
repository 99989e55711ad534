//! Primary call-to-action detection.

use super::Anchor;

/// Call-to-action phrases, lowercase, English plus Hebrew equivalents.
pub const CTA_KEYWORDS: &[&str] = &[
    "buy now",
    "add to cart",
    "shop now",
    "order now",
    "book now",
    "get started",
    "start free",
    "try free",
    "sign up",
    "subscribe",
    "get a quote",
    "קנה עכשיו",
    "קני עכשיו",
    "הוסף לסל",
    "הוספה לסל",
    "הזמן עכשיו",
    "לרכישה",
    "התחל עכשיו",
    "הרשמה",
];

/// True when any anchor or button label contains a call-to-action phrase.
pub fn detect(anchors: &[Anchor], buttons: &[String]) -> bool {
    let label_hits = |label: &str| CTA_KEYWORDS.iter().any(|kw| label.contains(kw));
    anchors.iter().any(|a| label_hits(&a.text)) || buttons.iter().any(|b| label_hits(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(text: &str) -> Anchor {
        Anchor {
            href: "/x".to_string(),
            text: text.to_lowercase(),
        }
    }

    #[test]
    fn detects_anchor_cta() {
        assert!(detect(&[anchor("Shop Now")], &[]));
        assert!(detect(&[anchor("→ Add to cart today")], &[]));
    }

    #[test]
    fn detects_button_cta() {
        assert!(detect(&[], &["buy now".to_string()]));
        assert!(detect(&[], &["הוסף לסל".to_string()]));
    }

    #[test]
    fn plain_navigation_is_not_a_cta() {
        let anchors = vec![anchor("Home"), anchor("About us"), anchor("Blog")];
        assert!(!detect(&anchors, &[]));
        assert!(!detect(&[], &[]));
    }
}
