//! Heuristic extraction over fetched markup.
//!
//! The markup is parsed into a tag tree exactly once; every heuristic then
//! queries that tree (or a lowercased copy of the raw text, for the
//! substring-marker tables). Extraction never fails: malformed markup simply
//! yields absent/false findings.

pub mod cta;
pub mod page;
pub mod platform;
pub mod signals;
pub mod trust;

use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::domain::models::{SeoFindings, SignalFindings, TrustFindings, UxFindings};

/// Everything the extractor learns about one page.
#[derive(Debug, Clone, Default)]
pub struct PageFindings {
    pub platform: &'static str,
    pub seo: SeoFindings,
    pub trust: TrustFindings,
    pub ux: UxFindings,
    pub signals: SignalFindings,
}

/// An anchor reduced to the two things the heuristics look at, both
/// lowercased.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// Run every heuristic over the raw markup.
pub fn extract(html: &str) -> PageFindings {
    let document = Html::parse_document(html);
    let lower = html.to_lowercase();
    let anchors = collect_anchors(&document);
    let buttons = collect_button_labels(&document);

    PageFindings {
        platform: platform::fingerprint(&lower),
        seo: page::extract_seo(&document),
        trust: trust::detect(&anchors),
        ux: UxFindings {
            has_primary_cta: cta::detect(&anchors, &buttons),
        },
        signals: signals::extract(&document, &lower),
    }
}

/// Collapse any run of whitespace to a single space and trim.
pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collect all anchors with their visible/accessible label. Falls back to
/// aria-label, title, then a nested image's alt text when the anchor has no
/// text of its own.
fn collect_anchors(document: &Html) -> Vec<Anchor> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());

    static IMG_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let img_selector = IMG_SELECTOR.get_or_init(|| Selector::parse("img[alt]").unwrap());

    document
        .select(selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim();
            if href.is_empty() || href.starts_with("javascript:") {
                return None;
            }

            let mut text = squash_whitespace(&element.text().collect::<String>());
            if text.is_empty() {
                if let Some(attr) = element
                    .value()
                    .attr("aria-label")
                    .or_else(|| element.value().attr("title"))
                {
                    text = squash_whitespace(attr);
                }
            }
            if text.is_empty() {
                for img in element.select(img_selector) {
                    if let Some(alt) = img.value().attr("alt") {
                        if !alt.trim().is_empty() {
                            text = squash_whitespace(alt);
                            break;
                        }
                    }
                }
            }

            Some(Anchor {
                href: href.to_lowercase(),
                text: text.to_lowercase(),
            })
        })
        .collect()
}

/// Collect button labels: `<button>` text plus submit/button input values.
fn collect_button_labels(document: &Html) -> Vec<String> {
    static BUTTON_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let button_selector = BUTTON_SELECTOR.get_or_init(|| Selector::parse("button").unwrap());

    static INPUT_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let input_selector = INPUT_SELECTOR
        .get_or_init(|| Selector::parse("input[type='submit'], input[type='button']").unwrap());

    let mut labels: Vec<String> = document
        .select(button_selector)
        .map(|el| squash_whitespace(&el.text().collect::<String>()).to_lowercase())
        .filter(|label| !label.is_empty())
        .collect();

    labels.extend(
        document
            .select(input_selector)
            .filter_map(|el| el.value().attr("value"))
            .map(|value| squash_whitespace(value).to_lowercase())
            .filter(|label| !label.is_empty()),
    );

    labels
}
