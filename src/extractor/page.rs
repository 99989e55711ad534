//! On-page SEO metadata extraction.

use scraper::{Html, Selector};
use std::sync::OnceLock;

use super::squash_whitespace;
use crate::domain::models::{OpenGraph, SeoFindings};

pub fn extract_seo(document: &Html) -> SeoFindings {
    let (h1_count, h1) = extract_h1(document);

    SeoFindings {
        title: extract_title(document),
        meta_desc: extract_meta_content(document, "description"),
        h1,
        h1_count,
        canonical: extract_canonical(document),
        robots: extract_meta_content(document, "robots"),
        open_graph: OpenGraph {
            og_title: extract_og(document, "og:title"),
            og_desc: extract_og(document, "og:description"),
            og_image: extract_og(document, "og:image"),
        },
    }
}

fn extract_title(document: &Html) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
    document
        .select(selector)
        .next()
        .map(|el| squash_whitespace(&el.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn extract_meta_content(document: &Html, name: &str) -> Option<String> {
    static DESC_SELECTOR: OnceLock<Selector> = OnceLock::new();
    static ROBOTS_SELECTOR: OnceLock<Selector> = OnceLock::new();

    let selector = match name {
        "description" => {
            DESC_SELECTOR.get_or_init(|| Selector::parse("meta[name='description']").unwrap())
        }
        "robots" => ROBOTS_SELECTOR.get_or_init(|| Selector::parse("meta[name='robots']").unwrap()),
        _ => return None,
    };

    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(squash_whitespace)
        .filter(|s| !s.is_empty())
}

fn extract_canonical(document: &Html) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("link[rel='canonical']").unwrap());
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Count all H1 tags and keep the first non-empty text.
fn extract_h1(document: &Html) -> (usize, Option<String>) {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("h1").unwrap());

    let mut count = 0;
    let mut first = None;
    for el in document.select(selector) {
        count += 1;
        if first.is_none() {
            let text = squash_whitespace(&el.text().collect::<String>());
            if !text.is_empty() {
                first = Some(text);
            }
        }
    }
    (count, first)
}

fn extract_og(document: &Html, property: &str) -> Option<String> {
    static TITLE_SELECTOR: OnceLock<Selector> = OnceLock::new();
    static DESC_SELECTOR: OnceLock<Selector> = OnceLock::new();
    static IMAGE_SELECTOR: OnceLock<Selector> = OnceLock::new();

    let selector = match property {
        "og:title" => {
            TITLE_SELECTOR.get_or_init(|| Selector::parse("meta[property='og:title']").unwrap())
        }
        "og:description" => DESC_SELECTOR
            .get_or_init(|| Selector::parse("meta[property='og:description']").unwrap()),
        "og:image" => {
            IMAGE_SELECTOR.get_or_init(|| Selector::parse("meta[property='og:image']").unwrap())
        }
        _ => return None,
    };

    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(squash_whitespace)
        .filter(|s| !s.is_empty())
}
