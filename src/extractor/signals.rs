//! Secondary page signals: JSON-LD structured data, tracking scripts and PWA
//! readiness.

use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;

use crate::domain::models::SignalFindings;

/// Cap on reported structured-data types.
const MAX_STRUCTURED_TYPES: usize = 10;

/// Tracking/analytics script markers, lowercase.
const TRACKER_MARKERS: &[(&str, &str)] = &[
    ("googletagmanager.com", "Google Tag Manager"),
    ("google-analytics.com", "Google Analytics"),
    ("gtag(", "Google Analytics"),
    ("connect.facebook.net", "Meta Pixel"),
    ("fbq(", "Meta Pixel"),
    ("clarity.ms", "Microsoft Clarity"),
    ("hotjar", "Hotjar"),
    ("analytics.tiktok.com", "TikTok Pixel"),
    ("snap.licdn.com", "LinkedIn Insight"),
];

pub fn extract(document: &Html, lower_html: &str) -> SignalFindings {
    SignalFindings {
        structured_data_types: structured_data_types(document),
        tracking: detect_trackers(lower_html),
        pwa_ready: detect_pwa(document, lower_html),
    }
}

/// Declared `@type` values across all JSON-LD blocks, deduplicated in
/// discovery order and capped. A block that fails to parse is skipped.
fn structured_data_types(document: &Html) -> Vec<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("script").unwrap());

    let mut types = Vec::new();
    for script in document.select(selector) {
        let script_type = script
            .value()
            .attr("type")
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_default();
        // contains() catches variants like "application/ld+json; charset=utf-8"
        if !script_type.contains("ld+json") {
            continue;
        }

        let raw = script.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<Value>(raw.trim()) else {
            continue;
        };
        walk_types(&value, &mut types);
        if types.len() >= MAX_STRUCTURED_TYPES {
            types.truncate(MAX_STRUCTURED_TYPES);
            break;
        }
    }
    types
}

/// Recursive walk collecting `@type` strings, deduplicated.
fn walk_types(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(declared) = map.get("@type") {
                match declared {
                    Value::String(s) => push_unique(out, s),
                    Value::Array(items) => {
                        for item in items {
                            if let Value::String(s) = item {
                                push_unique(out, s);
                            }
                        }
                    }
                    _ => {}
                }
            }
            for nested in map.values() {
                walk_types(nested, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_types(item, out);
            }
        }
        _ => {}
    }
}

fn push_unique(out: &mut Vec<String>, candidate: &str) {
    if !out.iter().any(|existing| existing == candidate) {
        out.push(candidate.to_string());
    }
}

fn detect_trackers(lower_html: &str) -> Vec<&'static str> {
    let mut found = Vec::new();
    for (marker, name) in TRACKER_MARKERS {
        if lower_html.contains(marker) && !found.contains(name) {
            found.push(*name);
        }
    }
    found
}

/// PWA eligibility: a manifest (or Apple touch icon) link AND a
/// service-worker registration marker.
fn detect_pwa(document: &Html, lower_html: &str) -> bool {
    static MANIFEST_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let manifest_selector = MANIFEST_SELECTOR.get_or_init(|| {
        Selector::parse("link[rel='manifest'], link[rel='apple-touch-icon']").unwrap()
    });

    let has_manifest = document.select(manifest_selector).next().is_some();
    has_manifest && lower_html.contains("serviceworker")
}
