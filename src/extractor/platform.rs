//! Platform fingerprinting by known markup markers.

/// Ordered marker table; first match wins, so more specific markers must come
/// before the generic ones (a WooCommerce shop also ships wp-content paths).
const PLATFORM_MARKERS: &[(&str, &str)] = &[
    ("cdn.shopify.com", "Shopify"),
    ("myshopify.com", "Shopify"),
    ("woocommerce", "WooCommerce"),
    ("wp-content", "WordPress"),
    ("wp-includes", "WordPress"),
    ("wixstatic.com", "Wix"),
    ("wix.com", "Wix"),
    ("squarespace", "Squarespace"),
    ("bigcommerce", "BigCommerce"),
    ("prestashop", "PrestaShop"),
    ("magento", "Magento"),
    ("webflow", "Webflow"),
    ("cdn.ecwid.com", "Ecwid"),
];

/// Identify the site platform from lowercased markup. Exactly one label is
/// returned; unrecognized pages report `"unknown"`.
pub fn fingerprint(lower_html: &str) -> &'static str {
    PLATFORM_MARKERS
        .iter()
        .find(|(marker, _)| lower_html.contains(marker))
        .map(|(_, name)| *name)
        .unwrap_or("unknown")
}
