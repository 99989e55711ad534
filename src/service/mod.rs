pub mod analyzer;
pub mod fetcher;
pub mod http;
pub mod pagespeed;

pub use analyzer::SiteAnalyzer;
pub use fetcher::{FetchedPage, PageFetcher};
pub use pagespeed::PageSpeedClient;
