//! Single-page website quality audit.
//!
//! The pipeline validates a target URL, fetches its markup once, runs
//! heuristic extraction (SEO tags, trust links, CTA, platform fingerprint,
//! secondary signals), synthesizes severity-ranked issues, folds in a
//! PageSpeed Insights audit and aggregates everything into one weighted
//! report.

pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod issues;
pub mod normalize;
pub mod scoring;
pub mod service;

pub use config::AppConfig;
pub use domain::models::AnalysisReport;
pub use error::{AppError, Result};
pub use service::SiteAnalyzer;
