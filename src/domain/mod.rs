pub mod models;

pub use models::{
    AnalysisReport, Issue, OpenGraph, PageSpeedAudit, PageSpeedOutcome, Scores, SeoFindings,
    Severity, SignalFindings, TrustFindings, UxFindings,
};
