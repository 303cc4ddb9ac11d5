//! Renderers for analysis results.
//!
//! - [`terminal`] — colored summaries and tables; `--quiet` reduces each to one line.
//! - JSON output is produced directly with `serde_json` from the views below.

pub mod terminal;

use serde::Serialize;

use crate::distribution::SentimentDistribution;
use crate::models::{AnnotatedComment, SentimentSource, ThreatReportAssessment};
use crate::sentiment::hybrid::HybridSentimentAnalyzer;
use crate::threat::assessment::analyze_threat_report;
use crate::threat::patterns::ThreatMatcher;

/// A threat-report assessment plus the sentiment stage that fed it, when the
/// sentiment was analyzed rather than supplied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    #[serde(flatten)]
    pub assessment: ThreatReportAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_source: Option<SentimentSource>,
}

impl ReportView {
    /// Assess `report` against a sentiment label supplied by the caller.
    pub fn with_label(matcher: &ThreatMatcher, report: &str, sentiment: &str) -> Self {
        Self {
            assessment: analyze_threat_report(matcher, report, sentiment),
            sentiment_confidence: None,
            sentiment_source: None,
        }
    }
}

/// Classify the sentiment of `report`, then fuse that label into its threat
/// assessment.
pub async fn assess_with_sentiment(
    analyzer: &HybridSentimentAnalyzer,
    matcher: &ThreatMatcher,
    report: &str,
) -> ReportView {
    let outcome = analyzer.analyze_sentiment(report).await;
    ReportView {
        assessment: analyze_threat_report(matcher, report, &outcome.label.to_string()),
        sentiment_confidence: Some(outcome.confidence),
        sentiment_source: Some(outcome.source),
    }
}

#[derive(Debug, Serialize)]
pub struct BatchView<'a> {
    pub comments: &'a [AnnotatedComment],
    pub distribution: &'a SentimentDistribution,
}
