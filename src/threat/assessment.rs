use crate::models::{RiskLevel, ThreatReportAssessment};
use crate::threat::patterns::ThreatMatcher;

/// Upper bound of the fused severity score.
pub const MAX_SEVERITY: u32 = 100;

/// Fuse a threat report with a sentiment label into one severity assessment.
///
/// The severity starts at the report's threat score, gains a penalty for
/// negative sentiment, and saturates at [`MAX_SEVERITY`]. The recommendation
/// follows the matcher's risk level, not the fused score.
pub fn analyze_threat_report(
    matcher: &ThreatMatcher,
    report: &str,
    sentiment: &str,
) -> ThreatReportAssessment {
    let finding = matcher.analyze_security_content(report);

    let severity_score = finding
        .threat_score
        .saturating_add(sentiment_penalty(sentiment))
        .min(MAX_SEVERITY);

    ThreatReportAssessment {
        sentiment: sentiment.to_string(),
        risk_level: finding.risk_level,
        severity_score,
        is_threat: finding.is_threat,
        matched_indicators: finding.matched_indicators,
        recommendation: recommendation(finding.risk_level).to_string(),
    }
}

/// Extra severity contributed by the sentiment label.
///
/// Substring matching: "very negative" has to be tested before "negative",
/// which it contains. Labels such as "not negative" would still match.
pub fn sentiment_penalty(sentiment: &str) -> u32 {
    let lower = sentiment.to_lowercase();
    if lower.contains("very negative") {
        25
    } else if lower.contains("negative") {
        15
    } else {
        0
    }
}

/// Fixed action text for each risk level.
pub fn recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => {
            "IMMEDIATE ACTION REQUIRED: Critical security threat detected. \
             Escalate to security team immediately and implement emergency protocols."
        }
        RiskLevel::High => {
            "HIGH PRIORITY: Significant security concern identified. \
             Review and address within 24 hours."
        }
        RiskLevel::Medium => {
            "MODERATE PRIORITY: Potential security issue detected. \
             Schedule review and assessment within 72 hours."
        }
        RiskLevel::Low => "LOW PRIORITY: Monitor and track. No immediate action required.",
    }
}
