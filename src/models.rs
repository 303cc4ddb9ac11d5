use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Five-way sentiment scale, ordered from most negative to most positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 5] = [
        SentimentLabel::VeryNegative,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
        SentimentLabel::VeryPositive,
    ];

    /// Parse a label, ignoring case and `_`/`-`/space separators.
    ///
    /// Accepts `"Very negative"`, `"VERY_NEGATIVE"`, `"VeryNegative"`, etc.
    pub fn parse(raw: &str) -> Option<SentimentLabel> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "verynegative" => Some(SentimentLabel::VeryNegative),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            "positive" => Some(SentimentLabel::Positive),
            "verypositive" => Some(SentimentLabel::VeryPositive),
            _ => None,
        }
    }

    /// Lenient normalization for free-form model output: the most specific
    /// phrase found anywhere in `raw` wins, anything else is neutral.
    pub fn from_free_text(raw: &str) -> SentimentLabel {
        let lower = raw.to_lowercase();
        if lower.contains("very positive") {
            SentimentLabel::VeryPositive
        } else if lower.contains("very negative") {
            SentimentLabel::VeryNegative
        } else if lower.contains("positive") {
            SentimentLabel::Positive
        } else if lower.contains("negative") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SentimentLabel::parse(s).ok_or_else(|| anyhow::anyhow!("unrecognized sentiment label: {s:?}"))
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::VeryNegative => write!(f, "Very negative"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::VeryPositive => write!(f, "Very positive"),
        }
    }
}

/// Which stage produced the final sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentSource {
    /// Primary analyzer was confident enough; no escalation.
    Primary,
    /// Escalated; the verifier's label and confidence were used.
    PrimaryWithVerifierFallback,
    /// Escalated but the verifier failed; the primary result was kept.
    PrimaryDegraded,
}

impl std::fmt::Display for SentimentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentSource::Primary => write!(f, "primary"),
            SentimentSource::PrimaryWithVerifierFallback => write!(f, "hybrid (primary + verifier)"),
            SentimentSource::PrimaryDegraded => write!(f, "primary (verifier fallback)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentOutcome {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub source: SentimentSource,
}

/// Ordinal risk tier derived from a threat score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatFinding {
    pub is_threat: bool,
    pub risk_level: RiskLevel,
    /// Unbounded; only the fused severity score is capped.
    pub threat_score: u32,
    /// Identifiers of the malicious-pattern groups that matched, in table order.
    pub matched_indicators: Vec<String>,
    /// Critical keywords found in the text, in table order.
    pub critical_keywords: Vec<String>,
}

impl ThreatFinding {
    pub fn benign() -> Self {
        ThreatFinding {
            is_threat: false,
            risk_level: RiskLevel::Low,
            threat_score: 0,
            matched_indicators: Vec::new(),
            critical_keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatReportAssessment {
    /// The sentiment label exactly as the caller supplied it.
    pub sentiment: String,
    pub risk_level: RiskLevel,
    /// Always within `0..=100`.
    pub severity_score: u32,
    pub is_threat: bool,
    pub matched_indicators: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAnnotation {
    pub emoji: String,
    pub background_color: String,
    pub scalar: f64,
}

/// A comment decorated with its sentiment, as the surrounding application stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedComment {
    pub content: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub source: SentimentSource,
    pub emoji: String,
    pub background_color: String,
    pub sentiment_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_spellings() {
        assert_eq!(SentimentLabel::parse("Very negative"), Some(SentimentLabel::VeryNegative));
        assert_eq!(SentimentLabel::parse("VERY_POSITIVE"), Some(SentimentLabel::VeryPositive));
        assert_eq!(SentimentLabel::parse("VeryPositive"), Some(SentimentLabel::VeryPositive));
        assert_eq!(SentimentLabel::parse("  neutral "), Some(SentimentLabel::Neutral));
        assert_eq!(SentimentLabel::parse("ecstatic"), None);
        assert_eq!(SentimentLabel::parse(""), None);
    }

    #[test]
    fn test_display_parses_back() {
        for label in SentimentLabel::ALL {
            assert_eq!(label.to_string().parse::<SentimentLabel>().unwrap(), label);
        }
    }

    #[test]
    fn test_free_text_most_specific_first() {
        assert_eq!(
            SentimentLabel::from_free_text("Very Negative"),
            SentimentLabel::VeryNegative
        );
        assert_eq!(SentimentLabel::from_free_text("'Negative'"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_free_text("Sentiment: very positive."), SentimentLabel::VeryPositive);
        assert_eq!(SentimentLabel::from_free_text("mixed"), SentimentLabel::Neutral);
    }

    #[test]
    fn test_risk_level_order() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Critical);
        assert_eq!(RiskLevel::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_finding_serializes_camel_case() {
        let json = serde_json::to_value(ThreatFinding::benign()).unwrap();
        assert_eq!(json["isThreat"], false);
        assert_eq!(json["riskLevel"], "LOW");
        assert_eq!(json["threatScore"], 0);
        assert!(json["matchedIndicators"].as_array().unwrap().is_empty());
    }
}
