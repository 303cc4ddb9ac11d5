use anyhow::Result;
use regex::Regex;
use tracing::info;

use crate::models::ThreatFinding;
use crate::threat::risk::classify_score;

/// Score added for each malicious-pattern group that matches at least once.
pub const PATTERN_WEIGHT: u32 = 20;
/// Score added for each critical keyword present in the text.
pub const KEYWORD_WEIGHT: u32 = 10;

/// Groups of synonymous threat terms. A group counts once, however many of
/// its terms appear.
const PATTERN_GROUPS: &[(&str, &[&str])] = &[
    (
        "malware",
        &["exploit", "vulnerability", "malware", "ransomware", "phishing"],
    ),
    ("intrusion", &["hack", "breach", "attack", "threat", "trojan"]),
    ("injection", &["injection", "xss", "csrf", "backdoor", "payload"]),
    ("botnet", &["ddos", "botnet", "keylogger", "spyware", "rootkit"]),
];

/// Matched as plain substrings of the lowercased text, so "patched" counts
/// for "patch".
const CRITICAL_KEYWORDS: &[&str] = &[
    "critical",
    "severe",
    "urgent",
    "immediate",
    "emergency",
    "zero-day",
    "patch",
    "update",
    "mitigation",
];

struct PatternGroup {
    id: &'static str,
    regex: Regex,
}

/// Compiled indicator tables. Read-only after construction, so one instance
/// can be shared across threads.
pub struct ThreatMatcher {
    groups: Vec<PatternGroup>,
}

impl ThreatMatcher {
    /// Compile the built-in pattern groups (case-insensitive, whole words).
    pub fn new() -> Result<Self> {
        let groups = PATTERN_GROUPS
            .iter()
            .map(|&(id, terms)| {
                let alternation: Vec<String> = terms.iter().map(|t| regex::escape(t)).collect();
                let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation.join("|")))?;
                Ok::<_, anyhow::Error>(PatternGroup { id, regex })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { groups })
    }

    /// Scan `text` for threat indicators and score it.
    ///
    /// Blank input yields [`ThreatFinding::benign`]. Only pattern groups set
    /// `is_threat`; critical keywords raise the score but not the flag.
    pub fn analyze_security_content(&self, text: &str) -> ThreatFinding {
        if text.trim().is_empty() {
            return ThreatFinding::benign();
        }

        let matched_indicators: Vec<String> = self
            .groups
            .iter()
            .filter(|g| g.regex.is_match(text))
            .map(|g| g.id.to_string())
            .collect();

        let lower = text.to_lowercase();
        let critical_keywords: Vec<String> = CRITICAL_KEYWORDS
            .iter()
            .filter(|k| lower.contains(*k))
            .map(|k| k.to_string())
            .collect();

        let threat_score = PATTERN_WEIGHT * matched_indicators.len() as u32
            + KEYWORD_WEIGHT * critical_keywords.len() as u32;
        let is_threat = !matched_indicators.is_empty();
        let risk_level = classify_score(threat_score);

        info!(
            is_threat,
            %risk_level,
            threat_score,
            "security analysis complete"
        );

        ThreatFinding {
            is_threat,
            risk_level,
            threat_score,
            matched_indicators,
            critical_keywords,
        }
    }
}
