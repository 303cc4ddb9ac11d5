//! Two-stage sentiment classification.
//!
//! A cheap [`PrimaryAnalyzer`] labels every text; when its label maps to a
//! confidence below the configured threshold, the [`hybrid`] orchestrator
//! asks a [`SentimentVerifier`] once and keeps whichever answer is usable.

use async_trait::async_trait;

use crate::models::SentimentLabel;

pub mod confidence;
pub mod hybrid;
pub mod lexicon;
pub mod verifier;

/// Fast first-pass classifier.
///
/// Returns a raw five-way label such as `"Very negative"`; the orchestrator
/// normalizes spelling and case. Must not panic on any input, and should
/// return `"Neutral"` for empty text.
pub trait PrimaryAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> String;
}

/// Answer from a secondary verifier. `success == false` means the label and
/// confidence carry no information.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub success: bool,
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl Verification {
    pub fn confirmed(label: SentimentLabel, confidence: f64) -> Self {
        Self {
            success: true,
            label,
            confidence,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            label: SentimentLabel::Neutral,
            confidence: 0.5,
        }
    }
}

/// Slow, authoritative classifier consulted for low-confidence texts.
///
/// Implementations own their timeout and must report every failure as
/// [`Verification::failed`] instead of erroring.
#[async_trait]
pub trait SentimentVerifier: Send + Sync {
    async fn verify(&self, text: &str) -> Verification;
}
