use anyhow::Result;
use tracing::{info, warn};

use crate::config::{SentimentConfig, VerifierConfig};
use crate::models::{SentimentLabel, SentimentOutcome, SentimentSource};
use crate::sentiment::confidence::{estimate_confidence, BLANK_INPUT_CONFIDENCE};
use crate::sentiment::lexicon::LexiconAnalyzer;
use crate::sentiment::{verifier, PrimaryAnalyzer, SentimentVerifier};

/// Confidence-gated two-stage sentiment classifier.
///
/// Holds no mutable state, so concurrent calls are independent.
pub struct HybridSentimentAnalyzer {
    primary: Box<dyn PrimaryAnalyzer>,
    verifier: Box<dyn SentimentVerifier>,
    threshold: f64,
}

impl HybridSentimentAnalyzer {
    pub fn new(
        primary: Box<dyn PrimaryAnalyzer>,
        verifier: Box<dyn SentimentVerifier>,
        threshold: f64,
    ) -> Self {
        Self {
            primary,
            verifier,
            threshold,
        }
    }

    /// Lexicon primary analyzer plus whatever verifier `verifier_config` allows.
    pub fn from_config(sentiment: &SentimentConfig, verifier_config: &VerifierConfig) -> Result<Self> {
        Ok(Self::new(
            Box::new(LexiconAnalyzer::new()),
            verifier::from_config(verifier_config)?,
            sentiment.confidence_threshold,
        ))
    }

    /// Classify `text`, escalating to the verifier at most once.
    ///
    /// Blank text is neutral without consulting either stage. A verifier
    /// failure yields the primary label and confidence tagged
    /// [`SentimentSource::PrimaryDegraded`].
    pub async fn analyze_sentiment(&self, text: &str) -> SentimentOutcome {
        if text.trim().is_empty() {
            return SentimentOutcome {
                label: SentimentLabel::Neutral,
                confidence: BLANK_INPUT_CONFIDENCE,
                source: SentimentSource::Primary,
            };
        }

        let raw = self.primary.analyze(text);
        let confidence = estimate_confidence(&raw);
        let label = SentimentLabel::parse(&raw).unwrap_or(SentimentLabel::Neutral);

        info!(%label, confidence, "primary sentiment analysis");

        if confidence >= self.threshold {
            return SentimentOutcome {
                label,
                confidence,
                source: SentimentSource::Primary,
            };
        }

        info!(confidence, threshold = self.threshold, "low confidence, escalating to verifier");
        let verification = self.verifier.verify(text).await;

        if verification.success {
            return SentimentOutcome {
                label: verification.label,
                confidence: verification.confidence,
                source: SentimentSource::PrimaryWithVerifierFallback,
            };
        }

        warn!("verifier unavailable, keeping primary result");
        SentimentOutcome {
            label,
            confidence,
            source: SentimentSource::PrimaryDegraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Verification;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedPrimary(&'static str);

    impl PrimaryAnalyzer for FixedPrimary {
        fn analyze(&self, _text: &str) -> String {
            self.0.to_string()
        }
    }

    struct CountingVerifier {
        reply: Verification,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SentimentVerifier for CountingVerifier {
        async fn verify(&self, _text: &str) -> Verification {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn hybrid(primary: &'static str, reply: Verification) -> (HybridSentimentAnalyzer, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let verifier = CountingVerifier {
            reply,
            calls: Arc::clone(&calls),
        };
        (
            HybridSentimentAnalyzer::new(Box::new(FixedPrimary(primary)), Box::new(verifier), 0.7),
            calls,
        )
    }

    #[tokio::test]
    async fn test_confident_primary_skips_verifier() {
        for (raw, label, confidence) in [
            ("Very positive", SentimentLabel::VeryPositive, 0.85),
            ("Very negative", SentimentLabel::VeryNegative, 0.85),
            ("Positive", SentimentLabel::Positive, 0.70),
            ("Negative", SentimentLabel::Negative, 0.70),
        ] {
            let (analyzer, calls) =
                hybrid(raw, Verification::confirmed(SentimentLabel::Neutral, 0.99));
            let outcome = analyzer.analyze_sentiment("some text").await;
            assert_eq!(
                outcome,
                SentimentOutcome {
                    label,
                    confidence,
                    source: SentimentSource::Primary
                }
            );
            assert_eq!(calls.load(Ordering::SeqCst), 0, "verifier called for {raw}");
        }
    }

    #[tokio::test]
    async fn test_low_confidence_uses_verifier_answer() {
        let (analyzer, calls) =
            hybrid("Neutral", Verification::confirmed(SentimentLabel::Negative, 0.64));
        let outcome = analyzer.analyze_sentiment("The service is okay.").await;

        assert_eq!(outcome.label, SentimentLabel::Negative);
        assert_eq!(outcome.confidence, 0.64);
        assert_eq!(outcome.source, SentimentSource::PrimaryWithVerifierFallback);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_verifier_failure_keeps_primary() {
        let (analyzer, calls) = hybrid("Neutral", Verification::failed());
        let outcome = analyzer.analyze_sentiment("The service is okay.").await;

        assert_eq!(outcome.label, SentimentLabel::Neutral);
        assert_eq!(outcome.confidence, 0.55);
        assert_eq!(outcome.source, SentimentSource::PrimaryDegraded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_primary_label_escalates() {
        let (analyzer, calls) = hybrid("Mixed", Verification::failed());
        let outcome = analyzer.analyze_sentiment("hmm").await;

        assert_eq!(outcome.label, SentimentLabel::Neutral);
        assert_eq!(outcome.confidence, 0.50);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_text_is_neutral_without_calls() {
        let (analyzer, calls) =
            hybrid("Very negative", Verification::confirmed(SentimentLabel::Negative, 0.9));
        for text in ["", "   ", "\n\t"] {
            let outcome = analyzer.analyze_sentiment(text).await;
            assert_eq!(outcome.label, SentimentLabel::Neutral);
            assert_eq!(outcome.confidence, BLANK_INPUT_CONFIDENCE);
            assert_eq!(outcome.source, SentimentSource::Primary);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_threshold_is_configurable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let verifier = CountingVerifier {
            reply: Verification::confirmed(SentimentLabel::VeryPositive, 0.95),
            calls: Arc::clone(&calls),
        };
        let analyzer =
            HybridSentimentAnalyzer::new(Box::new(FixedPrimary("Positive")), Box::new(verifier), 0.8);

        let outcome = analyzer.analyze_sentiment("decent").await;
        assert_eq!(outcome.source, SentimentSource::PrimaryWithVerifierFallback);
        assert_eq!(outcome.label, SentimentLabel::VeryPositive);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_from_config_without_credential_degrades() {
        let analyzer =
            HybridSentimentAnalyzer::from_config(&SentimentConfig::default(), &VerifierConfig::default())
                .unwrap();

        let neutral = analyzer.analyze_sentiment("The product exists and has features.").await;
        assert_eq!(neutral.label, SentimentLabel::Neutral);
        assert_eq!(neutral.source, SentimentSource::PrimaryDegraded);

        let positive = analyzer
            .analyze_sentiment("I absolutely love this amazing product! It's fantastic!")
            .await;
        assert_eq!(positive.label, SentimentLabel::VeryPositive);
        assert_eq!(positive.source, SentimentSource::Primary);
    }
}
