use crate::models::SentimentLabel;

pub const EXTREME_CONFIDENCE: f64 = 0.85;
pub const MODERATE_CONFIDENCE: f64 = 0.70;
pub const NEUTRAL_CONFIDENCE: f64 = 0.55;
pub const UNRECOGNIZED_CONFIDENCE: f64 = 0.50;
/// Reported for blank text, which never reaches the primary analyzer.
pub const BLANK_INPUT_CONFIDENCE: f64 = 0.5;

/// Heuristic confidence for a primary-analyzer label.
///
/// Extreme labels are trusted most and neutral least; a label that does not
/// parse gets [`UNRECOGNIZED_CONFIDENCE`].
pub fn estimate_confidence(raw_label: &str) -> f64 {
    match SentimentLabel::parse(raw_label) {
        Some(SentimentLabel::VeryPositive | SentimentLabel::VeryNegative) => EXTREME_CONFIDENCE,
        Some(SentimentLabel::Positive | SentimentLabel::Negative) => MODERATE_CONFIDENCE,
        Some(SentimentLabel::Neutral) => NEUTRAL_CONFIDENCE,
        None => UNRECOGNIZED_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        assert_eq!(estimate_confidence("Very positive"), 0.85);
        assert_eq!(estimate_confidence("Very negative"), 0.85);
        assert_eq!(estimate_confidence("Positive"), 0.70);
        assert_eq!(estimate_confidence("Negative"), 0.70);
        assert_eq!(estimate_confidence("Neutral"), 0.55);
        assert_eq!(estimate_confidence("Ambivalent"), 0.50);
        assert_eq!(estimate_confidence(""), 0.50);
    }

    #[test]
    fn test_normalized_spellings() {
        assert_eq!(estimate_confidence("VERY_NEGATIVE"), 0.85);
        assert_eq!(estimate_confidence("positive"), 0.70);
    }
}
