use crate::models::SentimentLabel;
use crate::sentiment::PrimaryAnalyzer;

const POSITIVE: &[&str] = &[
    "good", "great", "excellent", "amazing", "awesome", "fantastic", "wonderful", "love",
    "loved", "like", "liked", "enjoy", "enjoyed", "happy", "glad", "nice", "best", "brilliant",
    "perfect", "pleased", "recommend", "helpful", "beautiful", "delightful", "superb", "thanks",
    "secure", "resolved", "fixed", "fast", "reliable",
];

const NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "hated", "worst", "poor", "sad", "angry",
    "disappointed", "disappointing", "broken", "useless", "annoying", "slow", "ugly", "fail",
    "failed", "failure", "problem", "wrong", "crash", "crashed", "buggy", "dangerous", "compromised",
    "infected", "leaked", "stolen",
];

const INTENSIFIERS: &[&str] = &[
    "very", "really", "absolutely", "extremely", "so", "totally", "incredibly",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "wasn't", "can't", "won't",
];

/// Deterministic lexicon scorer used as the primary analyzer.
///
/// Each sentiment word scores ±1. A preceding intensifier doubles it and a
/// preceding negator flips it; both reset after the next sentiment word.
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn score(text: &str) -> i32 {
        let lower = text.to_lowercase();
        let mut score = 0;
        let mut multiplier = 1;
        let mut negate = false;

        for token in lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
        {
            if INTENSIFIERS.contains(&token) {
                multiplier = 2;
                continue;
            }
            if NEGATORS.contains(&token) {
                negate = true;
                continue;
            }

            let polarity = if POSITIVE.contains(&token) {
                1
            } else if NEGATIVE.contains(&token) {
                -1
            } else {
                continue;
            };

            let value = polarity * multiplier;
            score += if negate { -value } else { value };
            multiplier = 1;
            negate = false;
        }

        score
    }
}

impl PrimaryAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> String {
        let label = match Self::score(text) {
            s if s >= 3 => SentimentLabel::VeryPositive,
            s if s >= 1 => SentimentLabel::Positive,
            s if s <= -3 => SentimentLabel::VeryNegative,
            s if s <= -1 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        };
        label.to_string()
    }
}
