use crate::models::{DisplayAnnotation, SentimentLabel};

/// Emoji, background colour and score proxy used to decorate a stored comment.
///
/// Total over all strings: anything that does not parse as a non-neutral
/// label gets the neutral entry.
pub fn map_sentiment_to_display(label: &str) -> DisplayAnnotation {
    let (emoji, color, scalar) = match SentimentLabel::parse(label) {
        Some(SentimentLabel::VeryPositive) => ("😄", "#ffff00", 0.95),
        Some(SentimentLabel::Positive) => ("😊", "#D0F0C0", 0.85),
        Some(SentimentLabel::Negative) => ("😞", "#808080", 0.30),
        Some(SentimentLabel::VeryNegative) => ("😠", "#be2528", 0.10),
        Some(SentimentLabel::Neutral) | None => ("😐", "#FFFFFF", 0.50),
    };

    DisplayAnnotation {
        emoji: emoji.to_string(),
        background_color: color.to_string(),
        scalar,
    }
}
