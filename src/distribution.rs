use std::collections::BTreeMap;

use serde::Serialize;

use crate::display::map_sentiment_to_display;
use crate::models::{AnnotatedComment, SentimentLabel, SentimentOutcome};

/// Decorate a comment with its sentiment and display annotation.
pub fn annotate_comment(content: &str, outcome: &SentimentOutcome) -> AnnotatedComment {
    let display = map_sentiment_to_display(&outcome.label.to_string());
    AnnotatedComment {
        content: content.to_string(),
        sentiment: outcome.label,
        confidence: outcome.confidence,
        source: outcome.source,
        emoji: display.emoji,
        background_color: display.background_color,
        sentiment_score: display.scalar,
    }
}

/// Number of comments per sentiment label, very negative first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentDistribution {
    counts: BTreeMap<SentimentLabel, usize>,
}

impl SentimentDistribution {
    pub fn from_comments(comments: &[AnnotatedComment]) -> Self {
        let mut counts = BTreeMap::new();
        for comment in comments {
            *counts.entry(comment.sentiment).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Every label with its count, including zeros, in scale order.
    pub fn entries(&self) -> Vec<(SentimentLabel, usize)> {
        SentimentLabel::ALL
            .iter()
            .map(|label| (*label, self.count(*label)))
            .collect()
    }
}
