// Word-list sentiment classifier: the no-model fallback.
//
// Scores text by counting positive and negative review words, with a simple
// negation rule: "not", "never" and friends flip the polarity of the next
// scored word. Crude next to the ONNX model, but it needs no downloads and is
// trivially deterministic.

use std::collections::HashSet;

use tracing::debug;

use super::traits::{ClassifierError, SentimentClassifier, SentimentLabel, DEFAULT_MAX_TOKENS};

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "beautiful", "best", "brilliant", "captivating", "charming", "clever",
    "compelling", "delightful", "enjoy", "enjoyable", "enjoyed", "excellent", "fantastic",
    "fun", "funny", "gorgeous", "great", "good", "happy", "hilarious", "impressive",
    "incredible", "love", "loved", "masterpiece", "memorable", "moving", "outstanding",
    "perfect", "powerful", "recommend", "remarkable", "solid", "stunning", "superb",
    "terrific", "touching", "wonderful", "worth",
];

const NEGATIVE_WORDS: &[&str] = &[
    "awful", "bad", "bland", "boring", "broken", "cheap", "clumsy", "confusing",
    "disappointing", "disappointed", "dull", "forgettable", "hate", "hated", "horrible",
    "lazy", "mediocre", "mess", "messy", "overrated", "pointless", "poor", "predictable",
    "ridiculous", "sloppy", "slow", "stupid", "tedious", "terrible", "unwatchable",
    "waste", "wasted", "weak", "wooden", "worst",
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nothing", "isn't", "wasn't", "don't", "didn't"];

/// Lexicon-based binary sentiment classifier.
pub struct LexiconClassifier {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negations: HashSet<&'static str>,
    max_tokens: usize,
}

impl LexiconClassifier {
    /// Classify on at most `max_tokens` whitespace-separated words.
    pub fn new(max_tokens: usize) -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            max_tokens,
        }
    }

    /// Net polarity of `text`: positive hits minus negative hits.
    pub fn score(&self, text: &str) -> i32 {
        let lower = text.to_lowercase();
        let mut score = 0;
        let mut negate = false;

        for raw in lower.split_whitespace().take(self.max_tokens) {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            if self.negations.contains(word) {
                negate = true;
                continue;
            }

            let polarity = if self.positive.contains(word) {
                1
            } else if self.negative.contains(word) {
                -1
            } else {
                continue;
            };

            score += if negate { -polarity } else { polarity };
            negate = false;
        }

        score
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

impl SentimentClassifier for LexiconClassifier {
    /// Positive only when positive words outweigh negative ones; a zero score
    /// maps to index 0 (Negative), the same fallback as a tied model output.
    fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError> {
        let score = self.score(text);
        let label = SentimentLabel::from_index(usize::from(score > 0))?;
        debug!(score, label = %label, "Lexicon classified text");
        Ok(label)
    }
}
