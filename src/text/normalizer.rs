// Term-frequency vectorization of a single review.
//
// The review is lowercased, split on anything that isn't a word character,
// and filtered against the English stop-word list. What's left becomes the
// one row of a 1×V term-document matrix that the topic model fits.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::Serialize;
use stop_words::{get, LANGUAGE};

/// Tokens are runs of two or more word characters. Single letters ("a", "i")
/// never carry an aspect on their own. `\w` is Unicode-aware, so accented
/// words stay whole.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Term counts for one document, keyed in lexicographic order.
///
/// The key order doubles as the vocabulary index: the first key is feature 0,
/// the second feature 1, and so on. Topic ranking breaks weight ties on this
/// index, so iteration order must stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TermVector {
    counts: BTreeMap<String, u32>,
}

impl TermVector {
    /// Number of distinct terms (the vocabulary size V).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrence count for `term`, zero if it isn't in the vocabulary.
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Total number of retained tokens (sum of all counts).
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Vocabulary terms in index order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// (term, count) pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

impl FromIterator<String> for TermVector {
    fn from_iter<I: IntoIterator<Item = String>>(tokens: I) -> Self {
        let mut counts = BTreeMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        Self { counts }
    }
}

/// Lowercases, tokenizes, and removes stop words.
///
/// Construct once at startup and share; the stop-word set is never mutated
/// after construction, so concurrent `vectorize` calls are safe.
pub struct TextNormalizer {
    stop_words: HashSet<String>,
    token_pattern: Regex,
}

impl TextNormalizer {
    /// Build a normalizer with a custom stop-word list.
    pub fn with_stop_words<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.into().to_lowercase())
                .collect(),
            token_pattern: Regex::new(TOKEN_PATTERN).expect("valid token pattern"),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Tokens of `text` that survive filtering, in document order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token_pattern
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|tok| !self.is_stop_word(tok))
            .map(str::to_string)
            .collect()
    }

    /// Count the surviving tokens of `text`. Empty or all-stop-word input
    /// yields an empty vector, not an error.
    pub fn vectorize(&self, text: &str) -> TermVector {
        self.tokenize(text).into_iter().collect()
    }
}

impl Default for TextNormalizer {
    /// English stop words from the `stop-words` crate (NLTK list).
    fn default() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words)
    }
}
