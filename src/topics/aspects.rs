// Aspect extraction: the latent themes of a single review.
//
// Vectorize the review, fit the topic model with one component per requested
// aspect, then read the top terms of each component back out as a phrase.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::lda::LatentDirichlet;
use super::traits::TopicModel;
use crate::text::normalizer::{TermVector, TextNormalizer};

/// Default number of aspects per review.
pub const DEFAULT_TOPICS: usize = 3;
/// Default number of terms per aspect.
pub const DEFAULT_WORDS: usize = 5;

/// One latent theme of a review: its representative terms, highest weight
/// first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    pub terms: Vec<String>,
    /// Share of the review's tokens the topic model assigned to this aspect.
    pub prevalence: f64,
}

impl Aspect {
    /// The terms joined with single spaces, e.g. "acting great cast".
    pub fn phrase(&self) -> String {
        self.terms.join(" ")
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

/// Extracts aspects from a review with a pluggable topic model.
pub struct AspectExtractor {
    normalizer: Arc<TextNormalizer>,
    model: Box<dyn TopicModel>,
}

impl AspectExtractor {
    pub fn new(normalizer: Arc<TextNormalizer>, model: Box<dyn TopicModel>) -> Self {
        Self { normalizer, model }
    }

    /// Extract `n_topics` aspects of up to `n_words` terms each.
    ///
    /// Returns an empty list when no terms survive normalization (empty or
    /// all-stop-word input). Otherwise always returns exactly `n_topics`
    /// aspects, even if the vocabulary is too small to make them distinct.
    pub fn extract(&self, text: &str, n_topics: usize, n_words: usize) -> Vec<Aspect> {
        self.extract_from_terms(&self.normalizer.vectorize(text), n_topics, n_words)
    }

    /// Same as [`extract`](Self::extract), for a review that has already been
    /// vectorized.
    pub fn extract_from_terms(
        &self,
        terms: &TermVector,
        n_topics: usize,
        n_words: usize,
    ) -> Vec<Aspect> {
        if terms.is_empty() || n_topics == 0 {
            return Vec::new();
        }

        let fitted = self.model.fit(terms, n_topics);

        let aspects: Vec<Aspect> = (0..fitted.n_topics())
            .map(|topic| Aspect {
                terms: fitted.top_terms(topic, n_words),
                prevalence: fitted.prevalence.get(topic).copied().unwrap_or(0.0),
            })
            .collect();

        debug!(
            vocabulary = terms.len(),
            aspects = aspects.len(),
            n_words,
            "Extracted aspects"
        );

        aspects
    }
}

impl Default for AspectExtractor {
    /// English stop words and a default-seeded LDA.
    fn default() -> Self {
        Self::new(
            Arc::new(TextNormalizer::default()),
            Box::new(LatentDirichlet::default()),
        )
    }
}
