// Topic model trait: the narrow seam between the extractor and the model.
//
// The aspect extractor only needs two things from a model: fit it to a term
// vector, then read back the top terms per topic. Anything that can do that
// (LDA, NMF, a fixed fake in tests) plugs in here.

use std::cmp::Ordering;

use crate::text::normalizer::TermVector;

/// A topic model that can be fit to the term counts of one document.
pub trait TopicModel: Send + Sync {
    /// Fit `n_topics` latent topics over `terms`.
    ///
    /// Must be deterministic for identical input: callers rely on getting
    /// the same topics back for the same review.
    fn fit(&self, terms: &TermVector, n_topics: usize) -> TopicWeights;
}

/// The fitted topic-term weights, plus how much of the document each topic
/// accounts for.
#[derive(Debug, Clone, Default)]
pub struct TopicWeights {
    /// Vocabulary in index order (column labels of `weights`).
    pub vocabulary: Vec<String>,
    /// `weights[topic][term]`, one row per topic.
    pub weights: Vec<Vec<f64>>,
    /// Share of the document assigned to each topic (sums to ~1.0).
    pub prevalence: Vec<f64>,
}

impl TopicWeights {
    pub fn n_topics(&self) -> usize {
        self.weights.len()
    }

    /// The `k` highest-weighted terms of `topic`, highest first.
    ///
    /// Equal weights keep vocabulary order (lower index first). Returns an
    /// empty list for an out-of-range topic.
    pub fn top_terms(&self, topic: usize, k: usize) -> Vec<String> {
        let Some(row) = self.weights.get(topic) else {
            return Vec::new();
        };

        let mut order: Vec<usize> = (0..row.len()).collect();
        // sort_by is stable, so ties stay in ascending index order
        order.sort_by(|&a, &b| row[b].partial_cmp(&row[a]).unwrap_or(Ordering::Equal));

        order
            .into_iter()
            .take(k)
            .map(|i| self.vocabulary[i].clone())
            .collect()
    }
}
