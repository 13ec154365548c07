// Latent Dirichlet Allocation fit with collapsed Gibbs sampling.
//
// The input is always a single document, so the doc-topic table collapses to
// one row. Each retained token gets a topic assignment; the sampler repeatedly
// resamples every assignment from
//
//   p(t) ∝ (n_doc[t] + α) · (n_topic_term[t][w] + β) / (n_topic[t] + V·β)
//
// The RNG is seeded from the config, so the same review always produces the
// same topics.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::traits::{TopicModel, TopicWeights};
use crate::text::normalizer::TermVector;

/// Seed used when none is configured. Fixed so aspect output is reproducible.
pub const DEFAULT_SEED: u64 = 42;

/// Hyperparameters for [`LatentDirichlet`].
#[derive(Debug, Clone)]
pub struct LdaConfig {
    /// Document-topic prior. `None` means 1 / n_topics.
    pub alpha: Option<f64>,
    /// Topic-term prior. `None` means 1 / n_topics.
    pub beta: Option<f64>,
    /// Full Gibbs sweeps over the document.
    pub n_iterations: usize,
    pub seed: u64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            alpha: None,
            beta: None,
            n_iterations: 200,
            seed: DEFAULT_SEED,
        }
    }
}

impl LdaConfig {
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Single-document LDA topic model.
#[derive(Debug, Clone, Default)]
pub struct LatentDirichlet {
    pub config: LdaConfig,
}

impl LatentDirichlet {
    pub fn new(config: LdaConfig) -> Self {
        Self { config }
    }
}

impl TopicModel for LatentDirichlet {
    fn fit(&self, terms: &TermVector, n_topics: usize) -> TopicWeights {
        let vocabulary: Vec<String> = terms.terms().map(str::to_string).collect();
        let v = vocabulary.len();

        if n_topics == 0 || v == 0 {
            return TopicWeights {
                vocabulary,
                ..Default::default()
            };
        }

        let k = n_topics;
        let alpha = self.config.alpha.unwrap_or(1.0 / k as f64);
        let beta = self.config.beta.unwrap_or(1.0 / k as f64);
        let beta_sum = beta * v as f64;

        // Expand counts into one entry per token, in vocabulary order
        let tokens: Vec<usize> = terms
            .iter()
            .enumerate()
            .flat_map(|(idx, (_, count))| std::iter::repeat(idx).take(count as usize))
            .collect();

        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut doc_topic = vec![0usize; k];
        let mut topic_term = vec![vec![0usize; v]; k];
        let mut topic_total = vec![0usize; k];
        let mut assignments = Vec::with_capacity(tokens.len());

        for &w in &tokens {
            let t = rng.random_range(0..k);
            assignments.push(t);
            doc_topic[t] += 1;
            topic_term[t][w] += 1;
            topic_total[t] += 1;
        }

        let mut probs = vec![0.0f64; k];
        for _ in 0..self.config.n_iterations {
            for (pos, &w) in tokens.iter().enumerate() {
                let old = assignments[pos];
                doc_topic[old] -= 1;
                topic_term[old][w] -= 1;
                topic_total[old] -= 1;

                for t in 0..k {
                    probs[t] = (doc_topic[t] as f64 + alpha) * (topic_term[t][w] as f64 + beta)
                        / (topic_total[t] as f64 + beta_sum);
                }
                let new = sample_index(&probs, &mut rng);

                assignments[pos] = new;
                doc_topic[new] += 1;
                topic_term[new][w] += 1;
                topic_total[new] += 1;
            }
        }

        let weights: Vec<Vec<f64>> = (0..k)
            .map(|t| {
                let denom = topic_total[t] as f64 + beta_sum;
                topic_term[t]
                    .iter()
                    .map(|&c| (c as f64 + beta) / denom)
                    .collect()
            })
            .collect();

        let doc_denom = tokens.len() as f64 + k as f64 * alpha;
        let prevalence: Vec<f64> = doc_topic
            .iter()
            .map(|&c| (c as f64 + alpha) / doc_denom)
            .collect();

        debug!(
            topics = k,
            vocabulary = v,
            tokens = tokens.len(),
            iterations = self.config.n_iterations,
            "Fitted LDA topic model"
        );

        TopicWeights {
            vocabulary,
            weights,
            prevalence,
        }
    }
}

/// Draw an index with probability proportional to `weights`.
///
/// Falls back to a uniform draw if every weight is zero.
fn sample_index(weights: &[f64], rng: &mut StdRng) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= f64::EPSILON {
        return rng.random_range(0..weights.len());
    }

    let mut target = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if target < w {
            return i;
        }
        target -= w;
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalizer::TextNormalizer;

    fn terms(text: &str) -> TermVector {
        TextNormalizer::with_stop_words(["the", "was", "but", "and", "of"]).vectorize(text)
    }

    #[test]
    fn test_fit_shape() {
        let tv = terms("plot pacing score soundtrack acting cast plot score");
        let model = LatentDirichlet::default().fit(&tv, 3);

        assert_eq!(model.n_topics(), 3);
        assert_eq!(model.vocabulary.len(), tv.len());
        for row in &model.weights {
            assert_eq!(row.len(), tv.len());
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "topic row sums to {sum}");
        }
        let share: f64 = model.prevalence.iter().sum();
        assert!((share - 1.0).abs() < 1e-9, "prevalence sums to {share}");
    }

    #[test]
    fn test_fit_is_deterministic() {
        let tv = terms("the cinematography was stunning but the dialogue was wooden and the plot dragged");
        let a = LatentDirichlet::default().fit(&tv, 3);
        let b = LatentDirichlet::default().fit(&tv, 3);
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.prevalence, b.prevalence);
    }

    #[test]
    fn test_fewer_terms_than_topics_still_fits() {
        let tv = terms("plot");
        let model = LatentDirichlet::default().fit(&tv, 4);
        assert_eq!(model.n_topics(), 4);
        for t in 0..4 {
            assert_eq!(model.top_terms(t, 5), vec!["plot"]);
        }
    }

    #[test]
    fn test_empty_vocabulary_has_no_topics() {
        let model = LatentDirichlet::default().fit(&TermVector::default(), 3);
        assert_eq!(model.n_topics(), 0);
    }

    #[test]
    fn test_zero_topics_has_no_topics() {
        let model = LatentDirichlet::default().fit(&terms("plot score"), 0);
        assert_eq!(model.n_topics(), 0);
    }

    #[test]
    fn test_frequent_term_ranks_first_with_one_topic() {
        let tv = terms("acting acting acting plot score");
        let model = LatentDirichlet::default().fit(&tv, 1);
        assert_eq!(model.top_terms(0, 1), vec!["acting"]);
    }

    #[test]
    fn test_explicit_priors_and_iterations() {
        let tv = terms("plot pacing score soundtrack acting cast");
        let config = LdaConfig::default().alpha(0.5).beta(0.01).n_iterations(10).seed(7);
        let model = LatentDirichlet::new(config).fit(&tv, 2);
        assert_eq!(model.n_topics(), 2);
        for row in &model.weights {
            assert!(row.iter().all(|&w| w > 0.0));
        }
    }

    #[test]
    fn test_sample_index_zero_weights_in_range() {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        for _ in 0..20 {
            assert!(sample_index(&[0.0, 0.0, 0.0], &mut rng) < 3);
        }
    }

    #[test]
    fn test_sample_index_single_mass() {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        for _ in 0..20 {
            assert_eq!(sample_index(&[0.0, 1.0, 0.0], &mut rng), 1);
        }
    }
}
