// Chart and word-cloud data: what a rendering layer consumes.
//
// Rendering itself (pie charts, word-cloud images) lives outside this crate.
// These helpers turn a report and a term vector into plain, serializable
// series that any renderer can draw.

use serde::Serialize;

use crate::report::aggregator::AggregatedReport;
use crate::sentiment::traits::SentimentLabel;
use crate::text::normalizer::TermVector;

/// One slice of the "sentiment distribution by aspect" pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSlice {
    pub sentiment: SentimentLabel,
    pub count: u32,
    /// Fraction of all aspect records (0.0 to 1.0).
    pub share: f64,
}

/// Per-label totals of a report, Negative before Positive. Labels with no
/// records are left out, so an empty report gives an empty chart.
pub fn sentiment_distribution(report: &AggregatedReport) -> Vec<SentimentSlice> {
    let counts = report.counts_by_label();
    let total: u32 = counts.values().sum();

    counts
        .into_iter()
        .map(|(sentiment, count)| SentimentSlice {
            sentiment,
            count,
            share: if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// A word and its size weight for a word cloud.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordWeight {
    pub word: String,
    pub count: u32,
    /// Count relative to the most frequent word (0.0 to 1.0).
    pub weight: f64,
}

/// The `limit` most frequent terms, most frequent first. Equal counts keep
/// vocabulary order.
pub fn word_cloud_weights(terms: &TermVector, limit: usize) -> Vec<WordWeight> {
    let mut ranked: Vec<(&str, u32)> = terms.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let max = ranked.first().map(|(_, c)| *c).unwrap_or(0);

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count)| WordWeight {
            word: word.to_string(),
            count,
            weight: if max > 0 {
                count as f64 / max as f64
            } else {
                0.0
            },
        })
        .collect()
}
