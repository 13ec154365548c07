// Pairs each extracted aspect with its classified sentiment.
//
// Aggregation is a straight map from aspects to records: one record per
// aspect slot, in extraction order, count 1. Two slots that happen to produce
// the same phrase stay two records; they are separate topics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sentiment::traits::{ClassifierError, SentimentLabel};
use crate::topics::aspects::Aspect;

/// One (aspect, sentiment) pair with its count for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AspectSentimentRecord {
    /// The aspect's terms joined with spaces.
    pub aspect: String,
    pub sentiment: SentimentLabel,
    /// Always 1 for a single document.
    pub count: u32,
}

/// Ordered aspect-sentiment records for one review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregatedReport {
    pub records: Vec<AspectSentimentRecord>,
}

impl AggregatedReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total count per sentiment label. Labels with no records are omitted.
    pub fn counts_by_label(&self) -> BTreeMap<SentimentLabel, u32> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.sentiment).or_insert(0) += record.count;
        }
        counts
    }
}

/// Classify every aspect phrase and build the report.
///
/// `classify` is called once per aspect, in order. The first classifier
/// failure aborts aggregation and is returned to the caller.
pub fn aggregate<F>(aspects: &[Aspect], classify: F) -> Result<AggregatedReport, ClassifierError>
where
    F: Fn(&str) -> Result<SentimentLabel, ClassifierError>,
{
    let records = aspects
        .iter()
        .map(|aspect| {
            let phrase = aspect.phrase();
            let sentiment = classify(&phrase)?;
            Ok(AspectSentimentRecord {
                aspect: phrase,
                sentiment,
                count: 1,
            })
        })
        .collect::<Result<Vec<_>, ClassifierError>>()?;

    Ok(AggregatedReport { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspect(terms: &[&str]) -> Aspect {
        Aspect {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            prevalence: 0.5,
        }
    }

    fn by_keyword(text: &str) -> Result<SentimentLabel, ClassifierError> {
        if text.contains("great") {
            Ok(SentimentLabel::Positive)
        } else {
            Ok(SentimentLabel::Negative)
        }
    }

    #[test]
    fn test_one_record_per_aspect_in_order() {
        let aspects = vec![aspect(&["acting", "great"]), aspect(&["movie", "terrible"])];
        let report = aggregate(&aspects, by_keyword).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.records[0].aspect, "acting great");
        assert_eq!(report.records[0].sentiment, SentimentLabel::Positive);
        assert_eq!(report.records[1].aspect, "movie terrible");
        assert_eq!(report.records[1].sentiment, SentimentLabel::Negative);
        assert!(report.records.iter().all(|r| r.count == 1));
    }

    #[test]
    fn test_duplicate_phrases_not_merged() {
        let aspects = vec![aspect(&["plot"]), aspect(&["plot"]), aspect(&["plot"])];
        let report = aggregate(&aspects, by_keyword).unwrap();
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_empty_aspects_empty_report() {
        let report = aggregate(&[], by_keyword).unwrap();
        assert!(report.is_empty());
        assert!(report.counts_by_label().is_empty());
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let aspects = vec![aspect(&["acting"])];
        let result = aggregate(&aspects, |_| {
            Err(ClassifierError::Unavailable("offline".to_string()))
        });
        assert!(matches!(result, Err(ClassifierError::Unavailable(_))));
    }

    #[test]
    fn test_counts_by_label() {
        let aspects = vec![
            aspect(&["great", "cast"]),
            aspect(&["dull", "plot"]),
            aspect(&["great", "score"]),
        ];
        let counts = aggregate(&aspects, by_keyword).unwrap().counts_by_label();
        assert_eq!(counts[&SentimentLabel::Positive], 2);
        assert_eq!(counts[&SentimentLabel::Negative], 1);
    }

    #[test]
    fn test_serializes_as_record_list() {
        let report = aggregate(&[aspect(&["acting", "great"])], by_keyword).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"aspect": "acting great", "sentiment": "Positive", "count": 1}])
        );
    }
}
