// Single-review analysis: overall sentiment plus the per-aspect breakdown.
//
// Flow:
//   1. Vectorize the review (shared normalizer, stop words loaded once)
//   2. Extract aspects with the topic model
//   3. Classify each aspect phrase and aggregate into a report
//   4. Classify the whole review, independently of step 3
//
// Everything the pipeline holds is read-only after construction, so one
// AnalysisPipeline behind an Arc can serve any number of threads.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::report::aggregator::{aggregate, AggregatedReport};
use crate::sentiment::traits::{ClassifierError, SentimentClassifier, SentimentLabel};
use crate::text::normalizer::{TermVector, TextNormalizer};
use crate::topics::aspects::{Aspect, AspectExtractor, DEFAULT_TOPICS, DEFAULT_WORDS};
use crate::topics::lda::LatentDirichlet;
use crate::topics::traits::TopicModel;

/// How many aspects to extract, and how many terms each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectSettings {
    pub n_topics: usize,
    pub n_words: usize,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            n_topics: DEFAULT_TOPICS,
            n_words: DEFAULT_WORDS,
        }
    }
}

/// Everything the pipeline learned about one review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewAnalysis {
    /// Whole-review sentiment. `None` for empty or whitespace-only input,
    /// which the classifier is never asked to score.
    pub overall: Option<SentimentLabel>,
    pub aspects: Vec<Aspect>,
    pub report: AggregatedReport,
    /// Term counts of the review, the input to a word cloud.
    pub terms: TermVector,
}

/// The explicitly constructed analysis service: classifier, stop words and
/// topic model, built once at startup and shared.
pub struct AnalysisPipeline {
    classifier: Arc<dyn SentimentClassifier>,
    normalizer: Arc<TextNormalizer>,
    extractor: AspectExtractor,
    settings: AspectSettings,
}

impl AnalysisPipeline {
    /// Pipeline with English stop words and the default-seeded LDA.
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self::with_parts(
            classifier,
            Arc::new(TextNormalizer::default()),
            Box::new(LatentDirichlet::default()),
        )
    }

    /// Pipeline from explicit parts, for custom stop words or topic models.
    pub fn with_parts(
        classifier: Arc<dyn SentimentClassifier>,
        normalizer: Arc<TextNormalizer>,
        model: Box<dyn TopicModel>,
    ) -> Self {
        Self {
            classifier,
            extractor: AspectExtractor::new(Arc::clone(&normalizer), model),
            normalizer,
            settings: AspectSettings::default(),
        }
    }

    /// Replace the default aspect shape used by [`analyze`](Self::analyze).
    pub fn with_settings(mut self, settings: AspectSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> AspectSettings {
        self.settings
    }

    /// Aspects only; never touches the classifier.
    pub fn extract_aspects(&self, text: &str, settings: AspectSettings) -> Vec<Aspect> {
        self.extractor.extract(text, settings.n_topics, settings.n_words)
    }

    /// Classify an arbitrary span of text.
    pub fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError> {
        self.classifier.classify(text)
    }

    /// Analyze a review with the pipeline's configured aspect settings.
    pub fn analyze(&self, text: &str) -> Result<ReviewAnalysis, ClassifierError> {
        self.analyze_with(text, self.settings)
    }

    /// Analyze a review with explicit aspect settings.
    ///
    /// Empty input produces an empty analysis, not an error. The only failure
    /// is the classifier's, passed through unchanged.
    pub fn analyze_with(
        &self,
        text: &str,
        settings: AspectSettings,
    ) -> Result<ReviewAnalysis, ClassifierError> {
        let terms = self.normalizer.vectorize(text);
        let aspects = self
            .extractor
            .extract_from_terms(&terms, settings.n_topics, settings.n_words);

        let report = aggregate(&aspects, |phrase| self.classifier.classify(phrase))?;

        let overall = if text.trim().is_empty() {
            None
        } else {
            Some(self.classifier.classify(text)?)
        };

        info!(
            overall = overall.map(SentimentLabel::as_str).unwrap_or("n/a"),
            aspects = report.len(),
            "Analyzed review"
        );

        Ok(ReviewAnalysis {
            overall,
            aspects,
            report,
            terms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Positive iff the text mentions "great"; counts its calls.
    struct KeywordClassifier {
        calls: AtomicUsize,
    }

    impl SentimentClassifier for KeywordClassifier {
        fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(if text.contains("great") {
                SentimentLabel::Positive
            } else {
                SentimentLabel::Negative
            })
        }
    }

    fn pipeline() -> (Arc<KeywordClassifier>, AnalysisPipeline) {
        let classifier = Arc::new(KeywordClassifier {
            calls: AtomicUsize::new(0),
        });
        let normalizer = TextNormalizer::with_stop_words(["the", "was", "but", "this"]);
        let pipeline = AnalysisPipeline::with_parts(
            classifier.clone(),
            Arc::new(normalizer),
            Box::new(LatentDirichlet::default()),
        );
        (classifier, pipeline)
    }

    #[test]
    fn test_analyze_classifies_each_aspect_and_document() {
        let (classifier, pipeline) = pipeline();
        let settings = AspectSettings {
            n_topics: 2,
            n_words: 3,
        };
        let analysis = pipeline
            .analyze_with("This movie was terrible but the acting was great", settings)
            .unwrap();

        assert_eq!(analysis.aspects.len(), 2);
        assert_eq!(analysis.report.len(), 2);
        assert_eq!(analysis.overall, Some(SentimentLabel::Positive));
        // two aspects + one whole-document call
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 3);
        assert_eq!(analysis.terms.count("movie"), 1);
    }

    #[test]
    fn test_empty_review_never_calls_classifier() {
        let (classifier, pipeline) = pipeline();
        let analysis = pipeline.analyze("   ").unwrap();

        assert!(analysis.overall.is_none());
        assert!(analysis.aspects.is_empty());
        assert!(analysis.report.is_empty());
        assert!(analysis.terms.is_empty());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_word_review_still_gets_overall() {
        let (_, pipeline) = pipeline();
        let analysis = pipeline.analyze("the was but").unwrap();
        assert!(analysis.aspects.is_empty());
        assert_eq!(analysis.overall, Some(SentimentLabel::Negative));
    }

    #[test]
    fn test_default_settings() {
        let (_, pipeline) = pipeline();
        assert_eq!(pipeline.settings(), AspectSettings { n_topics: 3, n_words: 5 });
        let analysis = pipeline.analyze("great acting and a clever plot").unwrap();
        assert_eq!(analysis.aspects.len(), 3);
    }

    #[test]
    fn test_with_settings_overrides_default() {
        let (_, pipeline) = pipeline();
        let pipeline = pipeline.with_settings(AspectSettings {
            n_topics: 1,
            n_words: 2,
        });
        let analysis = pipeline.analyze("great acting and a clever plot").unwrap();
        assert_eq!(analysis.aspects.len(), 1);
        assert_eq!(analysis.aspects[0].terms.len(), 2);
    }
}
