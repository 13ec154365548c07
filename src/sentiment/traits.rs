// Sentiment classifier trait: the swap-ready abstraction.
//
// Classifiers return a binary label following the usual SST-2 convention:
// output index 0 is Negative, index 1 is Positive. Anything else coming out
// of a model is rejected rather than guessed at.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Default classifier window, in model tokens. Longer input is truncated.
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Binary sentiment of a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SentimentLabel {
    Negative,
    Positive,
}

impl SentimentLabel {
    /// Map a model output index to a label (0 = Negative, 1 = Positive).
    pub fn from_index(index: usize) -> Result<Self, ClassifierError> {
        match index {
            0 => Ok(Self::Negative),
            1 => Ok(Self::Positive),
            other => Err(ClassifierError::UnsupportedLabel(other)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Positive => "Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures at the classifier boundary. The only fatal errors in the pipeline.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The backend couldn't be loaded or reached. Not retried.
    #[error("sentiment classifier unavailable: {0}")]
    Unavailable(String),

    /// The model produced a class index outside {0, 1}.
    #[error("classifier returned unsupported label index {0} (expected 0 or 1)")]
    UnsupportedLabel(usize),

    #[error("classifier inference failed: {0}")]
    Inference(String),
}

/// Trait for classifying the sentiment of arbitrary text: a whole review or
/// a short aspect phrase.
///
/// Implementations truncate input to their token window instead of rejecting
/// it, and must return the same label for the same text every time.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError>;
}
