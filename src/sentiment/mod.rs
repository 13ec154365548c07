// Sentiment classification: trait-based abstraction over swappable backends.
//
// The SentimentClassifier trait is the only thing the pipeline sees. The ONNX
// backend runs a fine-tuned binary sentiment model locally; the lexicon
// backend needs no model files at all.

pub mod download;
pub mod lexicon;
pub mod onnx;
pub mod traits;
