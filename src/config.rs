use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::warn;

use crate::pipeline::analysis::AspectSettings;
use crate::sentiment::traits::DEFAULT_MAX_TOKENS;
use crate::topics::aspects::{DEFAULT_TOPICS, DEFAULT_WORDS};

/// Which sentiment classifier backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierBackend {
    /// Local ONNX model (default): needs `download-model` first
    Onnx,
    /// Built-in word list: no model files, much less accurate
    Lexicon,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// setting has a default, so an empty environment is a valid configuration.
pub struct Config {
    /// Which classifier to use (default: Onnx)
    pub classifier_backend: ClassifierBackend,
    /// Directory containing the ONNX model files
    pub model_dir: PathBuf,
    /// Classifier token window; longer input is truncated
    pub max_tokens: usize,
    /// Default aspect shape when the CLI doesn't override it
    pub aspects: AspectSettings,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let classifier_backend = parse_backend(env::var("REVIEWLENS_CLASSIFIER").ok().as_deref());

        let model_dir = env::var("REVIEWLENS_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::sentiment::download::default_model_dir());

        let max_tokens = ensure_positive(
            "REVIEWLENS_MAX_TOKENS",
            parse_var("REVIEWLENS_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
        )?;

        Ok(Self {
            classifier_backend,
            model_dir,
            max_tokens,
            aspects: AspectSettings {
                n_topics: parse_var("REVIEWLENS_TOPICS", DEFAULT_TOPICS)?,
                n_words: ensure_positive(
                    "REVIEWLENS_WORDS",
                    parse_var("REVIEWLENS_WORDS", DEFAULT_WORDS)?,
                )?,
            },
        })
    }

    /// Validate that the chosen classifier backend has what it needs.
    /// For ONNX: model files must exist (or user should run download-model).
    /// The lexicon backend always works.
    pub fn require_classifier(&self) -> Result<()> {
        match self.classifier_backend {
            ClassifierBackend::Onnx => {
                if !crate::sentiment::download::model_files_present(&self.model_dir) {
                    anyhow::bail!(
                        "ONNX model files not found in {}\n\
                         Run `reviewlens download-model` to download them.\n\
                         Or set REVIEWLENS_CLASSIFIER=lexicon to use the built-in word list instead.",
                        self.model_dir.display()
                    );
                }
                Ok(())
            }
            ClassifierBackend::Lexicon => Ok(()),
        }
    }
}

/// Backend from the raw REVIEWLENS_CLASSIFIER value. Unset means ONNX;
/// anything unrecognized also means ONNX, with a warning.
fn parse_backend(value: Option<&str>) -> ClassifierBackend {
    let Some(raw) = value else {
        return ClassifierBackend::Onnx;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "lexicon" => ClassifierBackend::Lexicon,
        "onnx" => ClassifierBackend::Onnx,
        _ => {
            warn!(value = raw, "Unknown REVIEWLENS_CLASSIFIER, using onnx (expected onnx or lexicon)");
            ClassifierBackend::Onnx
        }
    }
}

/// Reject zero for settings where an empty window or phrase is meaningless.
fn ensure_positive(name: &str, value: usize) -> Result<usize> {
    if value == 0 {
        anyhow::bail!("{name} must be at least 1");
    }
    Ok(value)
}

/// Parse an optional env var, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
