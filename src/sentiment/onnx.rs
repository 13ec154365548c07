// Local ONNX sentiment classifier.
//
// Runs a fine-tuned binary sentiment model (DistilBERT SST-2 by default) on
// the local CPU. No API calls, no network dependency once the model files
// are downloaded. The model emits two logits per input; the larger one wins,
// and its index maps to a label (0 = Negative, 1 = Positive).
//
// Input is truncated by the tokenizer to the configured window, so a review
// of any length is classified on its leading tokens instead of failing.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::download::{MODEL_FILE, TOKENIZER_FILE};
use super::traits::{ClassifierError, SentimentClassifier, SentimentLabel};

/// Local ONNX-based sentiment classifier.
pub struct OnnxSentimentClassifier {
    // ort::Session::run takes &mut self, so the session sits behind a Mutex.
    // Concurrent classify calls serialize on inference only.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl OnnxSentimentClassifier {
    /// Load the ONNX model and tokenizer from `model_dir`, truncating inputs
    /// to `max_tokens`.
    ///
    /// Missing files or a model that won't load are reported as
    /// [`ClassifierError::Unavailable`].
    pub fn load(model_dir: &Path, max_tokens: usize) -> Result<Self, ClassifierError> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            return Err(ClassifierError::Unavailable(format!(
                "model file not found: {}\nRun `reviewlens download-model` to download it.",
                model_path.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(ClassifierError::Unavailable(format!(
                "tokenizer file not found: {}\nRun `reviewlens download-model` to download it.",
                tokenizer_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| {
                ClassifierError::Unavailable(format!("failed to create ONNX session builder: {e}"))
            })?
            .commit_from_file(&model_path)
            .map_err(|e| {
                ClassifierError::Unavailable(format!(
                    "failed to load ONNX model from {}: {e}",
                    model_path.display()
                ))
            })?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ClassifierError::Unavailable(format!("failed to load tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_tokens,
                ..Default::default()
            }))
            .map_err(|e| ClassifierError::Unavailable(format!("invalid truncation window: {e}")))?;

        debug!(
            model_dir = %model_dir.display(),
            max_tokens,
            "Loaded ONNX sentiment model"
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }
}

impl SentimentClassifier for OnnxSentimentClassifier {
    fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Inference(format!("tokenization failed: {e}")))?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let shape = [1i64, ids.len() as i64];

        let input_ids = Tensor::from_array((shape, ids))
            .map_err(|e| ClassifierError::Inference(format!("input_ids tensor: {e}")))?;
        let attention_mask = Tensor::from_array((shape, mask))
            .map_err(|e| ClassifierError::Inference(format!("attention_mask tensor: {e}")))?;

        let logits = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| ClassifierError::Inference(format!("session lock poisoned: {e}")))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids,
                    "attention_mask" => attention_mask
                })
                .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

            // Output shape: [1, n_labels], raw logits
            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ClassifierError::Inference(format!("output tensor: {e}")))?;

            data.to_vec()
        };

        let index = argmax(&logits)
            .ok_or_else(|| ClassifierError::Inference("model returned no logits".to_string()))?;
        let label = SentimentLabel::from_index(index)?;

        debug!(
            label = %label,
            tokens = encoding.get_ids().len(),
            text_preview = %crate::output::truncate_chars(text, 50),
            "ONNX classified text"
        );

        Ok(label)
    }
}

/// Index of the largest value. The first index wins ties, so a model that
/// can't decide falls back to index 0.
fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_largest() {
        assert_eq!(argmax(&[-1.2, 2.5]), Some(1));
        assert_eq!(argmax(&[3.0, -0.5]), Some(0));
    }

    #[test]
    fn test_argmax_tie_prefers_first() {
        assert_eq!(argmax(&[0.7, 0.7]), Some(0));
    }

    #[test]
    fn test_argmax_empty() {
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_argmax_three_classes_maps_to_unsupported() {
        let idx = argmax(&[0.1, 0.2, 0.9]).unwrap();
        assert!(matches!(
            SentimentLabel::from_index(idx),
            Err(ClassifierError::UnsupportedLabel(2))
        ));
    }

    #[test]
    fn test_load_missing_files_is_unavailable() {
        let dir = std::env::temp_dir().join("reviewlens-test-no-model");
        let result = OnnxSentimentClassifier::load(&dir, 512);
        assert!(matches!(result, Err(ClassifierError::Unavailable(_))));
    }
}
