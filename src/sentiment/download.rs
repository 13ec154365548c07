// Model download helper for the ONNX sentiment model.
//
// Fetches DistilBERT fine-tuned on SST-2 from HuggingFace. Its two output
// classes are NEGATIVE (0) and POSITIVE (1), which is the label convention
// the rest of the crate expects.
//
// Files are stored in a platform-appropriate directory
// (~/.local/share/reviewlens/models/ on Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// HuggingFace repo for the sentiment model.
const SENTIMENT_HF_URL: &str =
    "https://huggingface.co/distilbert/distilbert-base-uncased-finetuned-sst-2-english/resolve/main";

/// Remote path of the ONNX export within the repo.
const REMOTE_MODEL_FILE: &str = "onnx/model.onnx";

/// Local file names inside the model directory.
pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Returns the default directory for storing model files.
/// Uses the platform data directory: ~/.local/share/reviewlens/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reviewlens")
        .join("models")
}

/// Check whether both required model files exist.
pub fn model_files_present(dir: &Path) -> bool {
    dir.join(MODEL_FILE).exists() && dir.join(TOKENIZER_FILE).exists()
}

/// Download the sentiment model and tokenizer into `dir`.
///
/// Skips files that already exist. Creates the directory as needed.
pub async fn download_model(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    println!("\nSentiment model (distilbert-base-uncased-finetuned-sst-2-english):");

    let tokenizer_path = dir.join(TOKENIZER_FILE);
    if tokenizer_path.exists() {
        info!("Tokenizer already exists, skipping");
        println!("  {} (already exists)", TOKENIZER_FILE);
    } else {
        println!("  Downloading {}...", TOKENIZER_FILE);
        download_file(
            &format!("{}/{}", SENTIMENT_HF_URL, TOKENIZER_FILE),
            &tokenizer_path,
            false,
        )
        .await?;
    }

    let model_path = dir.join(MODEL_FILE);
    if model_path.exists() {
        info!("Model already exists, skipping");
        println!("  {} (already exists)", MODEL_FILE);
    } else {
        println!("  Downloading {} (~268 MB)...", MODEL_FILE);
        download_file(
            &format!("{}/{}", SENTIMENT_HF_URL, REMOTE_MODEL_FILE),
            &model_path,
            true,
        )
        .await?;
    }

    Ok(())
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = if show_progress {
        let pb = match response.content_length() {
            Some(size) => {
                let pb = ProgressBar::new(size);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
                        .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(ProgressStyle::default_spinner().template("    {spinner} {bytes}")?);
                pb
            }
        };
        Some(pb)
    } else {
        None
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if let Some(ref pb) = pb {
        pb.set_position(bytes.len() as u64);
    }

    std::fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!(url, dest = %dest.display(), bytes = bytes.len(), "Downloaded model file");
    Ok(())
}
