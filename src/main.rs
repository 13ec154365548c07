use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use reviewlens::config::{ClassifierBackend, Config};
use reviewlens::output::chart::{sentiment_distribution, word_cloud_weights, SentimentSlice, WordWeight};
use reviewlens::pipeline::analysis::{AnalysisPipeline, AspectSettings, ReviewAnalysis};
use reviewlens::report::aggregator::AspectSentimentRecord;
use reviewlens::sentiment::traits::{SentimentClassifier, SentimentLabel};

/// Number of words included in the word-cloud data of JSON output.
const JSON_WORD_CLOUD_SIZE: usize = 50;

/// reviewlens: Aspect-level sentiment analysis for reviews.
///
/// Finds the latent aspects of a review (acting, plot, battery life...) and
/// reports whether each one reads as positive or negative.
#[derive(Parser)]
#[command(name = "reviewlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a review: overall sentiment plus per-aspect breakdown
    Analyze {
        #[command(flatten)]
        input: ReviewInput,

        #[command(flatten)]
        shape: AspectShape,

        /// Print JSON instead of the terminal report
        #[arg(long)]
        json: bool,
    },

    /// Extract aspects only (no sentiment model needed)
    Aspects {
        #[command(flatten)]
        input: ReviewInput,

        #[command(flatten)]
        shape: AspectShape,
    },

    /// Analyze a file of reviews, one per line
    Batch {
        /// File with one review per line (blank lines are skipped)
        file: PathBuf,

        /// Number of reviews to analyze in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        #[command(flatten)]
        shape: AspectShape,

        /// Print one JSON object per line instead of the terminal report
        #[arg(long)]
        json: bool,
    },

    /// Download the ONNX sentiment model (~268 MB)
    DownloadModel,
}

/// Where the review text comes from. With neither, it is read from stdin.
#[derive(Args)]
struct ReviewInput {
    /// The review text
    text: Option<String>,

    /// Read the review from a file instead
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl ReviewInput {
    fn read(self) -> Result<String> {
        match (self.text, self.file) {
            (Some(text), _) => Ok(text),
            (None, Some(path)) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read review from {}", path.display())),
            (None, None) => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read review from stdin")?;
                Ok(text)
            }
        }
    }
}

/// Aspect shape overrides; unset flags fall back to the configuration.
#[derive(Args)]
struct AspectShape {
    /// Number of aspects to extract (default: REVIEWLENS_TOPICS or 3)
    #[arg(long)]
    topics: Option<usize>,

    /// Terms per aspect, at least 1 (default: REVIEWLENS_WORDS or 5)
    #[arg(long, value_parser = parse_positive)]
    words: Option<usize>,
}

impl AspectShape {
    fn resolve(&self, defaults: AspectSettings) -> AspectSettings {
        AspectSettings {
            n_topics: self.topics.unwrap_or(defaults.n_topics),
            n_words: self.words.unwrap_or(defaults.n_words),
        }
    }
}

/// Clap value parser for counts that must be at least 1.
fn parse_positive(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// JSON shape of one analysis, including the chart and word-cloud series.
#[derive(Serialize)]
struct AnalysisJson<'a> {
    overall: Option<SentimentLabel>,
    aspects: &'a [AspectSentimentRecord],
    distribution: Vec<SentimentSlice>,
    words: Vec<WordWeight>,
}

impl<'a> AnalysisJson<'a> {
    fn new(analysis: &'a ReviewAnalysis) -> Self {
        Self {
            overall: analysis.overall,
            aspects: &analysis.report.records,
            distribution: sentiment_distribution(&analysis.report),
            words: word_cloud_weights(&analysis.terms, JSON_WORD_CLOUD_SIZE),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reviewlens=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, shape, json } => {
            let config = Config::load()?;
            config.require_classifier()?;
            let settings = shape.resolve(config.aspects);
            let review = input.read()?;

            let pipeline = build_pipeline(&config)?.with_settings(settings);
            let analysis = pipeline.analyze(&review)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&AnalysisJson::new(&analysis))?);
            } else {
                reviewlens::output::terminal::display_analysis(&analysis);
            }
        }

        Commands::Aspects { input, shape } => {
            let config = Config::load()?;
            let settings = shape.resolve(config.aspects);
            let review = input.read()?;

            let extractor = reviewlens::topics::aspects::AspectExtractor::default();
            let aspects = extractor.extract(&review, settings.n_topics, settings.n_words);
            reviewlens::output::terminal::display_aspects(&aspects);
        }

        Commands::Batch {
            file,
            concurrency,
            shape,
            json,
        } => {
            let config = Config::load()?;
            config.require_classifier()?;
            let settings = shape.resolve(config.aspects);

            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read reviews from {}", file.display()))?;
            let reviews: Vec<String> = contents
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect();

            if !json {
                println!("Analyzing {} reviews...", reviews.len());
            }

            let pipeline = Arc::new(build_pipeline(&config)?.with_settings(settings));
            let results = reviewlens::pipeline::batch::analyze_all(
                pipeline,
                reviews.clone(),
                concurrency,
            )
            .await?;

            let mut failed = 0;
            for (i, (review, result)) in reviews.iter().zip(&results).enumerate() {
                if result.is_err() {
                    failed += 1;
                }
                if json {
                    let line = match result {
                        Ok(analysis) => serde_json::json!({
                            "review": i + 1,
                            "analysis": AnalysisJson::new(analysis),
                        }),
                        Err(e) => serde_json::json!({
                            "review": i + 1,
                            "error": e.to_string(),
                        }),
                    };
                    println!("{line}");
                } else {
                    reviewlens::output::terminal::display_batch_line(i, review, result);
                }
            }

            if !json {
                println!("\n{}", "Batch complete.".bold());
                println!("  Reviews analyzed: {}", results.len() - failed);
                if failed > 0 {
                    println!("  {} {failed} reviews failed", "Failed:".red());
                }
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading ONNX sentiment model...");
            println!("  Destination: {}", model_dir.display());

            reviewlens::sentiment::download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `reviewlens analyze \"<review text>\"`.");
        }
    }

    Ok(())
}

/// Build the analysis pipeline around the configured classifier backend.
fn build_pipeline(config: &Config) -> Result<AnalysisPipeline> {
    Ok(AnalysisPipeline::new(create_classifier(config)?))
}

/// Create the classifier for the configured backend.
fn create_classifier(config: &Config) -> Result<Arc<dyn SentimentClassifier>> {
    match config.classifier_backend {
        ClassifierBackend::Onnx => {
            info!("Using local ONNX sentiment classifier");
            let classifier = reviewlens::sentiment::onnx::OnnxSentimentClassifier::load(
                &config.model_dir,
                config.max_tokens,
            )?;
            Ok(Arc::new(classifier))
        }
        ClassifierBackend::Lexicon => {
            info!("Using built-in lexicon sentiment classifier");
            Ok(Arc::new(
                reviewlens::sentiment::lexicon::LexiconClassifier::new(config.max_tokens),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_words_rejected_by_cli() {
        let result = Cli::try_parse_from(["reviewlens", "analyze", "great plot", "--words", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_words_flag_parsed() {
        let cli = Cli::try_parse_from(["reviewlens", "aspects", "great plot", "--words", "2"]).unwrap();
        let Commands::Aspects { shape, .. } = cli.command else {
            panic!("expected aspects subcommand");
        };
        let settings = shape.resolve(AspectSettings::default());
        assert_eq!(settings.n_words, 2);
        assert_eq!(settings.n_topics, 3);
    }
}
