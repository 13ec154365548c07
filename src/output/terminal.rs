// Colored terminal output for review analyses.
//
// This module handles all terminal-specific formatting: colors, tables and
// bar charts. main.rs delegates here for everything it prints.

use colored::{ColoredString, Colorize};

use super::chart::{sentiment_distribution, word_cloud_weights};
use super::truncate_chars;
use crate::pipeline::analysis::ReviewAnalysis;
use crate::sentiment::traits::{ClassifierError, SentimentLabel};
use crate::topics::aspects::Aspect;

/// Number of words shown in the word-cloud section.
const WORD_CLOUD_SIZE: usize = 15;

/// Display a full analysis: general sentiment, aspect table, distribution
/// chart and the review's most frequent words.
pub fn display_analysis(analysis: &ReviewAnalysis) {
    match analysis.overall {
        Some(label) => println!("\n{} {}", "General Sentiment:".bold(), colorize_label(label)),
        None => {
            println!("\nNothing to analyze: the review is empty.");
            return;
        }
    }

    if analysis.report.is_empty() {
        println!(
            "\n{}",
            "No aspects found (every word was a stop word).".dimmed()
        );
        return;
    }

    println!(
        "\n{}",
        format!("=== Aspect Sentiment ({} aspects) ===", analysis.report.len()).bold()
    );
    println!();
    println!(
        "  {:>3}  {:<48} {:<10}",
        "#".dimmed(),
        "Aspect".dimmed(),
        "Sentiment".dimmed(),
    );
    println!("  {}", "-".repeat(64).dimmed());

    for (i, record) in analysis.report.records.iter().enumerate() {
        println!(
            "  {:>3}. {:<48} {}",
            i + 1,
            truncate_chars(&record.aspect, 45),
            colorize_label(record.sentiment),
        );
    }

    display_distribution(analysis);
    display_word_cloud(analysis);
}

/// Bar chart of how many aspects landed on each side.
fn display_distribution(analysis: &ReviewAnalysis) {
    println!("\n{}", "Sentiment Distribution by Aspect".bold());

    let bar_width: usize = 20;
    for slice in sentiment_distribution(&analysis.report) {
        let filled = (slice.share * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );
        let colored_bar = match slice.sentiment {
            SentimentLabel::Positive => bar.bright_green(),
            SentimentLabel::Negative => bar.bright_red(),
        };
        println!(
            "  {:<10} {} {} ({:.0}%)",
            slice.sentiment.as_str(),
            colored_bar,
            slice.count,
            slice.share * 100.0
        );
    }
}

fn display_word_cloud(analysis: &ReviewAnalysis) {
    let words: Vec<String> = word_cloud_weights(&analysis.terms, WORD_CLOUD_SIZE)
        .into_iter()
        .map(|w| format!("{} ({})", w.word, w.count))
        .collect();
    println!("\n{}", "Most frequent words".bold());
    println!("  {}", words.join(", ").dimmed());
}

/// Display extracted aspects without sentiment.
pub fn display_aspects(aspects: &[Aspect]) {
    if aspects.is_empty() {
        println!("No aspects found (empty review, or every word was a stop word).");
        return;
    }

    println!(
        "\n{}",
        format!("=== Aspects ({}) ===", aspects.len()).bold()
    );
    println!();
    for (i, aspect) in aspects.iter().enumerate() {
        println!(
            "  {:>2}. {:<48} {:.2}",
            i + 1,
            aspect.phrase().bold(),
            aspect.prevalence
        );
    }
}

/// One line per review of a batch run.
pub fn display_batch_line(
    index: usize,
    review: &str,
    result: &Result<ReviewAnalysis, ClassifierError>,
) {
    let preview = truncate_chars(review.trim(), 40);
    match result {
        Ok(analysis) => {
            let overall = analysis
                .overall
                .map(colorize_label)
                .unwrap_or_else(|| "n/a".dimmed());
            let aspects: Vec<String> = analysis
                .report
                .records
                .iter()
                .map(|r| format!("{} [{}]", r.aspect, r.sentiment))
                .collect();
            println!("  {:>4}. {:<44} {}", index + 1, preview, overall);
            if !aspects.is_empty() {
                println!("        {}", aspects.join("; ").dimmed());
            }
        }
        Err(e) => {
            println!("  {:>4}. {:<44} {} {}", index + 1, preview, "error:".red(), e);
        }
    }
}

fn colorize_label(label: SentimentLabel) -> ColoredString {
    match label {
        SentimentLabel::Positive => label.as_str().green().bold(),
        SentimentLabel::Negative => label.as_str().red().bold(),
    }
}
