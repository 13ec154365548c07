// Parallel batch analysis of many independent reviews.
//
// Analysis is CPU-bound and blocking, so each review runs on a tokio blocking
// thread. `buffered` keeps at most `concurrency` reviews in flight and yields
// results in input order, so output line N always belongs to input line N.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::info;

use super::analysis::{AnalysisPipeline, ReviewAnalysis};
use crate::sentiment::traits::ClassifierError;

/// Analyze every review, at most `concurrency` at a time.
///
/// Each review gets its own result: a classifier failure on one review does
/// not discard the others. The outer error only fires if a worker panics.
pub async fn analyze_all(
    pipeline: Arc<AnalysisPipeline>,
    reviews: Vec<String>,
    concurrency: usize,
) -> Result<Vec<Result<ReviewAnalysis, ClassifierError>>> {
    let total = reviews.len();

    let results: Vec<_> = stream::iter(reviews.into_iter().map(|review| {
        let pipeline = Arc::clone(&pipeline);
        tokio::task::spawn_blocking(move || pipeline.analyze(&review))
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let results = results
        .into_iter()
        .map(|joined| joined.context("analysis worker panicked"))
        .collect::<Result<Vec<_>>>()?;

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(total, failed, concurrency, "Batch analysis complete");

    Ok(results)
}
