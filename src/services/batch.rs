// Batch Detection Service
// Runs many text detections on blocking worker threads, bounded by a semaphore.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::models::{BatchDetectResponse, BatchItemRequest, BatchItemResponse, BatchSummary};
use crate::services::detector::TextDetector;

pub const DEFAULT_PARALLEL: usize = 4;

fn item_response(id: String, detector: &TextDetector, item: &BatchItemRequest) -> BatchItemResponse {
    match detector.detect(&item.text, item.behavior.as_ref()) {
        Ok(result) => BatchItemResponse {
            id,
            result: Some(result),
            error: None,
        },
        Err(e) => BatchItemResponse {
            id,
            result: None,
            error: Some(e.to_string()),
        },
    }
}

/// Nearest-rank percentile over an unsorted sample; 0 for an empty one.
pub fn nearest_rank(values: &[f64], percentile: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

pub fn summarize(items: &[BatchItemResponse]) -> BatchSummary {
    let probabilities: Vec<f64> = items
        .iter()
        .filter_map(|item| item.result.as_ref())
        .map(|r| r.result.ai_probability as f64)
        .collect();
    let avg = if probabilities.is_empty() {
        0.0
    } else {
        probabilities.iter().sum::<f64>() / probabilities.len() as f64
    };

    BatchSummary {
        count: items.len() as i32,
        fail_count: items.iter().filter(|i| i.error.is_some()).count() as i32,
        avg_probability: avg,
        p95_probability: nearest_rank(&probabilities, 95.0),
    }
}

/// Analyzes every item with at most `parallel` running at once.
/// Output order matches input order regardless of completion order.
pub async fn analyze_batch(
    items: Vec<BatchItemRequest>,
    parallel: usize,
    detector: TextDetector,
) -> BatchDetectResponse {
    let started = Instant::now();
    let total = items.len();
    let parallel = parallel.max(1);
    info!(items = total, parallel, "batch.start");

    let semaphore = Arc::new(Semaphore::new(parallel));
    let detector = Arc::new(detector);
    let mut join_set: JoinSet<(usize, BatchItemResponse)> = JoinSet::new();
    let mut slots: Vec<Option<BatchItemResponse>> = vec![None; total];
    let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();

    for (index, item) in items.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let detector = detector.clone();
        join_set.spawn(async move {
            let id = item.id.clone();
            // The semaphore is never closed, so acquire only fails after shutdown.
            let _permit = semaphore.acquire_owned().await.ok();
            let worker = tokio::task::spawn_blocking(move || item_response(item.id.clone(), &detector, &item));
            let response = match worker.await {
                Ok(response) => response,
                Err(e) => BatchItemResponse {
                    id,
                    result: None,
                    error: Some(format!("Analysis failed: {}", e)),
                },
            };
            (index, response)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, response)) => slots[index] = Some(response),
            Err(e) => warn!(error = %e, "batch.task_failed"),
        }
    }

    let responses: Vec<BatchItemResponse> = slots
        .into_iter()
        .zip(ids)
        .map(|(slot, id)| {
            slot.unwrap_or_else(|| BatchItemResponse {
                id,
                result: None,
                error: Some("Analysis failed: worker task aborted".to_string()),
            })
        })
        .collect();

    let summary = summarize(&responses);
    info!(
        items = summary.count,
        failed = summary.fail_count,
        avg = summary.avg_probability,
        p95 = summary.p95_probability,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch.done"
    );

    BatchDetectResponse {
        items: responses,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUMAN: &str = "ok so i finally tried that ramen place downtown lol. honestly? kinda overrated. the broth was way too salty and i waited like 40 minutes for a table!! my friend Jake loved it tho.";
    const FORMAL: &str = "Artificial intelligence has become an essential tool in modern education. Furthermore, it is important to note that these systems offer a comprehensive approach to personalized learning. Moreover, educators can leverage innovative platforms to foster meaningful engagement.";

    fn item(id: &str, text: &str) -> BatchItemRequest {
        BatchItemRequest {
            id: id.to_string(),
            text: text.to_string(),
            behavior: None,
        }
    }

    #[test]
    fn test_nearest_rank() {
        assert_eq!(nearest_rank(&[], 95.0), 0.0);
        assert_eq!(nearest_rank(&[42.0], 95.0), 42.0);
        let values: Vec<f64> = (1..=20).rev().map(f64::from).collect();
        assert_eq!(nearest_rank(&values, 95.0), 19.0);
        assert_eq!(nearest_rank(&values, 100.0), 20.0);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_counts_failures() {
        let items = vec![
            item("a", FORMAL),
            item("b", "too short"),
            item("c", HUMAN),
            item("d", FORMAL),
        ];
        let response = analyze_batch(items, 2, TextDetector::default()).await;

        let ids: Vec<&str> = response.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert!(response.items[1].result.is_none());
        assert_eq!(
            response.items[1].error.as_deref(),
            Some("Please provide at least 50 characters for meaningful analysis.")
        );
        assert_eq!(response.summary.count, 4);
        assert_eq!(response.summary.fail_count, 1);
    }

    #[tokio::test]
    async fn test_batch_item_matches_standalone_detection() {
        let response = analyze_batch(vec![item("x", HUMAN)], 4, TextDetector::default()).await;
        let standalone = TextDetector::default().detect(HUMAN, None).unwrap();
        let batched = response.items[0].result.as_ref().unwrap();
        assert_eq!(batched.result, standalone.result);
        assert_eq!(
            response.summary.avg_probability,
            standalone.result.ai_probability as f64
        );
        assert_eq!(response.summary.p95_probability, standalone.result.ai_probability as f64);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let response = analyze_batch(Vec::new(), 0, TextDetector::default()).await;
        assert!(response.items.is_empty());
        assert_eq!(response.summary.count, 0);
        assert_eq!(response.summary.avg_probability, 0.0);
    }
}
