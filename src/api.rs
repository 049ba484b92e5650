// Command layer
// Async entry points used by the binaries. Errors cross this boundary as plain strings.

use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::models::{
    AnalyzeOutcome, BatchDetectRequest, BatchDetectResponse, DocumentAnalysis, TextDetectRequest,
};
use crate::services::batch::{analyze_batch, DEFAULT_PARALLEL};
use crate::services::config_store::{AnalysisConfig, AppConfig, ConfigStore};
use crate::services::documents::analyze_document;
use crate::services::error::DocumentError;
use crate::services::detector::TextDetector;

fn store_for(config_dir: Option<PathBuf>) -> Result<ConfigStore, String> {
    config_dir
        .or_else(ConfigStore::default_config_dir)
        .map(ConfigStore::new)
        .ok_or_else(|| "Failed to locate config directory".to_string())
}

pub fn get_config(config_dir: Option<PathBuf>) -> Result<AppConfig, String> {
    store_for(config_dir)?.load().map_err(|e| e.to_string())
}

pub fn save_config(config_dir: Option<PathBuf>, config: &AppConfig) -> Result<(), String> {
    store_for(config_dir)?.save(config).map_err(|e| e.to_string())
}

/// Detects one text. Validation failures come back as `{"error": ...}`,
/// never as `Err`; `Err` means the worker itself could not run.
pub async fn detect_text(request: TextDetectRequest, config: &AnalysisConfig) -> Result<AnalyzeOutcome, String> {
    let started = Instant::now();
    let detector = TextDetector::new(config);
    let chars = request.text.chars().count();

    let outcome = tokio::task::spawn_blocking(move || {
        detector.outcome(&request.text, request.behavior.as_ref())
    })
    .await
    .map_err(|e| format!("Analysis failed: {}", e))?;

    match &outcome {
        AnalyzeOutcome::Success(resp) => info!(
            request_id = %resp.request_id,
            chars,
            ai_probability = resp.result.ai_probability,
            verdict = %resp.result.verdict,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "detect_text.done"
        ),
        AnalyzeOutcome::Failure { error } => warn!(chars, error = %error, "detect_text.rejected"),
    }
    Ok(outcome)
}

pub async fn detect_file(
    file_name: String,
    bytes: Vec<u8>,
    config: &AnalysisConfig,
) -> Result<DocumentAnalysis, String> {
    let size = bytes.len() as u64;
    if size > config.max_file_bytes {
        let err = DocumentError::TooLarge {
            size,
            limit: config.max_file_bytes,
        };
        warn!(file = %file_name, size, "detect_file.too_large");
        return Err(err.to_string());
    }

    tokio::task::spawn_blocking(move || analyze_document(&file_name, &bytes))
        .await
        .map_err(|e| format!("Analysis failed: {}", e))?
        .map_err(|e| e.to_string())
}

/// Reads `path` from disk and detects it as a document.
pub async fn detect_path(path: PathBuf, config: &AnalysisConfig) -> Result<DocumentAnalysis, String> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| DocumentError::Io(e).to_string())?;
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    detect_file(file_name, bytes, config).await
}

/// Requested parallelism, else the configured one, else the built-in default.
fn effective_parallel(requested: Option<i32>, config: &AnalysisConfig) -> usize {
    requested
        .and_then(|p| usize::try_from(p).ok())
        .filter(|p| *p > 0)
        .unwrap_or(if config.batch_parallel > 0 { config.batch_parallel } else { DEFAULT_PARALLEL })
}

pub async fn detect_batch(request: BatchDetectRequest, config: &AnalysisConfig) -> BatchDetectResponse {
    let parallel = effective_parallel(request.parallel, config);
    analyze_batch(request.items, parallel, TextDetector::new(config)).await
}
