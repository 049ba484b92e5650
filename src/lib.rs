pub mod models;
pub mod services;
pub mod api;

use api::{detect_batch, detect_path, detect_text, get_config};
use models::{BatchDetectRequest, BatchItemRequest, BehaviorMetrics, TextDetectRequest};
use services::config_store::{AppConfig, LoggingConfig};

use anyhow::{anyhow, Context};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_PREFIX: &str = "aiDetector_";

fn startup_elapsed_ms() -> u128 {
    PROCESS_START
        .get()
        .map(|t| t.elapsed().as_millis())
        .unwrap_or(0)
}

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Initialize logging system with timestamped log files
pub fn init_logging(config: &LoggingConfig) {
    PROCESS_START.get_or_init(Instant::now);
    let disable_file_log = !config.file_log || env_flag("AIDETECTOR_DISABLE_FILE_LOG");
    let disable_cleanup = env_flag("AIDETECTOR_DISABLE_LOG_CLEANUP");

    // Configure subscriber filter as early as possible (so fallback logging is consistent).
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if disable_file_log {
        init_console_only_logging(env_filter);
        info!("File logging disabled");
        return;
    }

    let logs_dir = match std::env::var("AIDETECTOR_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => config.dir.clone().unwrap_or_else(get_logs_dir),
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory: {}", e);
        init_console_only_logging(env_filter);
        info!("Falling back to console-only logging (log dir not writable)");
        return;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("{}{}.log", LOG_PREFIX, timestamp);

    // Create a dedicated file per session; keep log writes non-blocking.
    let file_appender = rolling::never(&logs_dir, &log_filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    // Stdout carries JSON results, so the console layer writes to stderr.
    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_layer)
            .try_init();
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .try_init();
    }

    info!("=== AI Detector Started ===");
    info!("Log file: {}/{}", logs_dir.display(), log_filename);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Best-effort cleanup in the background (avoid adding startup I/O latency).
    if !disable_cleanup {
        let keep = config.keep_logs;
        std::thread::spawn(move || {
            cleanup_old_logs(&logs_dir, keep);
        });
    }
}

/// Get the logs directory path
fn get_logs_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("logs")
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(data_dir) = dirs::data_local_dir() {
            return data_dir.join("ai-detector").join("logs");
        }
        PathBuf::from("logs")
    }
}

fn cleanup_old_logs(logs_dir: &Path, keep: usize) -> usize {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return 0,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with(LOG_PREFIX) && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return 0;
    }

    // Session timestamps are embedded in the name, so name order is age order.
    entries.sort_by_key(|e| e.file_name());

    let remove_count = entries.len().saturating_sub(keep);
    for entry in entries.into_iter().take(remove_count) {
        let _ = fs::remove_file(entry.path());
    }
    remove_count
}

fn init_console_only_logging(env_filter: EnvFilter) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

// ============ CLI ============

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// First argument that is neither a flag nor a flag's value.
fn positional_arg(args: &[String]) -> Option<String> {
    const VALUED: [&str; 4] = ["--behavior", "--batch", "--config", "--out"];
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUED.contains(&arg.as_str()) {
            iter.next();
        } else if arg == "-" || !arg.starts_with("--") {
            return Some(arg.clone());
        }
    }
    None
}

const USAGE: &str = "Usage:\n  ai-detector [<path>|-] [--behavior <json>] [--batch <jsonl>] [--config <dir>] [--out <path>]\n\nNotes:\n  - Without <path> (or with `-`) the text is read from stdin.\n  - .pdf/.docx/.doc/.rtf paths are analyzed as documents; anything else as plain text.\n  - --batch reads one {\"id\", \"text\", \"behavior\"?} object per line.";

fn is_document_path(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "pdf" | "docx" | "doc" | "rtf"))
}

fn parse_batch_lines(content: &str) -> anyhow::Result<Vec<BatchItemRequest>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).with_context(|| format!("invalid batch item on line {}", n + 1))
        })
        .collect()
}

fn load_config(config_dir: Option<PathBuf>) -> AppConfig {
    match get_config(config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Falling back to default config: {}", e);
            AppConfig::default()
        }
    }
}

fn emit(json: String, out_path: Option<&str>) -> anyhow::Result<()> {
    match out_path {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("write out failed: {}", path))?;
            info!(path = %path, bytes = json.len(), "cli.output_written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Command-line driver shared by the `ai-detector` binary.
pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    PROCESS_START.get_or_init(Instant::now);
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    let config = load_config(parse_arg_value(&args, "--config").map(PathBuf::from));
    init_logging(&config.logging);
    info!(startup_ms = startup_elapsed_ms(), "logging.initialized");

    let out_path = parse_arg_value(&args, "--out");

    if let Some(batch_path) = parse_arg_value(&args, "--batch") {
        let content = fs::read_to_string(&batch_path)
            .with_context(|| format!("read batch file failed: {}", batch_path))?;
        let items = parse_batch_lines(&content)?;
        let request = BatchDetectRequest { items, parallel: None };
        let response = detect_batch(request, &config.analysis).await;
        return emit(serde_json::to_string_pretty(&response)?, out_path.as_deref());
    }

    let behavior: Option<BehaviorMetrics> = parse_arg_value(&args, "--behavior")
        .map(|raw| serde_json::from_str(&raw).context("invalid --behavior JSON"))
        .transpose()?;

    let text = match positional_arg(&args) {
        Some(path) if path != "-" => {
            let path = PathBuf::from(path);
            if is_document_path(&path) {
                let analysis = detect_path(path, &config.analysis).await.map_err(|e| anyhow!(e))?;
                return emit(serde_json::to_string_pretty(&analysis)?, out_path.as_deref());
            }
            fs::read_to_string(&path).with_context(|| format!("read file failed: {}", path.display()))?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("read stdin failed")?;
            buf
        }
    };

    let outcome = detect_text(TextDetectRequest { text, behavior }, &config.analysis)
        .await
        .map_err(|e| anyhow!(e))?;
    if outcome.ai_probability().is_none() {
        warn!("cli.analysis_rejected");
    }
    emit(serde_json::to_string_pretty(&outcome)?, out_path.as_deref())?;
    info!(startup_ms = startup_elapsed_ms(), "=== AI Detector Exited ===");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_skips_flag_values() {
        let a = args(&["ai-detector", "--behavior", "{}", "essay.txt", "--out", "r.json"]);
        assert_eq!(positional_arg(&a).as_deref(), Some("essay.txt"));
        assert_eq!(parse_arg_value(&a, "--out").as_deref(), Some("r.json"));
        assert_eq!(positional_arg(&args(&["ai-detector", "--config", "dir"])), None);
        assert_eq!(positional_arg(&args(&["ai-detector", "-"])).as_deref(), Some("-"));
    }

    #[test]
    fn test_document_paths() {
        assert!(is_document_path(Path::new("a/report.PDF")));
        assert!(is_document_path(Path::new("notes.docx")));
        assert!(!is_document_path(Path::new("essay.txt")));
        assert!(!is_document_path(Path::new("README")));
    }

    #[test]
    fn test_parse_batch_lines() {
        let content = "{\"id\":\"a\",\"text\":\"hello\"}\n\n{\"id\":\"b\",\"text\":\"x\",\"behavior\":{\"pasteRatio\":0.5}}\n";
        let items = parse_batch_lines(content).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].behavior.as_ref().and_then(|b| b.paste_ratio), Some(0.5));

        let err = parse_batch_lines("{\"id\":\"a\"}\nnot json").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_cleanup_keeps_newest_logs() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("{}2024010{}_000000.log", LOG_PREFIX, i)), "").unwrap();
        }
        fs::write(dir.path().join("other.log"), "").unwrap();

        assert_eq!(cleanup_old_logs(dir.path(), 3), 2);
        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        left.sort();
        assert_eq!(
            left,
            [
                "aiDetector_20240102_000000.log",
                "aiDetector_20240103_000000.log",
                "aiDetector_20240104_000000.log",
                "other.log",
            ]
        );
    }
}
