use ai_detector_lib::api::{detect_path, get_config};
use ai_detector_lib::init_logging;
use ai_detector_lib::models::{DocumentAnalysis, MetadataDetail};
use ai_detector_lib::services::config_store::AppConfig;
use anyhow::anyhow;
use std::path::PathBuf;

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn print_detail(d: &MetadataDetail) {
    println!(
        "  [{}] {:<24} score={:>3}  {}",
        if d.found { "x" } else { " " },
        d.name,
        d.score,
        preview(&d.description, 90)
    );
}

fn print_summary(path: &str, analysis: &DocumentAnalysis, show_signals: bool) {
    println!("File: {}", path);
    println!("Size: {} bytes", analysis.file_size);
    println!(
        "AI probability: {}%  (human {}%)",
        analysis.ai_probability, analysis.human_probability
    );
    println!("Verdict: {} [{:?}]", analysis.verdict, analysis.verdict_color);
    println!("Confidence: {:?}", analysis.confidence);
    println!();
    println!("Evidence:");
    for d in &analysis.details {
        print_detail(d);
    }

    if let Some(text) = &analysis.text_analysis {
        println!();
        println!(
            "Text: {} words, {} sentences, {} paragraphs, vocabulary {}",
            text.stats.word_count,
            text.stats.sentence_count,
            text.stats.paragraph_count,
            text.stats.vocabulary_richness
        );
        if show_signals {
            for s in &text.details {
                println!("  {:>3}  {:<32} {}", s.score, s.name, preview(&s.description, 70));
            }
        }
    }
    println!();
    println!("{}", analysis.note);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin analyze_document -- <file.pdf|file.docx|file.txt> [--signals] [--config <dir>] [--out <json_path>]\n\nNotes:\n  - `--signals` prints every text signal when text could be extracted.\n  - Set AIDETECTOR_DISABLE_FILE_LOG=1 to keep logs on the console only."
        );
        return Ok(());
    }

    let path = args[1].clone();
    let show_signals = has_flag(&args, "--signals");
    let out_path = parse_arg_value(&args, "--out");
    let config = get_config(parse_arg_value(&args, "--config").map(PathBuf::from))
        .unwrap_or_else(|e| {
            eprintln!("Falling back to default config: {}", e);
            AppConfig::default()
        });
    init_logging(&config.logging);

    let analysis = detect_path(PathBuf::from(&path), &config.analysis)
        .await
        .map_err(|e| anyhow!(e))?;

    print_summary(&path, &analysis, show_signals);

    if let Some(out_path) = out_path {
        let json = serde_json::to_string_pretty(&analysis)?;
        std::fs::write(&out_path, json).map_err(|e| anyhow!("write out failed: {}", e))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
