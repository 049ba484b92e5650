// Text Analyzer
// Entry point of the detection core: parse, evaluate every signal, combine, calibrate.

use crate::models::{EnsembleResult, Signal, TextStats};
use crate::services::error::AnalysisError;
use crate::services::text_processor::Document;

use super::calibration::{calibrate_for_length, confidence, to_percent, verdict};
use super::catalog::CATALOG;
use super::ensemble::combine;
use super::stats::mean;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn text_stats(doc: &Document) -> TextStats {
    let word_count = doc.word_count();
    let unique_words = doc.unique_word_count();
    let sentence_lengths: Vec<f64> = doc.sentence_lengths.iter().map(|&n| n as f64).collect();
    let letters: usize = doc.words.iter().map(|w| w.chars().count()).sum();
    let richness = unique_words as f64 / word_count as f64 * 100.0;

    TextStats {
        word_count,
        sentence_count: doc.sentence_count(),
        paragraph_count: doc.paragraphs.len(),
        unique_words,
        avg_sentence_length: round1(mean(&sentence_lengths)),
        avg_word_length: round1(letters as f64 / word_count as f64),
        vocabulary_richness: format!("{:.1}%", richness),
    }
}

/// Evaluates every catalog signal against an already parsed document.
pub fn evaluate_signals(doc: &Document) -> Vec<Signal> {
    CATALOG.iter().map(|spec| spec.evaluate(doc)).collect()
}

/// Estimates how likely `text` is to be machine-generated.
///
/// Deterministic and side-effect free: the same text always yields the same
/// result. Fails only on inputs too small to analyze.
pub fn analyze(text: &str) -> Result<EnsembleResult, AnalysisError> {
    let doc = Document::parse(text)?;
    let signals = evaluate_signals(&doc);

    let probability = calibrate_for_length(combine(&signals), doc.word_count());
    let ai_probability = to_percent(probability);
    let v = verdict(ai_probability);

    Ok(EnsembleResult {
        kind: "text".to_string(),
        ai_probability,
        human_probability: 100 - ai_probability,
        verdict: v,
        verdict_color: v.color(),
        confidence: confidence(doc.word_count(), probability),
        details: signals.iter().map(Signal::detail).collect(),
        stats: text_stats(&doc),
        signals,
    })
}
