// Behavioral Adjustment
// Blends optional input telemetry (paste ratio, typing speed, edits, rhythm) into a finished result.

use crate::models::{BehaviorMetrics, BehavioralDetail, EnsembleResult};
use crate::services::error::AnalysisError;

use super::calibration::{to_percent, verdict, MAX_PROBABILITY, MIN_PROBABILITY};
use super::stats::clamp;

fn detail(name: &str, score: i32, description: String, icon: &str) -> BehavioralDetail {
    BehavioralDetail {
        name: name.to_string(),
        score,
        description,
        icon: icon.to_string(),
    }
}

fn check_finite(field: &str, value: Option<f64>) -> Result<(), AnalysisError> {
    match value {
        Some(v) if !v.is_finite() => Err(AnalysisError::InvalidBehavior(format!(
            "{} must be a finite number",
            field
        ))),
        _ => Ok(()),
    }
}

/// Rejects non-finite or out-of-range telemetry before it can move a score.
pub fn validate(metrics: &BehaviorMetrics) -> Result<(), AnalysisError> {
    check_finite("pasteRatio", metrics.paste_ratio)?;
    check_finite("avgCharsPerSecond", metrics.avg_chars_per_second)?;
    check_finite("typingBurstiness", metrics.typing_burstiness)?;

    if let Some(p) = metrics.paste_ratio {
        if !(0.0..=1.0).contains(&p) {
            return Err(AnalysisError::InvalidBehavior(
                "pasteRatio must be between 0 and 1".to_string(),
            ));
        }
    }
    if metrics.avg_chars_per_second.is_some_and(|s| s < 0.0) {
        return Err(AnalysisError::InvalidBehavior(
            "avgCharsPerSecond must not be negative".to_string(),
        ));
    }
    if metrics.typing_burstiness.is_some_and(|b| b < 0.0) {
        return Err(AnalysisError::InvalidBehavior(
            "typingBurstiness must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn paste_detail(ratio: f64) -> (BehavioralDetail, f64) {
    let score = if ratio > 0.8 {
        75
    } else if ratio > 0.5 {
        60
    } else if ratio > 0.2 {
        45
    } else {
        20
    };
    let pct = to_percent(ratio);
    let description = if ratio > 0.5 {
        format!("{}% of text was pasted — AI text is often pasted in", pct)
    } else {
        format!("{}% of text was pasted — text appears to be typed", pct)
    };
    let shift = if ratio > 0.8 {
        0.05
    } else if ratio < 0.2 {
        -0.03
    } else {
        0.0
    };
    (detail("Paste Detection", score, description, "file"), shift)
}

fn speed_detail(speed: f64) -> (BehavioralDetail, f64) {
    let score = match speed {
        s if s > 50.0 => 80,
        s if s > 20.0 => 65,
        s if s > 10.0 => 50,
        s if s > 5.0 => 35,
        _ => 20,
    };
    let description = if speed > 20.0 {
        format!("{:.1} chars/sec — abnormally fast, suggests paste/auto-fill", speed)
    } else {
        format!("{:.1} chars/sec — consistent with manual typing", speed)
    };
    let shift = if speed > 50.0 {
        0.04
    } else if speed < 8.0 {
        -0.02
    } else {
        0.0
    };
    (detail("Input Speed", score, description, "settings"), shift)
}

fn edit_detail(edits: u32, paste_ratio: Option<f64>) -> (BehavioralDetail, f64) {
    let score = match edits {
        0 => 60,
        1..=2 => 45,
        3..=9 => 30,
        _ => 20,
    };
    let description = if edits == 0 {
        "No edits detected — text entered without revision".to_string()
    } else {
        format!("{} edit(s) detected — text was revised during input", edits)
    };
    let mostly_pasted = paste_ratio.is_some_and(|p| p > 0.5);
    let shift = if edits == 0 && mostly_pasted {
        0.02
    } else if edits > 5 {
        -0.02
    } else {
        0.0
    };
    (detail("Edit Patterns", score, description, "edit"), shift)
}

fn rhythm_detail(burstiness: f64) -> BehavioralDetail {
    let score = match burstiness {
        b if b < 0.3 => 65,
        b if b < 0.5 => 50,
        b if b < 0.8 => 35,
        _ => 20,
    };
    let description = if burstiness < 0.3 {
        "Very consistent input speed — not typical of manual typing"
    } else {
        "Natural typing rhythm with pauses and bursts"
    };
    detail("Typing Rhythm", score, description.to_string(), "ruler")
}

/// Returns an adjusted copy of `result` plus one detail per metric present.
///
/// Shifts accumulate in field order. When they net to zero the probabilities,
/// verdict and colour are carried over untouched; confidence never changes.
pub fn apply_behavior(
    result: &EnsembleResult,
    metrics: &BehaviorMetrics,
) -> Result<(EnsembleResult, Vec<BehavioralDetail>), AnalysisError> {
    validate(metrics)?;

    let mut details = Vec::new();
    let mut shift = 0.0;

    if let Some(ratio) = metrics.paste_ratio {
        let (d, s) = paste_detail(ratio);
        details.push(d);
        shift += s;
    }
    if let Some(speed) = metrics.avg_chars_per_second.filter(|s| *s > 0.0) {
        let (d, s) = speed_detail(speed);
        details.push(d);
        shift += s;
    }
    if let Some(edits) = metrics.edit_count {
        let (d, s) = edit_detail(edits, metrics.paste_ratio);
        details.push(d);
        shift += s;
    }
    if let Some(burstiness) = metrics.typing_burstiness {
        details.push(rhythm_detail(burstiness));
    }

    let mut adjusted = result.clone();
    if shift != 0.0 {
        let base = result.ai_probability as f64 / 100.0;
        adjusted.ai_probability = to_percent(clamp(base + shift, MIN_PROBABILITY, MAX_PROBABILITY));
        adjusted.human_probability = 100 - adjusted.ai_probability;
        let v = verdict(adjusted.ai_probability);
        adjusted.verdict = v;
        adjusted.verdict_color = v.color();
    }
    Ok((adjusted, details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Confidence, TextStats, Verdict, VerdictColor};

    fn result_at(ai: i32) -> EnsembleResult {
        let v = verdict(ai);
        EnsembleResult {
            kind: "text".to_string(),
            ai_probability: ai,
            human_probability: 100 - ai,
            verdict: v,
            verdict_color: v.color(),
            confidence: Confidence::Medium,
            details: Vec::new(),
            stats: TextStats {
                word_count: 120,
                sentence_count: 8,
                paragraph_count: 2,
                unique_words: 80,
                avg_sentence_length: 15.0,
                avg_word_length: 4.6,
                vocabulary_richness: "66.7%".to_string(),
            },
            signals: Vec::new(),
        }
    }

    #[test]
    fn test_pasted_fast_unedited_input_pushes_towards_ai() {
        let metrics = BehaviorMetrics {
            paste_ratio: Some(0.95),
            avg_chars_per_second: Some(120.0),
            edit_count: Some(0),
            typing_burstiness: Some(0.1),
        };
        let (adjusted, details) = apply_behavior(&result_at(70), &metrics).unwrap();
        // 0.70 + 0.05 + 0.04 + 0.02
        assert_eq!(adjusted.ai_probability, 81);
        assert_eq!(adjusted.human_probability, 19);
        assert_eq!(adjusted.verdict, Verdict::LikelyAi);
        assert_eq!(adjusted.verdict_color, VerdictColor::Red);
        assert_eq!(adjusted.confidence, Confidence::Medium);

        let names: Vec<&str> = details.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Paste Detection", "Input Speed", "Edit Patterns", "Typing Rhythm"]);
        assert_eq!(details[0].score, 75);
        assert_eq!(
            details[0].description,
            "95% of text was pasted — AI text is often pasted in"
        );
        assert_eq!(
            details[1].description,
            "120.0 chars/sec — abnormally fast, suggests paste/auto-fill"
        );
        assert_eq!(details[3].score, 65);
    }

    #[test]
    fn test_typed_and_revised_input_pushes_towards_human() {
        let metrics = BehaviorMetrics {
            paste_ratio: Some(0.0),
            avg_chars_per_second: Some(4.0),
            edit_count: Some(12),
            typing_burstiness: Some(0.9),
        };
        let (adjusted, details) = apply_behavior(&result_at(50), &metrics).unwrap();
        // 0.50 - 0.03 - 0.02 - 0.02
        assert_eq!(adjusted.ai_probability, 43);
        assert_eq!(adjusted.verdict, Verdict::Uncertain);
        assert_eq!(details[2].score, 20);
        assert_eq!(details[2].description, "12 edit(s) detected — text was revised during input");
    }

    #[test]
    fn test_zero_shift_leaves_result_unchanged() {
        let metrics = BehaviorMetrics {
            paste_ratio: Some(0.4),
            avg_chars_per_second: Some(10.0),
            edit_count: Some(2),
            typing_burstiness: Some(0.6),
        };
        let original = result_at(62);
        let (adjusted, details) = apply_behavior(&original, &metrics).unwrap();
        assert_eq!(adjusted, original);
        assert_eq!(details.len(), 4);
    }

    #[test]
    fn test_zero_speed_is_ignored() {
        let metrics = BehaviorMetrics {
            avg_chars_per_second: Some(0.0),
            ..Default::default()
        };
        let (_, details) = apply_behavior(&result_at(50), &metrics).unwrap();
        assert!(details.is_empty());
    }

    #[test]
    fn test_adjustment_is_clamped() {
        let metrics = BehaviorMetrics {
            paste_ratio: Some(1.0),
            avg_chars_per_second: Some(500.0),
            edit_count: Some(0),
            typing_burstiness: None,
        };
        let (adjusted, _) = apply_behavior(&result_at(95), &metrics).unwrap();
        assert_eq!(adjusted.ai_probability, 95);
    }

    #[test]
    fn test_invalid_metrics_rejected() {
        let bad = [
            BehaviorMetrics { paste_ratio: Some(1.5), ..Default::default() },
            BehaviorMetrics { paste_ratio: Some(f64::NAN), ..Default::default() },
            BehaviorMetrics { avg_chars_per_second: Some(-1.0), ..Default::default() },
            BehaviorMetrics { typing_burstiness: Some(f64::INFINITY), ..Default::default() },
        ];
        for metrics in &bad {
            let err = apply_behavior(&result_at(50), metrics).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidBehavior(_)));
            assert!(err.is_validation());
        }
    }
}
