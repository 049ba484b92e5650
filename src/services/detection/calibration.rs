// Length calibration, confidence and verdict mapping

use crate::models::{Confidence, Verdict};

use super::stats::clamp;

pub const MIN_PROBABILITY: f64 = 0.05;
pub const MAX_PROBABILITY: f64 = 0.95;

/// Pulls short-text probabilities toward 0.5, then clamps to [0.05, 0.95].
pub fn calibrate_for_length(probability: f64, word_count: usize) -> f64 {
    let damped = if word_count < 50 {
        probability * 0.65 + 0.5 * 0.35
    } else if word_count < 100 {
        probability * 0.9 + 0.5 * 0.1
    } else {
        probability
    };
    clamp(damped, MIN_PROBABILITY, MAX_PROBABILITY)
}

pub fn to_percent(probability: f64) -> i32 {
    (probability * 100.0).round() as i32
}

fn length_multiplier(word_count: usize) -> f64 {
    match word_count {
        0..=49 => 0.3,
        50..=99 => 0.5,
        100..=199 => 0.75,
        200..=499 => 0.9,
        _ => 1.0,
    }
}

/// Decisiveness (distance from 0.5) scaled by how much text backs it.
pub fn confidence(word_count: usize, probability: f64) -> Confidence {
    let decisiveness = (probability - 0.5).abs() * 2.0;
    let strength = decisiveness * length_multiplier(word_count);
    if strength >= 0.6 {
        Confidence::High
    } else if strength >= 0.35 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

pub fn verdict(ai_percent: i32) -> Verdict {
    match ai_percent {
        p if p >= 75 => Verdict::LikelyAi,
        p if p >= 55 => Verdict::PossiblyAi,
        p if p >= 40 => Verdict::Uncertain,
        _ => Verdict::LikelyHuman,
    }
}
