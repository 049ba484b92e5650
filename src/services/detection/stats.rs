// Statistics primitives
// Logistic normalization plus the small numeric helpers every extractor shares.
// All helpers are total: degenerate input yields 0 rather than NaN.

use crate::services::text_processor::tokenize_words;
use crate::services::text_processor::split_sentences;

/// Which side of the center reads as machine-generated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    /// Raw values above the center push the score toward 1.
    HigherIsAi,
    /// Raw values below the center push the score toward 1.
    LowerIsAi,
}

/// Logistic map of a raw statistic onto an AI-likelihood in (0, 1).
pub fn normalize(raw: f64, center: f64, steepness: f64, direction: Direction) -> f64 {
    let x = match direction {
        Direction::HigherIsAi => (raw - center) * steepness,
        Direction::LowerIsAi => (center - raw) * steepness,
    };
    1.0 / (1.0 + (-x).exp())
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Shannon entropy (bits) of a count distribution.
pub fn shannon_entropy<I>(counts: I, total: usize) -> f64
where
    I: IntoIterator<Item = usize>,
{
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Pearson correlation; 0 for fewer than 3 points or zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return 0.0;
    }
    let mx = mean(&xs[..n]);
    let my = mean(&ys[..n]);
    let (mut num, mut dx2, mut dy2) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        num += dx * dy;
        dx2 += dx * dx;
        dy2 += dy * dy;
    }
    let den = (dx2 * dy2).sqrt();
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Lag-1 autocorrelation; 0 for fewer than 3 values or a constant series.
pub fn autocorrelation(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let m = mean(values);
    let num: f64 = values.windows(2).map(|w| (w[0] - m) * (w[1] - m)).sum();
    let den: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Population coefficient of variation (sigma / mu).
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt() / m
}

pub fn cv_of_counts(values: &[usize]) -> f64 {
    let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    coefficient_of_variation(&as_f64)
}

fn is_syllable_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

// Consonant class of the silent-e suffix rule; `l` counts as a vowel there.
fn is_suffix_consonant(c: char) -> bool {
    !matches!(c, 'l' | 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Heuristic syllable count, never below 1.
pub fn count_syllables(word: &str) -> usize {
    let mut chars: Vec<char> = word.to_lowercase().chars().collect();
    let n = chars.len();

    if n >= 3 && chars[n - 2] == 'e' && chars[n - 1] == 's' && is_suffix_consonant(chars[n - 3]) {
        chars.truncate(n - 3);
    } else if n >= 2 && chars[n - 1] == 'd' && chars[n - 2] == 'e' {
        chars.truncate(n - 2);
    } else if n >= 2 && chars[n - 1] == 'e' && is_suffix_consonant(chars[n - 2]) {
        chars.truncate(n - 2);
    }
    if chars.first() == Some(&'y') {
        chars.remove(0);
    }

    // Each vowel group is read in pairs.
    let mut syllables = 0;
    let mut run = 0usize;
    for &c in chars.iter().chain(std::iter::once(&' ')) {
        if is_syllable_vowel(c) {
            run += 1;
        } else if run > 0 {
            syllables += run.div_ceil(2);
            run = 0;
        }
    }
    syllables.max(1)
}

/// Flesch-Kincaid grade level of a block of text; 0 when it has no words.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let sentences = split_sentences(text).len();
    let words = tokenize_words(&text.to_lowercase());
    if words.is_empty() || sentences == 0 {
        return 0.0;
    }
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let wc = words.len() as f64;
    0.39 * (wc / sentences as f64) + 11.8 * (syllables as f64 / wc) - 15.59
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_direction_and_center() {
        assert!((normalize(1.0, 1.0, 5.0, Direction::HigherIsAi) - 0.5).abs() < 1e-12);
        assert!(normalize(2.0, 1.0, 5.0, Direction::HigherIsAi) > 0.99);
        assert!(normalize(2.0, 1.0, 5.0, Direction::LowerIsAi) < 0.01);
    }

    #[test]
    fn test_entropy_of_uniform_distribution() {
        assert!((shannon_entropy([1, 1, 1, 1], 4) - 2.0).abs() < 1e-12);
        assert_eq!(shannon_entropy(Vec::<usize>::new(), 0), 0.0);
    }

    #[test]
    fn test_degenerate_inputs_are_zero() {
        assert_eq!(coefficient_of_variation(&[3.0]), 0.0);
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]), 0.0);
        assert_eq!(autocorrelation(&[2.0, 2.0, 2.0, 2.0]), 0.0);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_coefficient_of_variation_is_population() {
        // mean 2, population std sqrt(2/3)
        let cv = coefficient_of_variation(&[1.0, 2.0, 3.0]);
        assert!((cv - (2.0f64 / 3.0).sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_syllable_heuristic() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("the"), 1);
        // ea / u / i / u
        assert_eq!(count_syllables("beautiful"), 4);
        assert_eq!(count_syllables("wanted"), 1);
        assert_eq!(count_syllables("makes"), 1);
        assert_eq!(count_syllables("yellow"), 2);
        assert_eq!(count_syllables("ed"), 1);
    }

    #[test]
    fn test_flesch_kincaid_grade() {
        assert_eq!(flesch_kincaid_grade("... !!!"), 0.0);
        // 4 words, 1 sentence, 4 syllables
        let grade = flesch_kincaid_grade("The cat sat down.");
        assert!((grade - (0.39 * 4.0 + 11.8 - 15.59)).abs() < 1e-9);
    }
}
