// Rhythm and structure signals
// Variation of sentence, paragraph and template shapes across the document.

use super::NEUTRAL;
use crate::services::detection::stats::{
    autocorrelation, coefficient_of_variation, cv_of_counts, flesch_kincaid_grade, normalize, Direction,
};
use crate::services::lexicon::{common_words, negative_emotion, positive_emotion};
use crate::services::text_processor::{count_word_runs, letters_only, tokenize_words, Document, FrequencyTable};

fn sentence_lengths(doc: &Document) -> Vec<f64> {
    doc.sentence_lengths.iter().map(|&l| l as f64).collect()
}

/// Average of length CV and CV of successive length changes.
pub fn sentence_burstiness(doc: &Document) -> f64 {
    let lengths = sentence_lengths(doc);
    let length_cv = coefficient_of_variation(&lengths);
    let diffs: Vec<f64> = lengths.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let diff_cv = if diffs.len() > 1 {
        coefficient_of_variation(&diffs)
    } else {
        length_cv
    };
    normalize((length_cv + diff_cv) / 2.0, 0.40, 4.5, Direction::LowerIsAi)
}

pub fn sentence_autocorrelation(doc: &Document) -> f64 {
    let lengths = sentence_lengths(doc);
    let lag1 = if lengths.len() >= 4 {
        autocorrelation(&lengths)
    } else {
        0.0
    };
    normalize(lag1, 0.12, 5.0, Direction::HigherIsAi)
}

pub fn paragraph_consistency(doc: &Document) -> f64 {
    if doc.paragraphs.len() <= 1 {
        return NEUTRAL;
    }
    let lengths: Vec<usize> = doc.paragraphs.iter().map(|p| count_word_runs(p)).collect();
    normalize(cv_of_counts(&lengths), 0.35, 5.0, Direction::LowerIsAi)
}

/// Spread of Flesch-Kincaid grade across paragraphs.
pub fn readability_consistency(doc: &Document) -> f64 {
    if doc.paragraphs.len() < 3 {
        return NEUTRAL;
    }
    let grades: Vec<f64> = doc
        .paragraphs
        .iter()
        .map(|p| flesch_kincaid_grade(p))
        .filter(|g| g.is_finite() && *g > 0.0)
        .collect();
    if grades.len() < 3 {
        return NEUTRAL;
    }
    normalize(coefficient_of_variation(&grades), 0.22, 5.0, Direction::LowerIsAi)
}

fn size_class(length: usize) -> char {
    match length {
        0..=7 => 'S',
        8..=20 => 'M',
        _ => 'L',
    }
}

/// Diversity of consecutive short / medium / long sentence triples.
pub fn structure_repetition(doc: &Document) -> f64 {
    if doc.sentence_lengths.len() < 4 {
        return NEUTRAL;
    }
    let classes: Vec<char> = doc.sentence_lengths.iter().map(|&l| size_class(l)).collect();
    let triples = FrequencyTable::from_keys(classes.windows(3).map(|w| w.iter().collect::<String>()));
    let diversity = if triples.total() > 0 {
        triples.distinct() as f64 / triples.total() as f64
    } else {
        1.0
    };
    normalize(diversity, 0.6, 5.0, Direction::LowerIsAi)
}

/// Variation of per-sentence word entropy.
pub fn sentence_complexity_variance(doc: &Document) -> f64 {
    if doc.sentence_count() < 5 {
        return NEUTRAL;
    }
    let entropies: Vec<f64> = doc
        .sentences
        .iter()
        .map(|s| {
            let tokens = tokenize_words(&s.to_lowercase());
            if tokens.len() < 3 {
                return 0.0;
            }
            FrequencyTable::from_keys(&tokens).entropy()
        })
        .filter(|&e| e > 0.0)
        .collect();
    if entropies.len() < 4 {
        return NEUTRAL;
    }
    normalize(coefficient_of_variation(&entropies), 0.20, 6.0, Direction::LowerIsAi)
}

/// Bucketed range of per-sentence emotion balance.
pub fn emotional_flatness(doc: &Document) -> f64 {
    if doc.sentence_count() < 4 {
        return NEUTRAL;
    }
    let scores: Vec<i64> = doc
        .sentences
        .iter()
        .map(|s| {
            tokenize_words(&s.to_lowercase())
                .iter()
                .map(|w| {
                    let mut score: i64 = 0;
                    if positive_emotion().contains(w.as_str()) {
                        score += 1;
                    }
                    if negative_emotion().contains(w.as_str()) {
                        score -= 1;
                    }
                    score
                })
                .sum()
        })
        .collect();

    let magnitudes: Vec<f64> = scores.iter().map(|s| s.abs() as f64).collect();
    let magnitude_cv = coefficient_of_variation(&magnitudes);
    let range = scores.iter().max().copied().unwrap_or(0) - scores.iter().min().copied().unwrap_or(0);

    if range < 2 && magnitude_cv < 0.5 {
        0.65
    } else if range < 3 {
        0.5
    } else {
        0.3
    }
}

/// Variation of the rare-word share across paragraphs.
pub fn vocabulary_level_variance(doc: &Document) -> f64 {
    if doc.paragraphs.len() < 3 {
        return NEUTRAL;
    }
    let common = common_words();
    let ratios: Vec<f64> = doc
        .paragraphs
        .iter()
        .filter_map(|p| {
            let tokens = tokenize_words(&p.to_lowercase());
            if tokens.len() < 5 {
                return None;
            }
            let rare = tokens.iter().filter(|w| !common.contains(w.as_str())).count();
            Some(rare as f64 / tokens.len() as f64)
        })
        .collect();
    if ratios.len() < 3 {
        return NEUTRAL;
    }
    normalize(coefficient_of_variation(&ratios), 0.15, 7.0, Direction::LowerIsAi)
}

/// Opening two words plus closing mark, e.g. `"this is...n"`.
fn sentence_template(sentence: &str) -> Option<String> {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() < 3 {
        return None;
    }
    let closing: String = words[words.len() - 1]
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || matches!(c, '.' | '!' | '?'))
        .collect();
    let mut template = format!("{} {}...", letters_only(words[0]), letters_only(words[1]));
    if let Some(last) = closing.chars().last() {
        template.push(last);
    }
    Some(template)
}

pub fn discourse_repetition(doc: &Document) -> f64 {
    if doc.sentence_count() < 6 {
        return NEUTRAL;
    }
    let templates = FrequencyTable::from_keys(doc.sentences.iter().filter_map(|s| sentence_template(s)));
    let repeated = templates.keys_with_count_at_least(2);
    let ratio = repeated as f64 / templates.total().max(1) as f64;
    normalize(ratio, 0.08, 15.0, Direction::HigherIsAi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::parse(text).expect("valid document")
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(size_class(7), 'S');
        assert_eq!(size_class(8), 'M');
        assert_eq!(size_class(20), 'M');
        assert_eq!(size_class(21), 'L');
    }

    #[test]
    fn test_sentence_template_shape() {
        assert_eq!(sentence_template("  This is really great!  ").as_deref(), Some("this is...!"));
        assert_eq!(sentence_template("It's \"done\" now\"").as_deref(), Some("its done...w"));
        assert_eq!(sentence_template("Too short."), None);
    }

    #[test]
    fn test_uniform_sentences_look_bursty_free() {
        let d = doc("The cat sat on a mat. The dog ran to a log. The bird flew to a tree. The fish swam in a pond.");
        assert!(sentence_burstiness(&d) > 0.8);
    }

    #[test]
    fn test_single_paragraph_is_neutral() {
        let d = doc("Just one paragraph with enough words to pass every gate that exists here.");
        assert_eq!(paragraph_consistency(&d), NEUTRAL);
        assert_eq!(readability_consistency(&d), NEUTRAL);
        assert_eq!(vocabulary_level_variance(&d), NEUTRAL);
    }

    #[test]
    fn test_emotional_flatness_buckets() {
        let flat = doc("We met at noon. We talked about work. We walked to the car. We drove home after that.");
        assert_eq!(emotional_flatness(&flat), 0.65);

        let swings = doc(
            "I love this wonderful amazing day. It was awful and terrible and horrible. \
             We walked to the car. We drove home after that.",
        );
        assert_eq!(emotional_flatness(&swings), 0.3);
    }

    #[test]
    fn test_discourse_repetition_flags_templates() {
        let d = doc(
            "This is important here. This is useful here. This is helpful here. \
             This is needed here. This is vital here. This is key here.",
        );
        assert!(discourse_repetition(&d) > 0.5);
    }
}
