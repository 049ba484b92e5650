// Information-theoretic signals
// Entropy, predictability and repetition measured over the frequency tables.

use super::NEUTRAL;
use crate::services::detection::stats::{coefficient_of_variation, normalize, pearson, Direction};
use crate::services::text_processor::{Document, FrequencyTable};

/// Character trigram entropy over whitespace-collapsed text.
pub fn character_entropy(doc: &Document) -> f64 {
    normalize(doc.char_trigram_freq.entropy(), 8.6, 2.0, Direction::LowerIsAi)
}

/// Word entropy relative to the maximum for the observed vocabulary.
pub fn word_distribution(doc: &Document) -> f64 {
    let max_entropy = (doc.unique_word_count().max(1) as f64).log2();
    let ratio = if max_entropy > 0.0 {
        doc.word_freq.entropy() / max_entropy
    } else {
        1.0
    };
    normalize(ratio, 0.92, 18.0, Direction::HigherIsAi)
}

/// Strength of the log-rank / log-frequency relationship.
pub fn zipf_fit(doc: &Document) -> f64 {
    let mut freqs: Vec<usize> = doc.word_freq.counts().collect();
    freqs.sort_unstable_by(|a, b| b.cmp(a));

    let correlation = if freqs.len() >= 10 {
        let log_ranks: Vec<f64> = (1..=freqs.len()).map(|r| (r as f64).ln()).collect();
        let log_freqs: Vec<f64> = freqs.iter().map(|&f| (f as f64).ln()).collect();
        pearson(&log_ranks, &log_freqs).abs()
    } else {
        0.97
    };
    normalize(correlation, 0.94, 10.0, Direction::LowerIsAi)
}

/// Conditional entropy of the next word, estimated as H(bigram) - H(word).
pub fn word_predictability(doc: &Document) -> f64 {
    let conditional = (doc.bigram_freq.entropy() - doc.word_freq.entropy()).max(0.0);
    normalize(conditional, 4.5, 0.6, Direction::LowerIsAi)
}

pub fn phrase_uniqueness(doc: &Document) -> f64 {
    let trigrams = FrequencyTable::from_keys(doc.words.windows(3).map(|w| w.join(" ")));
    let diversity = if trigrams.total() > 0 {
        trigrams.distinct() as f64 / trigrams.total() as f64
    } else {
        1.0
    };
    normalize(diversity, 0.95, 15.0, Direction::HigherIsAi)
}

/// Hapax legomena share; only meaningful on long texts.
pub fn vocabulary_uniqueness(doc: &Document) -> f64 {
    if doc.word_count() < 400 {
        return NEUTRAL;
    }
    let hapax = doc.word_freq.counts().filter(|&c| c == 1).count();
    let ratio = hapax as f64 / doc.unique_word_count().max(1) as f64;
    normalize(ratio, 0.50, 8.0, Direction::LowerIsAi)
}

/// Mean surprisal of each word given its predecessor, add-0.01 smoothed.
pub fn bigram_perplexity(doc: &Document) -> f64 {
    if doc.word_count() < 50 {
        return NEUTRAL;
    }
    let vocabulary = doc.unique_word_count() as f64;
    let mut total_log_prob = 0.0;
    let mut pairs = 0usize;
    for pair in doc.words.windows(2) {
        let bigram_count = doc.bigram_freq.count(&pair.join(" ")) as f64;
        let prev_count = match doc.word_freq.count(&pair[0]) {
            0 => 1.0,
            n => n as f64,
        };
        let conditional = (bigram_count + 0.01) / (prev_count + 0.01 * vocabulary);
        total_log_prob += -conditional.max(1e-10).log2();
        pairs += 1;
    }
    let perplexity = if pairs > 0 {
        total_log_prob / pairs as f64
    } else {
        10.0
    };
    normalize(perplexity, 8.0, 0.4, Direction::LowerIsAi)
}

const SURPRISAL_WINDOW: usize = 10;

/// Smoothness of unigram surprisal across sliding windows.
pub fn probability_smoothness(doc: &Document) -> f64 {
    if doc.word_count() < 80 {
        return NEUTRAL;
    }
    let total = doc.word_freq.total() as f64;
    let surprisals: Vec<f64> = doc
        .words
        .iter()
        .map(|w| -(doc.word_freq.count(w) as f64 / total).log2())
        .collect();
    let window_means: Vec<f64> = surprisals
        .windows(SURPRISAL_WINDOW)
        .map(|w| w.iter().sum::<f64>() / SURPRISAL_WINDOW as f64)
        .collect();
    if window_means.len() < 5 {
        return NEUTRAL;
    }
    normalize(coefficient_of_variation(&window_means), 0.18, 7.0, Direction::LowerIsAi)
}

/// Repeated 4-grams plus doubly weighted repeated 5-grams.
pub fn ngram_repetition(doc: &Document) -> f64 {
    if doc.word_count() < 100 {
        return NEUTRAL;
    }
    let four = FrequencyTable::from_keys(doc.words.windows(4).map(|w| w.join(" ")));
    let five = FrequencyTable::from_keys(doc.words.windows(5).map(|w| w.join(" ")));
    let repeated = four.keys_with_count_at_least(2) + 2 * five.keys_with_count_at_least(2);
    let density = repeated as f64 / four.total().max(1) as f64;
    normalize(density, 0.02, 50.0, Direction::HigherIsAi)
}
