// Lexical signals
// Word choice: transitions, fillers, clichés, pronouns, openers and tone.

use std::collections::HashSet;

use super::{sentence_starters, NEUTRAL};
use crate::services::detection::stats::{clamp, coefficient_of_variation, normalize, Direction};
use crate::services::lexicon::{
    cliche_phrases, cliche_words, common_words, conjunction_starters, filler_words, first_person,
    formal_adverbs, hedge_phrases, hedging_terms, strong_opinion, transition_phrases, transition_starters,
    transition_words, FUNCTION_WORD_CATEGORIES,
};
use crate::services::text_processor::Document;

fn count_in(doc: &Document, set: &HashSet<&'static str>) -> usize {
    doc.words.iter().filter(|w| set.contains(w.as_str())).count()
}

pub fn transition_density(doc: &Document) -> f64 {
    let hits = count_in(doc, transition_words()) + transition_phrases().count(&doc.lower_chars);
    normalize(doc.per_word(hits as f64), 0.015, 100.0, Direction::HigherIsAi)
}

/// Scores high when informal fillers and hedges are missing.
pub fn filler_absence(doc: &Document) -> f64 {
    let hits = count_in(doc, filler_words()) + hedge_phrases().count(&doc.lower_chars);
    normalize(doc.per_word(hits as f64), 0.02, 120.0, Direction::LowerIsAi)
}

pub fn first_person_pronouns(doc: &Document) -> f64 {
    let hits = count_in(doc, first_person());
    normalize(doc.per_word(hits as f64), 0.015, 80.0, Direction::LowerIsAi)
}

/// Distance of the rare-word share from the typical generated profile.
pub fn lexical_sophistication(doc: &Document) -> f64 {
    let common = common_words();
    let rare = doc.words.iter().filter(|w| !common.contains(w.as_str())).count();
    let distance = (doc.per_word(rare as f64) - 0.55).abs();
    normalize(distance, 0.1, 10.0, Direction::LowerIsAi)
}

/// CV of the word-length histogram, lengths capped at 15.
pub fn word_length_distribution(doc: &Document) -> f64 {
    let mut histogram = [0usize; 16];
    for word in &doc.words {
        histogram[word.chars().count().min(15)] += 1;
    }
    let populated: Vec<f64> = histogram.iter().filter(|&&c| c > 0).map(|&c| c as f64).collect();
    normalize(coefficient_of_variation(&populated), 1.0, 2.0, Direction::LowerIsAi)
}

/// Buzzwords plus stock phrases, phrases weighted three times.
pub fn cliche_detection(doc: &Document) -> f64 {
    let word_hits = count_in(doc, cliche_words());
    let phrase_hits = cliche_phrases().count(&doc.lower_chars);
    let density = doc.per_word((word_hits + phrase_hits * 3) as f64);
    normalize(density, 0.015, 150.0, Direction::HigherIsAi)
}

/// Transition-word openers blended with opener diversity.
pub fn sentence_openers(doc: &Document) -> f64 {
    let starters = sentence_starters(doc);
    let transitions = transition_starters();
    let transition_starts = starters.iter().filter(|s| transitions.contains(s.as_str())).count();
    let transition_score = normalize(doc.per_sentence(transition_starts as f64), 0.08, 20.0, Direction::HigherIsAi);

    let distinct: HashSet<&str> = starters.iter().map(String::as_str).collect();
    let diversity = if doc.sentence_count() > 1 {
        distinct.len() as f64 / doc.sentence_count() as f64
    } else {
        1.0
    };
    let diversity_score = normalize(diversity, 0.7, 6.0, Direction::LowerIsAi);

    if transition_starts > 0 {
        transition_score * 0.7 + diversity_score * 0.3
    } else {
        diversity_score
    }
}

pub fn formal_adverb_density(doc: &Document) -> f64 {
    let hits = count_in(doc, formal_adverbs());
    normalize(doc.per_word(hits as f64), 0.008, 180.0, Direction::HigherIsAi)
}

/// Sentences opened with a coordinating conjunction; rare in formal output.
pub fn conjunction_patterns(doc: &Document) -> f64 {
    let conjunctions = conjunction_starters();
    let starts = sentence_starters(doc)
        .iter()
        .filter(|s| conjunctions.contains(s.as_str()))
        .count();
    normalize(doc.per_sentence(starts as f64), 0.04, 20.0, Direction::LowerIsAi)
}

/// Bonus/penalty profile over function-word density and category balance.
pub fn function_word_profile(doc: &Document) -> f64 {
    let wc = doc.word_count();
    if wc < 80 {
        return NEUTRAL;
    }
    let mut category_ratios = Vec::with_capacity(FUNCTION_WORD_CATEGORIES.len());
    let mut total = 0usize;
    for (_, members) in FUNCTION_WORD_CATEGORIES {
        let count = doc.words.iter().filter(|w| members.contains(&w.as_str())).count();
        category_ratios.push(count as f64 / wc as f64);
        total += count;
    }
    let density = total as f64 / wc as f64;
    let balance_cv = coefficient_of_variation(&category_ratios);

    let mut score = 0.5;
    if (0.42..=0.50).contains(&density) {
        score += 0.1;
    }
    if density > 0.52 {
        score -= 0.08;
    }
    if balance_cv < 0.6 {
        score += 0.08;
    }
    if balance_cv > 0.9 {
        score -= 0.06;
    }
    clamp(score, 0.1, 0.9)
}

/// Bucketed balance of strong-opinion words against hedges.
pub fn tonal_neutrality(doc: &Document) -> f64 {
    let opinion = doc.per_word(count_in(doc, strong_opinion()) as f64);
    let hedging = doc.per_word(hedging_terms().count(&doc.lower_chars) as f64);

    if opinion < 0.005 && hedging > 0.005 {
        0.68
    } else if opinion < 0.005 {
        0.58
    } else if opinion > 0.015 {
        0.32
    } else if opinion > 0.01 {
        0.40
    } else {
        NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::parse(text).expect("valid document")
    }

    #[test]
    fn test_cliches_push_score_up() {
        let heavy = doc(
            "It is important to note that we must delve into the tapestry of ideas. \
             We leverage a holistic approach to foster robust and pivotal outcomes.",
        );
        let plain = doc("We went to the shop and got some milk and bread, then walked back home slowly.");
        assert!(cliche_detection(&heavy) > 0.99);
        assert!(cliche_detection(&plain) < 0.15);
    }

    #[test]
    fn test_fillers_pull_score_down() {
        let casual = doc("Honestly I think it was kinda fine, like really okay, you know, just whatever.");
        assert!(filler_absence(&casual) < 0.01);
    }

    #[test]
    fn test_opener_blend_uses_transition_share() {
        let d = doc("However, the plan failed. Moreover, the team left. The budget shrank. Nobody noticed the change.");
        let transition = normalize(0.5, 0.08, 20.0, Direction::HigherIsAi);
        let diversity = normalize(1.0, 0.7, 6.0, Direction::LowerIsAi);
        assert!((sentence_openers(&d) - (transition * 0.7 + diversity * 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_tonal_neutrality_buckets() {
        let hedged = doc("The plan works; however, costs rose while staff changed roles across the whole year.");
        assert_eq!(tonal_neutrality(&hedged), 0.68);
        let blunt = doc("This is the worst, most ridiculous and stupid idea I have seen in my whole life.");
        assert_eq!(tonal_neutrality(&blunt), 0.32);
    }

    #[test]
    fn test_function_word_profile_is_neutral_below_80_words() {
        let d = doc("A short text has no stable function word profile at all, so it stays neutral.");
        assert_eq!(function_word_profile(&d), NEUTRAL);
    }

    #[test]
    fn test_word_length_histogram_caps_long_words() {
        let d = doc("antidisestablishmentarianism supercalifragilisticexpialidocious is a long word and so is the other one.");
        let score = word_length_distribution(&d);
        assert!((0.0..=1.0).contains(&score));
    }
}
