// Surface-form signals
// Punctuation, sentence shapes, contractions, concrete detail and informal slips.

use std::collections::HashSet;

use crate::services::detection::stats::{normalize, Direction};
use crate::services::lexicon::{
    bare_contractions, contraction_suffixes, imperative_starters, informal_spellings, list_ordinals,
    number_units, number_words, passive_auxiliaries, PASSIVE_SUFFIXES, REPEAT_EXEMPT,
};
use crate::services::text_processor::{first_word, word_runs, Document};

/// Word runs of `text` paired with the separator that follows each one.
struct Runs<'a> {
    text: &'a str,
    spans: Vec<(usize, usize)>,
}

impl<'a> Runs<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            spans: word_runs(text),
        }
    }

    fn len(&self) -> usize {
        self.spans.len()
    }

    fn word(&self, i: usize) -> &'a str {
        let (s, e) = self.spans[i];
        &self.text[s..e]
    }

    /// Text between run `i` and run `i + 1`.
    fn gap_after(&self, i: usize) -> &'a str {
        &self.text[self.spans[i].1..self.spans[i + 1].0]
    }

    /// Text from the end of run `i` to the end of the input.
    fn rest_after(&self, i: usize) -> &'a str {
        &self.text[self.spans[i].1..]
    }

    /// Counts non-overlapping adjacent pairs accepted by `pair`.
    fn count_pairs<F>(&self, mut pair: F) -> usize
    where
        F: FnMut(&str, &str, &str) -> bool,
    {
        let mut hits = 0;
        let mut i = 0;
        while i + 1 < self.len() {
            if pair(self.word(i), self.gap_after(i), self.word(i + 1)) {
                hits += 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        hits
    }
}

fn is_whitespace_gap(gap: &str) -> bool {
    !gap.is_empty() && gap.chars().all(char::is_whitespace)
}

// ============ Punctuation ============

const PUNCTUATION_CLASSES: usize = 9;

/// Share of the nine punctuation classes that appear at all.
pub fn punctuation_diversity(doc: &Document) -> f64 {
    let text = doc.clean.as_str();
    let classes = [
        text.contains(','),
        text.contains(';'),
        text.contains(':'),
        text.contains(['—', '–']) || text.contains("--"),
        text.contains(['(', ')']),
        text.contains('!'),
        text.contains('?'),
        text.contains("...") || text.contains('…'),
        text.contains(['"', '\'']),
    ];
    let used = classes.iter().filter(|&&present| present).count();
    normalize(used as f64 / PUNCTUATION_CLASSES as f64, 0.4, 5.0, Direction::LowerIsAi)
}

pub fn questions_exclamations(doc: &Document) -> f64 {
    let marks = doc.clean.chars().filter(|c| matches!(c, '?' | '!')).count();
    normalize(doc.per_sentence(marks as f64), 0.08, 12.0, Direction::LowerIsAi)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum SentenceType {
    Declarative,
    Interrogative,
    Exclamatory,
    Imperative,
}

fn sentence_type(sentence: &str) -> SentenceType {
    let trimmed = sentence.trim();
    if trimmed.ends_with('?') {
        return SentenceType::Interrogative;
    }
    if trimmed.ends_with('!') {
        return SentenceType::Exclamatory;
    }
    let opener: String = first_word(trimmed)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '\'')
        .collect();
    if imperative_starters().contains(opener.as_str()) {
        SentenceType::Imperative
    } else {
        SentenceType::Declarative
    }
}

pub fn sentence_type_variety(doc: &Document) -> f64 {
    let types: HashSet<SentenceType> = doc.sentences.iter().map(|s| sentence_type(s)).collect();
    normalize(types.len() as f64 / 4.0, 0.35, 5.0, Direction::LowerIsAi)
}

// ============ Voice & Contractions ============

fn count_passive(text: &str) -> usize {
    let auxiliaries = passive_auxiliaries();
    Runs::new(text).count_pairs(|aux, gap, verb| {
        let verb = verb.to_ascii_lowercase();
        auxiliaries.contains(aux.to_ascii_lowercase().as_str())
            && is_whitespace_gap(gap)
            && PASSIVE_SUFFIXES
                .iter()
                .any(|suffix| verb.len() > suffix.len() && verb.ends_with(suffix))
    })
}

/// Auxiliary followed by a participle-shaped word, per sentence.
pub fn passive_voice(doc: &Document) -> f64 {
    normalize(doc.per_sentence(count_passive(&doc.clean) as f64), 0.15, 7.0, Direction::HigherIsAi)
}

fn count_contractions(text: &str) -> usize {
    let suffixes = contraction_suffixes();
    let runs = Runs::new(text);
    let with_apostrophe =
        runs.count_pairs(|_, gap, tail| gap == "'" && suffixes.contains(tail.to_ascii_lowercase().as_str()));

    let bare = bare_contractions();
    let without_apostrophe = (0..runs.len())
        .filter(|&i| bare.contains(runs.word(i).to_ascii_lowercase().as_str()))
        .count();

    with_apostrophe + without_apostrophe
}

pub fn contraction_usage(doc: &Document) -> f64 {
    normalize(doc.per_word(count_contractions(&doc.clean) as f64), 0.015, 80.0, Direction::LowerIsAi)
}

// ============ Specificity ============

/// Digit groups such as `42`, `3.14` or `1,000,000`.
fn count_numbers(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        while i + 1 < chars.len() && matches!(chars[i], '.' | ',') && chars[i + 1].is_ascii_digit() {
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
        count += 1;
    }
    count
}

/// Capitalized words (three letters or more) past the first of each sentence.
fn count_proper_nouns(doc: &Document) -> usize {
    doc.sentences
        .iter()
        .flat_map(|s| s.split_whitespace().skip(1))
        .filter(|w| {
            let mut chars = w.chars();
            chars.next().is_some_and(|c| c.is_ascii_uppercase())
                && chars.take(2).filter(|c| c.is_ascii_lowercase()).count() == 2
        })
        .count()
}

/// Quoted passages of at least five characters.
fn count_direct_quotes(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let next_close = next_positions(&chars, |c| matches!(c, '"' | '\u{201d}'));
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        if matches!(chars[i], '"' | '\u{201c}') {
            if let Some(close) = next_close[i + 1] {
                if close - (i + 1) >= 5 {
                    count += 1;
                    i = close + 1;
                    continue;
                }
            }
        }
        i += 1;
    }
    count
}

/// Non-empty parenthesised spans.
fn count_parentheticals(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let next_close = next_positions(&chars, |c| c == ')');
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '(' {
            if let Some(close) = next_close[i + 1] {
                if close > i + 1 {
                    count += 1;
                    i = close + 1;
                    continue;
                }
            }
        }
        i += 1;
    }
    count
}

/// `out[j]` is the first index `>= j` whose char satisfies `pred`.
/// One entry longer than `chars` so `out[i + 1]` is always valid.
fn next_positions(chars: &[char], pred: impl Fn(char) -> bool) -> Vec<Option<usize>> {
    let mut out = vec![None; chars.len() + 1];
    for j in (0..chars.len()).rev() {
        out[j] = if pred(chars[j]) { Some(j) } else { out[j + 1] };
    }
    out
}

/// Spelled-out quantities such as "six hours" or "twenty people".
fn count_written_quantities(lower: &str) -> usize {
    let numbers = number_words();
    let units = number_units();
    Runs::new(lower).count_pairs(|number, gap, unit| {
        numbers.contains(number) && is_whitespace_gap(gap) && units.contains(unit)
    })
}

/// Concrete detail per word: numbers, names, quotes, asides and quantities.
pub fn content_specificity(doc: &Document) -> f64 {
    let mut points = 0.0;
    points += (count_numbers(&doc.clean) as f64 * 1.5).min(15.0);
    points += (count_proper_nouns(doc) as f64 * 1.5).min(12.0);
    points += count_direct_quotes(&doc.clean) as f64 * 4.0;
    points += count_parentheticals(&doc.clean) as f64 * 2.0;
    points += count_written_quantities(&doc.lower) as f64 * 2.0;
    normalize(doc.per_word(points), 0.04, 30.0, Direction::LowerIsAi)
}

// ============ Lists ============

/// Ordinal markers ("firstly", "second,") followed by whitespace.
fn count_list_markers(lower: &str) -> usize {
    let ordinals = list_ordinals();
    let runs = Runs::new(lower);
    (0..runs.len())
        .filter(|&i| ordinals.contains(runs.word(i)))
        .filter(|&i| {
            let mut rest = runs.rest_after(i).chars();
            match rest.next() {
                Some(',') | Some(':') => rest.next().is_some_and(char::is_whitespace),
                Some(c) => c.is_whitespace(),
                None => false,
            }
        })
        .count()
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// First non-whitespace position reached from each line start, deduplicated.
fn line_item_starts(chars: &[char]) -> Vec<usize> {
    let mut starts: Vec<usize> = Vec::new();
    for line_start in 0..chars.len() {
        if line_start > 0 && !is_line_terminator(chars[line_start - 1]) {
            continue;
        }
        let mut k = line_start;
        while k < chars.len() && chars[k].is_whitespace() {
            k += 1;
        }
        if starts.last() != Some(&k) {
            starts.push(k);
        }
    }
    starts
}

fn is_numbered_item(chars: &[char], at: usize) -> bool {
    let mut i = at;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    i > at
        && i + 1 < chars.len()
        && matches!(chars[i], '.' | ')')
        && chars[i + 1].is_whitespace()
}

fn is_bullet_item(chars: &[char], at: usize) -> bool {
    at + 1 < chars.len() && matches!(chars[at], '-' | '•' | '*') && chars[at + 1].is_whitespace()
}

pub fn list_enumeration(doc: &Document) -> f64 {
    let chars: Vec<char> = doc.clean.chars().collect();
    let starts = line_item_starts(&chars);
    let numbered = starts.iter().filter(|&&k| is_numbered_item(&chars, k)).count();
    let bullets = starts.iter().filter(|&&k| is_bullet_item(&chars, k)).count();
    let items = count_list_markers(&doc.lower) + numbered + bullets;
    normalize(doc.per_sentence(items as f64), 0.05, 15.0, Direction::HigherIsAi)
}

// ============ Imperfections ============

fn count_repeated_words(words: &[String]) -> usize {
    words
        .windows(2)
        .filter(|w| w[0] == w[1] && !REPEAT_EXEMPT.contains(&w[1].as_str()))
        .count()
}

fn count_informal_spellings(lower: &str) -> usize {
    let slang = informal_spellings();
    let runs = Runs::new(lower);
    let mut hits = 0;
    let mut i = 0;
    while i < runs.len() {
        if runs.word(i) == "y" && i + 1 < runs.len() && runs.gap_after(i) == "'" && runs.word(i + 1) == "all" {
            hits += 1;
            i += 2;
            continue;
        }
        if slang.contains(runs.word(i)) {
            hits += 1;
        }
        i += 1;
    }
    hits
}

/// Ellipses, em dashes and double hyphens.
fn count_informal_punctuation(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '.' => {
                let start = i;
                while i < chars.len() && chars[i] == '.' {
                    i += 1;
                }
                if i - start >= 2 {
                    count += 1;
                }
                continue;
            }
            '—' | '…' => count += 1,
            '-' if chars.get(i + 1) == Some(&'-') => {
                count += 1;
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    count
}

/// Scores high when the text is free of fragments, slang and other slips.
pub fn grammar_perfection(doc: &Document) -> f64 {
    let fragments = doc.sentence_lengths.iter().filter(|&&l| (1..=3).contains(&l)).count();
    let lowercase_starts = doc
        .sentences
        .iter()
        .filter(|s| s.trim().chars().next().is_some_and(|c| c.is_ascii_lowercase()))
        .count();
    let imperfections = fragments
        + count_repeated_words(&doc.words)
        + count_informal_spellings(&doc.lower)
        + lowercase_starts
        + count_informal_punctuation(&doc.clean);
    normalize(doc.per_sentence(imperfections as f64), 0.12, 8.0, Direction::LowerIsAi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passive_voice_matches() {
        assert_eq!(count_passive("The cake was eaten. It is BAKED. We are happy. He was\nsent."), 3);
        assert_eq!(count_passive("It is ed. This was, tested."), 0);
    }

    #[test]
    fn test_contractions_with_and_without_apostrophe() {
        assert_eq!(count_contractions("I don't know, we're fine, Im sure it's rock'n'roll."), 4);
        assert_eq!(count_contractions("Well, its shell was ill."), 0);
    }

    #[test]
    fn test_number_groups() {
        assert_eq!(count_numbers("In 2024 we spent 1,000.50 dollars on 3 items, v2."), 4);
        assert_eq!(count_numbers("no digits"), 0);
    }

    #[test]
    fn test_direct_quotes_need_five_characters() {
        assert_eq!(count_direct_quotes("She said \"hello there\" and \u{201c}fine thanks\u{201d}."), 2);
        assert_eq!(count_direct_quotes("A \"bit\" short"), 0);
    }

    #[test]
    fn test_parentheticals() {
        assert_eq!(count_parentheticals("Data (n=40) and () and (open"), 1);
        assert_eq!(count_parentheticals("((a) (b)"), 2);
    }

    #[test]
    fn test_short_quote_retries_from_next_opener() {
        // The closer of a too-short span can open the next one.
        assert_eq!(count_direct_quotes("\"abc\" \"defghij\""), 1);
        assert_eq!(count_direct_quotes("\"abc\"defghij\""), 1);
    }

    #[test]
    fn test_unmatched_openers_scale_linearly() {
        let quotes = "\u{201c}".repeat(200_000);
        assert_eq!(count_direct_quotes(&quotes), 0);
        let parens = "(".repeat(200_000);
        assert_eq!(count_parentheticals(&parens), 0);
        let tail = format!("{}x)", "(".repeat(200_000));
        assert_eq!(count_parentheticals(&tail), 1);
    }

    #[test]
    fn test_written_quantities() {
        assert_eq!(count_written_quantities("it took six hours and twenty people, not someone days"), 2);
    }

    #[test]
    fn test_list_items_at_line_starts() {
        let chars: Vec<char> = "Intro\n1. first\n  2) second\n- bullet\n\n* star\nnot-a-bullet".chars().collect();
        let starts = line_item_starts(&chars);
        assert_eq!(starts.iter().filter(|&&k| is_numbered_item(&chars, k)).count(), 2);
        assert_eq!(starts.iter().filter(|&&k| is_bullet_item(&chars, k)).count(), 2);
        assert_eq!(count_list_markers("firstly, we go. second: again. first,then"), 2);
    }

    #[test]
    fn test_informal_markers() {
        assert_eq!(count_informal_spellings("y'all gonna yall lol fire fireman"), 5);
        assert_eq!(count_informal_punctuation("Wait.. no... ok — sure --- fine…"), 5);
    }

    #[test]
    fn test_sentence_types() {
        assert_eq!(sentence_type(" Why?"), SentenceType::Interrogative);
        assert_eq!(sentence_type("Wow!"), SentenceType::Exclamatory);
        assert_eq!(sentence_type("Don't touch that."), SentenceType::Imperative);
        assert_eq!(sentence_type("The sky is blue."), SentenceType::Declarative);
    }

    #[test]
    fn test_grammar_perfection_rewards_clean_prose() {
        let polished = Document::parse(
            "The committee reviewed the proposal in detail. The members agreed on the revised budget. \
             The final report was published the following week.",
        )
        .expect("valid document");
        let sloppy = Document::parse("ok so. lol the the thing... broke -- again. gonna fix it tmrw i guess.")
            .expect("valid document");
        assert!(grammar_perfection(&polished) > 0.7);
        assert!(grammar_perfection(&sloppy) < 0.01);
    }
}
