// Text Processing Service
// Sentence / word / paragraph tokenization and the frequency tables shared by the extractors

use std::collections::HashMap;

use crate::services::error::AnalysisError;

pub const MIN_TEXT_CHARS: usize = 50;
pub const MIN_WORDS: usize = 10;

/// ASCII word character, the `\w` class used by every word-boundary rule here.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c == '\''
}

#[inline]
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Occurrence counts that iterate in first-seen order, so sums over the
/// table are reproducible from run to run.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
    total: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for key in keys {
            table.add(key.as_ref());
        }
        table
    }

    pub fn add(&mut self, key: &str) {
        self.total += 1;
        if let Some(&slot) = self.index.get(key) {
            self.entries[slot].1 += 1;
            return;
        }
        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push((key.to_string(), 1));
    }

    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, c)| *c)
    }

    /// Number of keys seen at least `min` times.
    pub fn keys_with_count_at_least(&self, min: usize) -> usize {
        self.counts().filter(|&c| c >= min).count()
    }

    /// Shannon entropy in bits.
    pub fn entropy(&self) -> f64 {
        crate::services::detection::stats::shannon_entropy(self.counts(), self.total)
    }
}

/// A validated input with every derived view the extractors read.
#[derive(Debug, Clone)]
pub struct Document {
    /// Input with surrounding whitespace removed.
    pub clean: String,
    pub lower: String,
    pub lower_chars: Vec<char>,
    pub sentences: Vec<String>,
    /// Word-run count of each sentence.
    pub sentence_lengths: Vec<usize>,
    pub words: Vec<String>,
    pub paragraphs: Vec<String>,
    pub word_freq: FrequencyTable,
    pub bigram_freq: FrequencyTable,
    pub char_trigram_freq: FrequencyTable,
}

impl Document {
    /// Tokenize `text`, rejecting inputs too small to analyze.
    pub fn parse(text: &str) -> Result<Self, AnalysisError> {
        let clean = text.trim();
        if clean.chars().count() < MIN_TEXT_CHARS {
            return Err(AnalysisError::InputTooShort);
        }

        let lower = clean.to_lowercase();
        let words = tokenize_words(&lower);
        if words.len() < MIN_WORDS {
            return Err(AnalysisError::InsufficientWords);
        }

        let sentences: Vec<String> = split_sentences(clean).into_iter().map(str::to_string).collect();
        let sentence_lengths = sentences.iter().map(|s| count_word_runs(s)).collect();
        let paragraphs = split_paragraphs(clean).into_iter().map(str::to_string).collect();

        let word_freq = FrequencyTable::from_keys(&words);
        let bigram_freq = FrequencyTable::from_keys(words.windows(2).map(|w| w.join(" ")));

        let collapsed: Vec<char> = collapse_whitespace(&lower).chars().collect();
        let char_trigram_freq =
            FrequencyTable::from_keys(collapsed.windows(3).map(|w| w.iter().collect::<String>()));

        Ok(Self {
            clean: clean.to_string(),
            lower_chars: lower.chars().collect(),
            lower,
            sentences,
            sentence_lengths,
            words,
            paragraphs,
            word_freq,
            bigram_freq,
            char_trigram_freq,
        })
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn unique_word_count(&self) -> usize {
        self.word_freq.distinct()
    }

    /// `count / word_count`, the denominator floored at one.
    pub fn per_word(&self, count: f64) -> f64 {
        count / self.word_count().max(1) as f64
    }

    /// `count / sentence_count`, the denominator floored at one.
    pub fn per_sentence(&self, count: f64) -> f64 {
        count / self.sentence_count().max(1) as f64
    }
}

/// Sentences as greedy runs of non-terminators closed by one or more of
/// `.`, `!`, `?`. Trailing unterminated text is dropped; text without any
/// terminated run is returned whole.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if !is_terminator(c) {
            if start.is_none() {
                start = Some(i);
            }
            continue;
        }
        if let Some(s) = start.take() {
            let mut end = i + c.len_utf8();
            while let Some(&(j, d)) = iter.peek() {
                if !is_terminator(d) {
                    break;
                }
                end = j + d.len_utf8();
                iter.next();
            }
            out.push(&text[s..end]);
        }
    }

    if out.is_empty() {
        out.push(text);
    }
    out
}

/// Lowercase word tokens: runs of `[a-z']` that begin and end on an ASCII
/// word boundary, so surrounding apostrophes are shed and tokens glued to
/// digits or underscores are skipped. `lower` must already be lowercased.
pub fn tokenize_words(lower: &str) -> Vec<String> {
    let chars: Vec<char> = lower.chars().collect();
    let n = chars.len();
    let boundary_at = |pos: usize| {
        let before = pos > 0 && is_word_char(chars[pos - 1]);
        let after = pos < n && is_word_char(chars[pos]);
        before != after
    };

    let mut out = Vec::new();
    let mut p = 0;
    while p < n {
        if !is_token_char(chars[p]) || !boundary_at(p) {
            p += 1;
            continue;
        }
        let mut run_end = p;
        while run_end < n && is_token_char(chars[run_end]) {
            run_end += 1;
        }
        match (p + 1..=run_end).rev().find(|&e| boundary_at(e)) {
            Some(end) => {
                out.push(chars[p..end].iter().collect());
                p = end;
            }
            None => p += 1,
        }
    }
    out
}

/// Paragraphs separated by a newline, optional whitespace, and another
/// newline. Blank paragraphs are discarded.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut pieces = Vec::new();
    let mut piece_start = 0;
    let mut k = 0;

    while k < chars.len() {
        if chars[k].1 == '\n' {
            let mut j = k + 1;
            let mut last_newline = None;
            while j < chars.len() && chars[j].1.is_whitespace() {
                if chars[j].1 == '\n' {
                    last_newline = Some(j);
                }
                j += 1;
            }
            if let Some(l) = last_newline {
                pieces.push(&text[piece_start..chars[k].0]);
                piece_start = chars[l].0 + 1;
                k = l + 1;
                continue;
            }
        }
        k += 1;
    }
    pieces.push(&text[piece_start..]);

    pieces.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

/// Byte ranges of maximal ASCII word runs.
pub fn word_runs(text: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        match (is_word_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, text.len()));
    }
    runs
}

pub fn count_word_runs(text: &str) -> usize {
    word_runs(text).len()
}

/// Whitespace runs collapsed to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// First whitespace-delimited word of a trimmed sentence.
pub fn first_word(sentence: &str) -> &str {
    sentence.split_whitespace().next().unwrap_or("")
}

/// Lowercased word with every character outside `[a-z]` removed.
pub fn letters_only(word: &str) -> String {
    word.to_lowercase().chars().filter(|c| c.is_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_groups_terminator_runs() {
        let sentences = split_sentences("Wait... really?! Yes. trailing");
        assert_eq!(sentences, vec!["Wait...", " really?!", " Yes."]);
    }

    #[test]
    fn test_split_sentences_without_terminator_returns_whole_text() {
        assert_eq!(split_sentences("no punctuation here"), vec!["no punctuation here"]);
    }

    #[test]
    fn test_tokenize_words_handles_apostrophes_and_digits() {
        let words = tokenize_words("'quoted' don't abc123 rock'n'roll dogs' x_y café");
        assert_eq!(words, vec!["quoted", "don't", "rock'n'roll", "dogs", "caf"]);
    }

    #[test]
    fn test_split_paragraphs_on_blank_lines() {
        let text = "First paragraph.\n\nSecond one.\n   \n\n  Third.\nstill third";
        let paras = split_paragraphs(text);
        assert_eq!(paras.len(), 3);
        assert_eq!(paras[0], "First paragraph.");
        assert_eq!(paras[2], "  Third.\nstill third");
    }

    #[test]
    fn test_word_runs_are_ascii() {
        // It / s / 2024 / isn / t / it / na / ve_x
        assert_eq!(count_word_runs("It's 2024, isn't it? naïve_x"), 8);
    }

    #[test]
    fn test_frequency_table_keeps_first_seen_order() {
        let table = FrequencyTable::from_keys(["b", "a", "b", "c", "b"]);
        assert_eq!(table.counts().collect::<Vec<_>>(), vec![3, 1, 1]);
        assert_eq!(table.total(), 5);
        assert_eq!(table.count("a"), 1);
        assert_eq!(table.count("z"), 0);
        assert_eq!(table.keys_with_count_at_least(2), 1);
    }

    #[test]
    fn test_parse_rejects_short_input() {
        assert_eq!(Document::parse("too short").unwrap_err(), AnalysisError::InputTooShort);
        let few_words = "Supercalifragilistic. Antidisestablishment. Floccinaucinihilipilification.";
        assert_eq!(Document::parse(few_words).unwrap_err(), AnalysisError::InsufficientWords);
    }

    #[test]
    fn test_parse_builds_tables() {
        let doc = Document::parse("The cat sat on the mat. The dog sat too!\n\nA second paragraph follows here.")
            .expect("valid document");
        assert_eq!(doc.sentence_count(), 3);
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.word_freq.count("the"), 3);
        assert_eq!(doc.bigram_freq.count("sat on"), 1);
        assert_eq!(doc.sentence_lengths, vec![6, 4, 5]);
        assert_eq!(doc.bigram_freq.total(), doc.word_count() - 1);
    }
}
