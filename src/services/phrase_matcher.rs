// Phrase Matcher
// Counts multi-word phrases in lowercased text where any run of whitespace
// separates the phrase's words.

use crate::services::text_processor::is_word_char;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Boundary {
    /// Phrases may start or end inside a word.
    Substring,
    /// Phrases must start and end on an ASCII word boundary.
    Word,
}

#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    phrases: Vec<Vec<Vec<char>>>,
    boundary: Boundary,
}

impl PhraseMatcher {
    pub fn new<'a, I>(phrases: I, boundary: Boundary) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.split_whitespace().map(|part| part.chars().collect()).collect::<Vec<Vec<char>>>())
            .filter(|parts| !parts.is_empty())
            .collect();
        Self { phrases, boundary }
    }

    /// Total non-overlapping hits, counted per phrase and summed.
    pub fn count(&self, haystack: &[char]) -> usize {
        self.phrases.iter().map(|phrase| self.count_phrase(phrase, haystack)).sum()
    }

    fn count_phrase(&self, parts: &[Vec<char>], haystack: &[char]) -> usize {
        let mut hits = 0;
        let mut pos = 0;
        while pos < haystack.len() {
            match self.match_at(parts, haystack, pos) {
                Some(end) => {
                    hits += 1;
                    pos = end;
                }
                None => pos += 1,
            }
        }
        hits
    }

    fn match_at(&self, parts: &[Vec<char>], haystack: &[char], start: usize) -> Option<usize> {
        if self.boundary == Boundary::Word && !boundary_at(haystack, start) {
            return None;
        }
        let mut pos = start;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                let gap_start = pos;
                while pos < haystack.len() && haystack[pos].is_whitespace() {
                    pos += 1;
                }
                if pos == gap_start {
                    return None;
                }
            }
            if !haystack[pos..].starts_with(part) {
                return None;
            }
            pos += part.len();
        }
        if self.boundary == Boundary::Word && !boundary_at(haystack, pos) {
            return None;
        }
        Some(pos)
    }
}

fn boundary_at(haystack: &[char], pos: usize) -> bool {
    let before = pos > 0 && is_word_char(haystack[pos - 1]);
    let after = pos < haystack.len() && is_word_char(haystack[pos]);
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_whitespace_tolerant_match() {
        let matcher = PhraseMatcher::new(["in order to"], Boundary::Substring);
        assert_eq!(matcher.count(&chars("in  order\n\tto win, in order to")), 2);
        assert_eq!(matcher.count(&chars("in orderto")), 0);
    }

    #[test]
    fn test_substring_mode_matches_inside_words() {
        let matcher = PhraseMatcher::new(["i mean"], Boundary::Substring);
        assert_eq!(matcher.count(&chars("hi meant it")), 1);
    }

    #[test]
    fn test_word_mode_requires_boundaries() {
        let matcher = PhraseMatcher::new(["yet", "while"], Boundary::Word);
        assert_eq!(matcher.count(&chars("yet meanwhile, yeti. while yet")), 3);
    }

    #[test]
    fn test_hits_are_summed_across_phrases() {
        let matcher = PhraseMatcher::new(["the realm of", "realm of"], Boundary::Substring);
        assert_eq!(matcher.count(&chars("in the realm of ideas")), 2);
    }
}
