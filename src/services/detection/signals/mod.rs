// Signal extractors
// Each extractor maps a parsed document to an AI-likelihood in [0, 1]. Extractors
// are total: when their sample is too small they return NEUTRAL instead of failing.

pub mod information;
pub mod lexical;
pub mod rhythm;
pub mod surface;

use crate::services::text_processor::{first_word, letters_only, Document};

/// Score reported when a signal has too little data to lean either way.
pub const NEUTRAL: f64 = 0.5;

/// Lowercased, letters-only first word of every sentence.
pub(crate) fn sentence_starters(doc: &Document) -> Vec<String> {
    doc.sentences.iter().map(|s| letters_only(first_word(s))).collect()
}
