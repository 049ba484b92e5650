// Signal Catalog
// The fixed table of 37 signals: identity, display text, weight and extractor.
// Table order is the order of every result's `details`.

use crate::models::{Signal, SignalCategory, SignalId};
use crate::services::text_processor::Document;

use super::signals::{information, lexical, rhythm, surface};

pub type Extractor = fn(&Document) -> f64;

#[derive(Debug, Clone, Copy)]
pub struct SignalSpec {
    pub id: SignalId,
    pub name: &'static str,
    pub category: SignalCategory,
    pub weight: f64,
    pub icon: &'static str,
    pub high: &'static str,
    pub low: &'static str,
    pub extract: Extractor,
}

impl SignalSpec {
    pub fn evaluate(&self, doc: &Document) -> Signal {
        Signal {
            id: self.id,
            name: self.name,
            category: self.category,
            weight: self.weight,
            normalized_score: (self.extract)(doc),
            high_description: self.high,
            low_description: self.low,
            icon: self.icon,
        }
    }
}

use SignalCategory::{Structure, Style, Surface, Vocabulary};

pub static CATALOG: [SignalSpec; 37] = [
    SignalSpec {
        id: SignalId::CharacterEntropy,
        name: "Character Entropy",
        category: Surface,
        weight: 0.012,
        icon: "hash",
        high: "Low character entropy — predictable patterns typical of AI",
        low: "High character entropy — natural unpredictability",
        extract: information::character_entropy,
    },
    SignalSpec {
        id: SignalId::WordDistribution,
        name: "Word Distribution",
        category: Vocabulary,
        weight: 0.012,
        icon: "bar-chart",
        high: "Unusually uniform word distribution — suggests generation",
        low: "Natural word frequency distribution",
        extract: information::word_distribution,
    },
    SignalSpec {
        id: SignalId::ZipfFit,
        name: "Zipf's Law Fit",
        category: Vocabulary,
        weight: 0.012,
        icon: "trending-down",
        high: "Word frequencies deviate from Zipf's law — AI pattern",
        low: "Word frequencies follow natural Zipf's law distribution",
        extract: information::zipf_fit,
    },
    SignalSpec {
        id: SignalId::WordPredictability,
        name: "Word Predictability",
        category: Vocabulary,
        weight: 0.012,
        icon: "cpu",
        high: "Low conditional entropy — highly predictable word sequences",
        low: "Natural word sequence unpredictability",
        extract: information::word_predictability,
    },
    SignalSpec {
        id: SignalId::SentenceBurstiness,
        name: "Sentence Burstiness",
        category: Structure,
        weight: 0.04,
        icon: "ruler",
        high: "Uniform sentence lengths — typical of AI writing",
        low: "Good variation in sentence lengths — natural writing",
        extract: rhythm::sentence_burstiness,
    },
    SignalSpec {
        id: SignalId::SentenceAutocorrelation,
        name: "Sentence Autocorrelation",
        category: Structure,
        weight: 0.012,
        icon: "repeat",
        high: "Adjacent sentences have similar lengths — templated pattern",
        low: "Natural variation between adjacent sentences",
        extract: rhythm::sentence_autocorrelation,
    },
    SignalSpec {
        id: SignalId::ParagraphConsistency,
        name: "Paragraph Consistency",
        category: Structure,
        weight: 0.015,
        icon: "align-left",
        high: "Paragraphs are uniform in length — AI pattern",
        low: "Natural paragraph length variation",
        extract: rhythm::paragraph_consistency,
    },
    SignalSpec {
        id: SignalId::ReadabilityConsistency,
        name: "Readability Consistency",
        category: Structure,
        weight: 0.025,
        icon: "book",
        high: "Uniform readability across paragraphs — AI pattern",
        low: "Natural readability variation across paragraphs",
        extract: rhythm::readability_consistency,
    },
    SignalSpec {
        id: SignalId::StructureRepetition,
        name: "Structure Repetition",
        category: Structure,
        weight: 0.012,
        icon: "sliders",
        high: "Repetitive sentence structure patterns detected",
        low: "Diverse sentence structure patterns",
        extract: rhythm::structure_repetition,
    },
    SignalSpec {
        id: SignalId::TransitionDensity,
        name: "Transition Word Density",
        category: Style,
        weight: 0.065,
        icon: "link",
        high: "High transition word density — very common in AI text",
        low: "Natural transition word usage",
        extract: lexical::transition_density,
    },
    SignalSpec {
        id: SignalId::FillerAbsence,
        name: "Filler Word Absence",
        category: Style,
        weight: 0.065,
        icon: "message-circle",
        high: "No filler/hedge words — AI text avoids informal markers",
        low: "Natural use of filler and hedge words",
        extract: lexical::filler_absence,
    },
    SignalSpec {
        id: SignalId::PunctuationDiversity,
        name: "Punctuation Diversity",
        category: Surface,
        weight: 0.015,
        icon: "type",
        high: "Limited punctuation variety — AI typically uses few types",
        low: "Rich punctuation variety — natural writing style",
        extract: surface::punctuation_diversity,
    },
    SignalSpec {
        id: SignalId::QuestionsExclamations,
        name: "Questions & Exclamations",
        category: Surface,
        weight: 0.015,
        icon: "edit",
        high: "No questions or exclamations — AI defaults to declarative",
        low: "Natural mix of sentence types",
        extract: surface::questions_exclamations,
    },
    SignalSpec {
        id: SignalId::SentenceTypeVariety,
        name: "Sentence Type Variety",
        category: Surface,
        weight: 0.015,
        icon: "file-text",
        high: "Only declarative sentences — AI pattern",
        low: "Mix of declarative, interrogative, imperative sentences",
        extract: surface::sentence_type_variety,
    },
    SignalSpec {
        id: SignalId::PassiveVoice,
        name: "Passive Voice Usage",
        category: Surface,
        weight: 0.025,
        icon: "settings",
        high: "Elevated passive voice usage — formal AI writing style",
        low: "Mostly active voice — natural writing style",
        extract: surface::passive_voice,
    },
    SignalSpec {
        id: SignalId::ContractionUsage,
        name: "Contraction Usage",
        category: Style,
        weight: 0.04,
        icon: "file",
        high: "No contractions used — AI formal writing pattern",
        low: "Natural use of contractions",
        extract: surface::contraction_usage,
    },
    SignalSpec {
        id: SignalId::FirstPersonPronouns,
        name: "First-Person Pronouns",
        category: Style,
        weight: 0.04,
        icon: "user",
        high: "No first-person pronouns — impersonal AI style",
        low: "Personal voice with first-person pronouns",
        extract: lexical::first_person_pronouns,
    },
    SignalSpec {
        id: SignalId::LexicalSophistication,
        name: "Lexical Sophistication",
        category: Vocabulary,
        weight: 0.012,
        icon: "book",
        high: "Vocabulary profile matches AI generation patterns",
        low: "Vocabulary profile suggests human authorship",
        extract: lexical::lexical_sophistication,
    },
    SignalSpec {
        id: SignalId::WordLengthDistribution,
        name: "Word Length Distribution",
        category: Surface,
        weight: 0.008,
        icon: "bar-chart",
        high: "Smooth word length distribution — algorithmically generated",
        low: "Natural word length distribution",
        extract: lexical::word_length_distribution,
    },
    SignalSpec {
        id: SignalId::PhraseUniqueness,
        name: "Phrase Uniqueness",
        category: Vocabulary,
        weight: 0.008,
        icon: "repeat",
        high: "Extremely high phrase uniqueness — AI varied phrasing",
        low: "Natural phrase repetition patterns",
        extract: information::phrase_uniqueness,
    },
    SignalSpec {
        id: SignalId::ClicheDetection,
        name: "AI Cliché Detection",
        category: Vocabulary,
        weight: 0.11,
        icon: "alert-triangle",
        high: "AI-typical buzzwords and phrases detected (delve, leverage, tapestry, etc.)",
        low: "No distinctive AI language patterns found",
        extract: lexical::cliche_detection,
    },
    SignalSpec {
        id: SignalId::SentenceOpeners,
        name: "Sentence Opener Patterns",
        category: Style,
        weight: 0.04,
        icon: "list",
        high: "Transition-word sentence starters — formulaic AI pattern",
        low: "Natural sentence openings",
        extract: lexical::sentence_openers,
    },
    SignalSpec {
        id: SignalId::VocabularyUniqueness,
        name: "Vocabulary Uniqueness",
        category: Vocabulary,
        weight: 0.012,
        icon: "feather",
        high: "Low hapax ratio — AI reuses words more uniformly",
        low: "High ratio of unique words — natural vocabulary",
        extract: information::vocabulary_uniqueness,
    },
    SignalSpec {
        id: SignalId::ContentSpecificity,
        name: "Content Specificity",
        category: Vocabulary,
        weight: 0.055,
        icon: "hash",
        high: "Vague, general statements without specific details — AI pattern",
        low: "Specific details, numbers, names, quotes — human authorship",
        extract: surface::content_specificity,
    },
    SignalSpec {
        id: SignalId::BigramPerplexity,
        name: "Bigram Perplexity",
        category: Vocabulary,
        weight: 0.04,
        icon: "cpu",
        high: "Low perplexity — statistically smooth, AI-like word sequences",
        low: "High perplexity — unexpected word choices, human-like",
        extract: information::bigram_perplexity,
    },
    SignalSpec {
        id: SignalId::SentenceComplexityVariance,
        name: "Sentence Complexity Variance",
        category: Structure,
        weight: 0.025,
        icon: "bar-chart",
        high: "Uniform sentence complexity — AI maintains constant level",
        low: "Varying sentence complexity — natural writing pattern",
        extract: rhythm::sentence_complexity_variance,
    },
    SignalSpec {
        id: SignalId::FormalAdverbDensity,
        name: "Formal Adverb Density",
        category: Style,
        weight: 0.035,
        icon: "type",
        high: "Heavy use of formal adverbs (significantly, importantly, etc.) — AI pattern",
        low: "Natural adverb usage",
        extract: lexical::formal_adverb_density,
    },
    SignalSpec {
        id: SignalId::ListEnumeration,
        name: "List/Enumeration Pattern",
        category: Structure,
        weight: 0.02,
        icon: "list",
        high: "Structured enumeration detected — AI frequently uses numbered/ordered lists",
        low: "No excessive list patterns detected",
        extract: surface::list_enumeration,
    },
    SignalSpec {
        id: SignalId::EmotionalFlatness,
        name: "Emotional Flatness",
        category: Surface,
        weight: 0.018,
        icon: "message-circle",
        high: "Flat emotional tone throughout — AI lacks emotional variation",
        low: "Natural emotional variation present",
        extract: rhythm::emotional_flatness,
    },
    SignalSpec {
        id: SignalId::VocabularyLevelVariance,
        name: "Vocabulary Level Variance",
        category: Vocabulary,
        weight: 0.018,
        icon: "book",
        high: "Constant vocabulary sophistication across paragraphs — AI pattern",
        low: "Natural variation in vocabulary sophistication",
        extract: rhythm::vocabulary_level_variance,
    },
    SignalSpec {
        id: SignalId::DiscourseRepetition,
        name: "Discourse Repetition",
        category: Structure,
        weight: 0.018,
        icon: "repeat",
        high: "Repetitive sentence templates detected — AI structural pattern",
        low: "Diverse sentence templates — natural writing",
        extract: rhythm::discourse_repetition,
    },
    SignalSpec {
        id: SignalId::ConjunctionPatterns,
        name: "Conjunction Patterns",
        category: Surface,
        weight: 0.012,
        icon: "link",
        high: "No informal conjunction starters — formal AI writing style",
        low: "Natural use of conjunctions to start sentences",
        extract: lexical::conjunction_patterns,
    },
    SignalSpec {
        id: SignalId::ProbabilitySmoothness,
        name: "Probability Smoothness",
        category: Structure,
        weight: 0.03,
        icon: "trending-down",
        high: "Smooth token probability curve — AI selects high-probability tokens",
        low: "Jagged probability curve — human makes unexpected word choices",
        extract: information::probability_smoothness,
    },
    SignalSpec {
        id: SignalId::FunctionWordProfile,
        name: "Function Word Profile",
        category: Vocabulary,
        weight: 0.02,
        icon: "feather",
        high: "Function word distribution matches AI generation patterns",
        low: "Function word distribution matches natural writing",
        extract: lexical::function_word_profile,
    },
    SignalSpec {
        id: SignalId::GrammarPerfection,
        name: "Grammar Perfection",
        category: Surface,
        weight: 0.047,
        icon: "edit",
        high: "Suspiciously perfect grammar — no typos, fragments, or informal usage",
        low: "Natural imperfections present — human writing characteristics",
        extract: surface::grammar_perfection,
    },
    SignalSpec {
        id: SignalId::TonalNeutrality,
        name: "Tonal Neutrality",
        category: Style,
        weight: 0.025,
        icon: "sliders",
        high: "Balanced, neutral tone — AI avoids strong opinions",
        low: "Clear opinions and emotional expression — human voice",
        extract: lexical::tonal_neutrality,
    },
    SignalSpec {
        id: SignalId::NgramRepetition,
        name: "N-gram Repetition",
        category: Structure,
        weight: 0.015,
        icon: "hash",
        high: "Repeated 4/5-gram phrases detected — AI structural repetition",
        low: "Low phrase repetition — diverse expression",
        extract: information::ngram_repetition,
    },
];

pub fn spec(id: SignalId) -> &'static SignalSpec {
    &CATALOG[id as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = CATALOG.iter().map(|s| s.weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
    }

    #[test]
    fn test_catalog_order_matches_ids() {
        for (index, entry) in CATALOG.iter().enumerate() {
            assert_eq!(entry.id as usize, index);
            assert_eq!(spec(entry.id).name, entry.name);
        }
        let names: HashSet<&str> = CATALOG.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_heaviest_signal_is_cliche_detection() {
        let heaviest = CATALOG
            .iter()
            .max_by(|a, b| a.weight.total_cmp(&b.weight))
            .map(|s| s.id);
        assert_eq!(heaviest, Some(SignalId::ClicheDetection));
    }
}
