// AI Detector Data Models
// Wire-level result, request and batch types shared by the core and the boundary

use serde::{Deserialize, Serialize};

// ============ Signals ============

/// Stable identity of every signal in the catalog, in catalog order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SignalId {
    CharacterEntropy,
    WordDistribution,
    ZipfFit,
    WordPredictability,
    SentenceBurstiness,
    SentenceAutocorrelation,
    ParagraphConsistency,
    ReadabilityConsistency,
    StructureRepetition,
    TransitionDensity,
    FillerAbsence,
    PunctuationDiversity,
    QuestionsExclamations,
    SentenceTypeVariety,
    PassiveVoice,
    ContractionUsage,
    FirstPersonPronouns,
    LexicalSophistication,
    WordLengthDistribution,
    PhraseUniqueness,
    ClicheDetection,
    SentenceOpeners,
    VocabularyUniqueness,
    ContentSpecificity,
    BigramPerplexity,
    SentenceComplexityVariance,
    FormalAdverbDensity,
    ListEnumeration,
    EmotionalFlatness,
    VocabularyLevelVariance,
    DiscourseRepetition,
    ConjunctionPatterns,
    ProbabilitySmoothness,
    FunctionWordProfile,
    GrammarPerfection,
    TonalNeutrality,
    NgramRepetition,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Style,
    Vocabulary,
    Structure,
    Surface,
}

/// One computed measurement. Immutable once built by the analyzer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: SignalId,
    pub name: &'static str,
    pub category: SignalCategory,
    pub weight: f64,
    pub normalized_score: f64,
    pub high_description: &'static str,
    pub low_description: &'static str,
    pub icon: &'static str,
}

impl Signal {
    /// Integer percentage shown to users.
    pub fn percent(&self) -> i32 {
        (self.normalized_score * 100.0).round() as i32
    }

    pub fn description(&self) -> &'static str {
        if self.normalized_score > 0.5 {
            self.high_description
        } else {
            self.low_description
        }
    }

    pub fn detail(&self) -> SignalDetail {
        SignalDetail {
            name: self.name.to_string(),
            score: self.percent(),
            description: self.description().to_string(),
            icon: self.icon.to_string(),
            category: self.category,
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignalDetail {
    pub name: String,
    pub score: i32,
    pub description: String,
    pub icon: String,
    pub category: SignalCategory,
    pub weight: f64,
}

// ============ Verdict & Confidence ============

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    #[serde(rename = "Likely Human-Written")]
    LikelyHuman,
    #[serde(rename = "Uncertain")]
    Uncertain,
    #[serde(rename = "Possibly AI-Generated")]
    PossiblyAi,
    #[serde(rename = "Likely AI-Generated")]
    LikelyAi,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::LikelyHuman => "Likely Human-Written",
            Verdict::Uncertain => "Uncertain",
            Verdict::PossiblyAi => "Possibly AI-Generated",
            Verdict::LikelyAi => "Likely AI-Generated",
        }
    }

    pub fn color(&self) -> VerdictColor {
        match self {
            Verdict::LikelyHuman => VerdictColor::Green,
            Verdict::Uncertain => VerdictColor::Yellow,
            Verdict::PossiblyAi => VerdictColor::Orange,
            Verdict::LikelyAi => VerdictColor::Red,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerdictColor {
    Red,
    Orange,
    Yellow,
    Green,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

// ============ Text Analysis Result ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub unique_words: usize,
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    /// Unique-word share rendered as e.g. `"64.2%"`.
    pub vocabulary_richness: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnsembleResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub ai_probability: i32,
    pub human_probability: i32,
    pub verdict: Verdict,
    pub verdict_color: VerdictColor,
    pub confidence: Confidence,
    pub details: Vec<SignalDetail>,
    pub stats: TextStats,
    /// Full signal records in catalog order; `details` is their wire view.
    #[serde(skip)]
    pub signals: Vec<Signal>,
}

// ============ Behavioral Telemetry ============

/// Optional client-side input telemetry. Every field is independent.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorMetrics {
    #[serde(default)]
    pub paste_ratio: Option<f64>,
    #[serde(default)]
    pub avg_chars_per_second: Option<f64>,
    #[serde(default)]
    pub edit_count: Option<u32>,
    #[serde(default)]
    pub typing_burstiness: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralDetail {
    pub name: String,
    pub score: i32,
    pub description: String,
    pub icon: String,
}

// ============ Text Detection Request / Response ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDetectRequest {
    pub text: String,
    #[serde(default)]
    pub behavior: Option<BehaviorMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextDetectResponse {
    pub request_id: String,
    pub analyzed_at: String,
    #[serde(flatten)]
    pub result: EnsembleResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavioral_details: Option<Vec<BehavioralDetail>>,
}

/// Serialises either as the full response or exactly as `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnalyzeOutcome {
    Success(Box<TextDetectResponse>),
    Failure { error: String },
}

impl AnalyzeOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        AnalyzeOutcome::Failure {
            error: message.into(),
        }
    }

    pub fn ai_probability(&self) -> Option<i32> {
        match self {
            AnalyzeOutcome::Success(resp) => Some(resp.result.ai_probability),
            AnalyzeOutcome::Failure { .. } => None,
        }
    }
}

// ============ Document Analysis ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDetail {
    pub name: String,
    pub found: bool,
    pub score: i32,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    #[serde(rename = "type")]
    pub kind: String,
    pub file_name: String,
    pub file_size: usize,
    pub ai_probability: i32,
    pub human_probability: i32,
    pub verdict: Verdict,
    pub verdict_color: VerdictColor,
    pub confidence: Confidence,
    pub details: Vec<MetadataDetail>,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_analysis: Option<EnsembleResult>,
}

// ============ Batch Detection ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemRequest {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub behavior: Option<BehaviorMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TextDetectResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub count: i32,
    pub fail_count: i32,
    pub avg_probability: f64,
    pub p95_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDetectRequest {
    pub items: Vec<BatchItemRequest>,
    #[serde(default)]
    pub parallel: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDetectResponse {
    pub items: Vec<BatchItemResponse>,
    pub summary: BatchSummary,
}
