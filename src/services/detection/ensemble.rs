// Ensemble Combiner
// Weighted sum of all signals, then cross-group agreement and single-signal overrides.

use crate::models::{Signal, SignalId};

use super::signals::NEUTRAL;

const AI_LEANING: f64 = 0.6;
const HUMAN_LEANING: f64 = 0.4;
const AGREEMENT_STEP: f64 = 0.035;
const MIN_AGREEING_GROUPS: usize = 2;

/// Signals that measure related traits; a group "agrees" when at least
/// `quorum` members lean the same way.
#[derive(Debug)]
pub struct AgreementGroup {
    pub name: &'static str,
    pub members: &'static [SignalId],
    pub quorum: usize,
}

pub const AGREEMENT_GROUPS: [AgreementGroup; 4] = [
    AgreementGroup {
        name: "style",
        members: &[
            SignalId::TransitionDensity,
            SignalId::FillerAbsence,
            SignalId::ContractionUsage,
            SignalId::FirstPersonPronouns,
            SignalId::SentenceOpeners,
            SignalId::FormalAdverbDensity,
            SignalId::TonalNeutrality,
        ],
        quorum: 4,
    },
    AgreementGroup {
        name: "vocabulary",
        members: &[
            SignalId::ClicheDetection,
            SignalId::LexicalSophistication,
            SignalId::ContentSpecificity,
            SignalId::BigramPerplexity,
            SignalId::VocabularyLevelVariance,
            SignalId::FunctionWordProfile,
        ],
        quorum: 3,
    },
    AgreementGroup {
        name: "structure",
        members: &[
            SignalId::SentenceBurstiness,
            SignalId::ReadabilityConsistency,
            SignalId::SentenceComplexityVariance,
            SignalId::ListEnumeration,
            SignalId::DiscourseRepetition,
            SignalId::ProbabilitySmoothness,
        ],
        quorum: 3,
    },
    AgreementGroup {
        name: "surface",
        members: &[
            SignalId::PunctuationDiversity,
            SignalId::QuestionsExclamations,
            SignalId::PassiveVoice,
            SignalId::GrammarPerfection,
            SignalId::EmotionalFlatness,
            SignalId::ConjunctionPatterns,
        ],
        quorum: 3,
    },
];

fn score_of(signals: &[Signal], id: SignalId) -> f64 {
    signals
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.normalized_score)
        .unwrap_or(NEUTRAL)
}

impl AgreementGroup {
    fn count_where(&self, signals: &[Signal], pred: impl Fn(f64) -> bool) -> usize {
        self.members.iter().filter(|&&id| pred(score_of(signals, id))).count()
    }

    pub fn leans_ai(&self, signals: &[Signal]) -> bool {
        self.count_where(signals, |s| s > AI_LEANING) >= self.quorum
    }

    pub fn leans_human(&self, signals: &[Signal]) -> bool {
        self.count_where(signals, |s| s < HUMAN_LEANING) >= self.quorum
    }
}

pub fn weighted_sum(signals: &[Signal]) -> f64 {
    signals.iter().fold(0.0, |acc, s| acc + s.normalized_score * s.weight)
}

/// Positive when enough groups lean AI, negative when enough lean human.
/// AI agreement takes precedence; the two never combine.
pub fn agreement_adjustment(signals: &[Signal]) -> f64 {
    let ai_groups = AGREEMENT_GROUPS.iter().filter(|g| g.leans_ai(signals)).count();
    if ai_groups >= MIN_AGREEING_GROUPS {
        return AGREEMENT_STEP * ai_groups as f64;
    }
    let human_groups = AGREEMENT_GROUPS.iter().filter(|g| g.leans_human(signals)).count();
    if human_groups >= MIN_AGREEING_GROUPS {
        return -(AGREEMENT_STEP * human_groups as f64);
    }
    0.0
}

/// Fixed nudges for decisive individual signals, applied in order.
fn apply_overrides(mut probability: f64, signals: &[Signal]) -> f64 {
    let cliche = score_of(signals, SignalId::ClicheDetection);
    let grammar = score_of(signals, SignalId::GrammarPerfection);
    let filler = score_of(signals, SignalId::FillerAbsence);

    if cliche > 0.85 {
        probability += 0.03;
    }
    if cliche < 0.15 {
        probability -= 0.02;
    }
    if grammar < 0.2 && filler < 0.2 {
        probability -= 0.03;
    }
    if grammar > 0.8 && filler > 0.8 {
        probability += 0.02;
    }
    probability
}

/// Uncalibrated AI probability for a full set of signals.
pub fn combine(signals: &[Signal]) -> f64 {
    let probability = weighted_sum(signals) + agreement_adjustment(signals);
    apply_overrides(probability, signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::catalog::CATALOG;

    fn uniform(score: f64) -> Vec<Signal> {
        CATALOG
            .iter()
            .map(|spec| Signal {
                id: spec.id,
                name: spec.name,
                category: spec.category,
                weight: spec.weight,
                normalized_score: score,
                high_description: spec.high,
                low_description: spec.low,
                icon: spec.icon,
            })
            .collect()
    }

    fn with_score(mut signals: Vec<Signal>, id: SignalId, score: f64) -> Vec<Signal> {
        for s in signals.iter_mut().filter(|s| s.id == id) {
            s.normalized_score = score;
        }
        signals
    }

    #[test]
    fn test_neutral_signals_combine_to_half() {
        let signals = uniform(0.5);
        assert!((combine(&signals) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_all_groups_agreeing_ai() {
        let signals = uniform(0.9);
        assert!((agreement_adjustment(&signals) - 0.14).abs() < 1e-12);
        // 0.9 + 0.14 + cliché boost + perfect-grammar boost
        assert!((combine(&signals) - (0.9 + 0.14 + 0.03 + 0.02)).abs() < 1e-9);
    }

    #[test]
    fn test_all_groups_agreeing_human() {
        let signals = uniform(0.1);
        assert!((agreement_adjustment(&signals) + 0.14).abs() < 1e-12);
        assert!((combine(&signals) - (0.1 - 0.14 - 0.02 - 0.03)).abs() < 1e-9);
    }

    #[test]
    fn test_single_group_is_not_enough() {
        let mut signals = uniform(0.5);
        for id in AGREEMENT_GROUPS[0].members {
            signals = with_score(signals, *id, 0.9);
        }
        assert_eq!(agreement_adjustment(&signals), 0.0);
    }

    #[test]
    fn test_style_quorum_is_four() {
        let mut signals = uniform(0.5);
        for id in &AGREEMENT_GROUPS[0].members[..3] {
            signals = with_score(signals, *id, 0.9);
        }
        assert!(!AGREEMENT_GROUPS[0].leans_ai(&signals));
        signals = with_score(signals, AGREEMENT_GROUPS[0].members[3], 0.9);
        assert!(AGREEMENT_GROUPS[0].leans_ai(&signals));
    }
}
