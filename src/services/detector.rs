// Text Detection Service
// Wraps the pure analyzer with request ids, timestamps, behavior blending and panic containment.

use std::panic;

use crate::models::{AnalyzeOutcome, BehaviorMetrics, TextDetectResponse};
use crate::services::config_store::AnalysisConfig;
use crate::services::detection::{analyze, apply_behavior};
use crate::services::error::AnalysisError;

#[derive(Debug, Clone)]
pub struct TextDetector {
    max_text_bytes: usize,
    apply_behavior: bool,
}

impl Default for TextDetector {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl TextDetector {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_text_bytes: config.max_text_bytes,
            apply_behavior: config.apply_behavior,
        }
    }

    /// Full detection for one text. A panic inside the analyzer surfaces as
    /// `AnalysisError::Internal` instead of unwinding into the caller.
    pub fn detect(
        &self,
        text: &str,
        behavior: Option<&BehaviorMetrics>,
    ) -> Result<TextDetectResponse, AnalysisError> {
        if text.len() > self.max_text_bytes {
            return Err(AnalysisError::TooLarge {
                size: text.len(),
                limit: self.max_text_bytes,
            });
        }

        let result = panic::catch_unwind(|| analyze(text))
            .map_err(|payload| AnalysisError::Internal(panic_message(payload.as_ref())))??;

        let (result, behavioral_details) = match behavior {
            Some(metrics) if self.apply_behavior => {
                let (adjusted, details) = apply_behavior(&result, metrics)?;
                (adjusted, Some(details).filter(|d| !d.is_empty()))
            }
            _ => (result, None),
        };

        Ok(TextDetectResponse {
            request_id: uuid::Uuid::new_v4().to_string(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            result,
            behavioral_details,
        })
    }

    /// Like `detect`, folded into the wire outcome.
    pub fn outcome(&self, text: &str, behavior: Option<&BehaviorMetrics>) -> AnalyzeOutcome {
        match self.detect(text, behavior) {
            Ok(response) => AnalyzeOutcome::Success(Box::new(response)),
            Err(e) => AnalyzeOutcome::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "ok so i finally tried that ramen place downtown lol. honestly? kinda overrated. the broth was way too salty and i waited like 40 minutes for a table!! my friend Jake loved it tho.";

    #[test]
    fn test_detect_wraps_result() {
        let response = TextDetector::default().detect(TEXT, None).unwrap();
        assert_eq!(response.request_id.len(), 36);
        assert!(chrono::DateTime::parse_from_rfc3339(&response.analyzed_at).is_ok());
        assert_eq!(response.result, analyze(TEXT).unwrap());
        assert!(response.behavioral_details.is_none());
    }

    #[test]
    fn test_behavior_can_be_disabled() {
        let metrics = BehaviorMetrics {
            paste_ratio: Some(1.0),
            ..Default::default()
        };
        let on = TextDetector::default().detect(TEXT, Some(&metrics)).unwrap();
        assert_eq!(on.behavioral_details.as_ref().map(Vec::len), Some(1));

        let config = AnalysisConfig {
            apply_behavior: false,
            ..Default::default()
        };
        let off = TextDetector::new(&config).detect(TEXT, Some(&metrics)).unwrap();
        assert!(off.behavioral_details.is_none());
        assert_eq!(off.result, analyze(TEXT).unwrap());
    }

    #[test]
    fn test_empty_behavior_adds_no_details() {
        let response = TextDetector::default()
            .detect(TEXT, Some(&BehaviorMetrics::default()))
            .unwrap();
        assert!(response.behavioral_details.is_none());
    }

    #[test]
    fn test_failure_outcome_is_bare_error() {
        let outcome = TextDetector::default().outcome("short", None);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Please provide at least 50 characters for meaningful analysis."})
        );
    }

    #[test]
    fn test_oversized_text_rejected() {
        let config = AnalysisConfig {
            max_text_bytes: 64,
            ..Default::default()
        };
        let err = TextDetector::new(&config).detect(TEXT, None).unwrap_err();
        assert!(matches!(err, AnalysisError::TooLarge { limit: 64, .. }));
    }
}
