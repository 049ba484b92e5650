// Error taxonomy for the analysis core and its collaborators

use thiserror::Error;

/// Validation and runtime failures of a text analysis.
///
/// `Display` renders the exact user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Please provide at least 50 characters for meaningful analysis.")]
    InputTooShort,
    #[error("Please provide at least 10 words for accurate analysis.")]
    InsufficientWords,
    #[error("Invalid behavior metrics: {0}")]
    InvalidBehavior(String),
    #[error("Text too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
    #[error("Analysis failed: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Validation failures are expected outcomes, not faults.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AnalysisError::InputTooShort
                | AnalysisError::InsufficientWords
                | AnalysisError::InvalidBehavior(_)
                | AnalysisError::TooLarge { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
    #[error("Text extraction failed: {0}")]
    Extraction(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to {action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn io(action: &'static str) -> impl FnOnce(std::io::Error) -> ConfigError {
        move |source| ConfigError::Io { action, source }
    }
}
