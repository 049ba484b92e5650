// AI Detector Core Services

pub mod error;
pub mod text_processor;
pub mod phrase_matcher;
pub mod lexicon;
pub mod detection;
pub mod detector;
pub mod documents;
pub mod batch;
pub mod config_store;

pub use error::{AnalysisError, ConfigError, DocumentError};
pub use config_store::*;
pub use detector::TextDetector;
pub use documents::analyze_document;
pub use batch::analyze_batch;

// Re-export detection module functions
pub use detection::{analyze, apply_behavior, evaluate_signals, CATALOG};
