// Detection Module
// Pure AI-text detection core organized into specialized submodules:
// - stats: normalization primitive and numeric helpers
// - signals: the 37 signal extractors grouped by family
// - catalog: signal table with names, weights, icons and descriptions
// - ensemble: weighted combination, group agreement and overrides
// - calibration: length damping, confidence and verdict mapping
// - behavior: optional input-telemetry adjustment of a finished result
// - analyzer: `analyze`, the single entry point over raw text
//
// Nothing in here performs I/O or logging.

pub mod stats;
pub mod signals;
pub mod catalog;
pub mod ensemble;
pub mod calibration;
pub mod behavior;
pub mod analyzer;

// Re-export commonly used functions
pub use analyzer::{analyze, evaluate_signals};
pub use behavior::{apply_behavior, validate as validate_behavior};
pub use calibration::{calibrate_for_length, confidence, verdict};
pub use catalog::{spec, SignalSpec, CATALOG};
pub use ensemble::{agreement_adjustment, combine, weighted_sum, AgreementGroup, AGREEMENT_GROUPS};
pub use stats::{normalize, Direction};
