use std::path::PathBuf;
use thiserror::Error;

/// Failures a validation run can report.
///
/// Library functions return `anyhow::Result`; these variants travel inside it and can be
/// recovered with `downcast_ref::<ValidationError>()`.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A prediction sequence has no annotation folder. Non-fatal, the sequence is skipped.
    #[error("No ground truth for sequence '{sequence}'")]
    MissingGroundTruth { sequence: String },

    /// An annotation file could not be parsed. Terminates the run.
    #[error("Malformed annotation file {path}: {reason}")]
    MalformedAnnotation { path: PathBuf, reason: String },

    /// A prediction file could not be parsed. Terminates the run.
    #[error("Malformed prediction file {path}: {reason}")]
    MalformedPrediction { path: PathBuf, reason: String },

    #[error("Invalid validator config: {0}")]
    InvalidConfig(String),
}
