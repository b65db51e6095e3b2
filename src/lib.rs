pub mod common;
pub mod data;
pub mod error;
pub mod parsing;
pub mod sweep_chart;
pub mod validation_runners;

use std::path::Path;
use std::time::Instant;
use crate::common::ValidatorConfig;
use crate::data::{SweepPoint, ValidationReport};
use crate::validation_runners::{DatasetSource, ThresholdSweep, Validator};

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;

/// Scores the detector output under `predictions_root` against the annotations under
/// `labels_root` and returns the summary report.
pub fn run_validation(config: &ValidatorConfig, labels_root: &Path, predictions_root: &Path) -> Result<ValidationReport> {
    let now = Instant::now();
    log::info!("Validation config:\n{}", config.to_string());

    let source = DatasetSource::new(labels_root, predictions_root)
        .with_annotation_suffix(&config.annotation_suffix);
    let mut validator = Validator::new(config.clone())?;
    let report = ValidationReport::from_state(validator.validate(&source)?);

    log::debug!("Validation finished in {:?}", now.elapsed());
    Ok(report)
}

/// Runs a full validation per confidence threshold in `thresholds`.
pub fn run_sweep(config: &ValidatorConfig, labels_root: &Path, predictions_root: &Path, thresholds: &[f32]) -> Result<Vec<SweepPoint>> {
    let now = Instant::now();

    let source = DatasetSource::new(labels_root, predictions_root)
        .with_annotation_suffix(&config.annotation_suffix);
    let points = ThresholdSweep::new(&source, config.clone(), thresholds).collect_points()?;

    log::debug!("Sweep of {} threshold(s) finished in {:?}", thresholds.len(), now.elapsed());
    Ok(points)
}
