//! Reader and writer for the per-frame detector output.

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::common::BvrPrediction;
use crate::error::ValidationError;

/// The richer per-frame record: image name and size next to the predictions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub predictions: Vec<BvrPrediction>,
}

/// Either accepted layout of a prediction file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionFile {
    List(Vec<BvrPrediction>),
    Record(PredictionRecord),
}

impl PredictionFile {
    fn into_predictions(self) -> Vec<BvrPrediction> {
        match self {
            PredictionFile::List(predictions) => predictions,
            PredictionFile::Record(record) => record.predictions,
        }
    }
}

/// Parses a prediction document in either layout.
pub fn parse_predictions_str(json: &str) -> Result<Vec<BvrPrediction>> {
    let file: PredictionFile = serde_json::from_str(json)
        .context("Failed to parse JSON into predictions")?;
    Ok(file.into_predictions())
}

/// Loads the predictions of one frame. A missing file means the detector found nothing.
///
/// Parse failures are reported as [`ValidationError::MalformedPrediction`].
pub fn load_predictions(path: &Path) -> Result<Vec<BvrPrediction>> {
    if !path.exists() {
        log::debug!("No prediction file {}, treating frame as empty", path.display());
        return Ok(Vec::new());
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read contents of file: {}", path.display()))?;

    parse_predictions_str(&json).map_err(|e| {
        ValidationError::MalformedPrediction {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        }
        .into()
    })
}

/// Writes one frame's predictions to `<out_root>/<sequence>/<image stem>.json` as a
/// [`PredictionRecord`], creating the sequence folder when needed.
pub fn save_predictions(
    out_root: &Path,
    sequence: &str,
    image_name: &str,
    width: u32,
    height: u32,
    predictions: &[BvrPrediction],
) -> Result<PathBuf> {
    let out_dir = out_root.join(sequence);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create folder: {}", out_dir.display()))?;

    let stem = Path::new(image_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Image name has no file stem: {}", image_name))?;

    let record = PredictionRecord {
        image: image_name.to_string(),
        width,
        height,
        predictions: predictions.to_vec(),
    };

    let json = serde_json::to_string_pretty(&record)
        .context("Failed to serialize predictions to JSON")?;

    let out_path = out_dir.join(format!("{}.json", stem));
    std::fs::write(&out_path, json)
        .with_context(|| format!("Failed to write data to file: {}", out_path.display()))?;

    Ok(out_path)
}
