use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::common::{BvrPrediction, GroundTruthBox, DEFAULT_ANNOTATION_SUFFIX};
use crate::parsing::{load_predictions, parse_annotation};
use crate::validation_runners::FrameSource;

const ANNOTATION_EXT: &str = "xml";
const PREDICTION_EXT: &str = "json";

/// A [`FrameSource`] over the dataset's folder layout:
///
/// * `<labels_root>/<sequence><suffix>/<frame>.xml`: one annotation file per frame
/// * `<predictions_root>/<sequence>/<frame>.json`: one prediction file per frame
#[derive(Debug, Clone)]
pub struct DatasetSource {
    labels_root: PathBuf,
    predictions_root: PathBuf,
    annotation_suffix: String,
}

impl DatasetSource {
    pub fn new(labels_root: impl Into<PathBuf>, predictions_root: impl Into<PathBuf>) -> Self {
        Self {
            labels_root: labels_root.into(),
            predictions_root: predictions_root.into(),
            annotation_suffix: DEFAULT_ANNOTATION_SUFFIX.to_string(),
        }
    }

    pub fn with_annotation_suffix(mut self, suffix: &str) -> Self {
        self.annotation_suffix = suffix.to_string();
        self
    }

    pub fn labels_dir(&self, sequence: &str) -> PathBuf {
        self.labels_root.join(format!("{}{}", sequence, self.annotation_suffix))
    }

    pub fn predictions_dir(&self, sequence: &str) -> PathBuf {
        self.predictions_root.join(sequence)
    }
}

/// Sorted file stems of the files in `dir` carrying extension `ext`.
fn file_stems(dir: &Path, ext: &str) -> Result<Vec<String>> {
    let mut stems = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to list folder: {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}

impl FrameSource for DatasetSource {
    fn sequences(&self) -> Result<Vec<String>> {
        let root = &self.predictions_root;
        let mut names = Vec::new();
        for entry in std::fs::read_dir(root).with_context(|| format!("Failed to list folder: {}", root.display()))? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn frames(&self, sequence: &str) -> Result<Option<Vec<String>>> {
        let dir = self.labels_dir(sequence);
        if !dir.is_dir() {
            return Ok(None);
        }
        Ok(Some(file_stems(&dir, ANNOTATION_EXT)?))
    }

    fn load_ground_truth(&self, sequence: &str, frame: &str) -> Result<Vec<GroundTruthBox>> {
        parse_annotation(&self.labels_dir(sequence).join(format!("{}.{}", frame, ANNOTATION_EXT)))
    }

    fn load_predictions(&self, sequence: &str, frame: &str) -> Result<Vec<BvrPrediction>> {
        load_predictions(&self.predictions_dir(sequence).join(format!("{}.{}", frame, PREDICTION_EXT)))
    }
}
