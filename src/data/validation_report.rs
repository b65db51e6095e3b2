use std::fmt;
use std::path::Path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::data::ValidationState;

/// Snapshot of every metric of a finished run.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub map_50: f32,
    pub mean_iou: f32,
    pub false_positive_rate: f32,
    pub false_negative_rate: f32,
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_count: usize,
    pub ignored: usize,
    pub frames: usize,
    pub sequences: usize,
    pub skipped_sequences: Vec<String>,
}

impl ValidationReport {
    pub fn from_state(state: &ValidationState) -> Self {
        Self {
            precision: state.precision(),
            recall: state.recall(),
            f1: state.f1(),
            map_50: state.map_50(),
            mean_iou: state.mean_iou(),
            false_positive_rate: state.false_positive_rate(),
            false_negative_rate: state.false_negative_rate(),
            tp: state.tp,
            fp: state.fp,
            fn_count: state.fn_count,
            ignored: state.ignored,
            frames: state.frames,
            sequences: state.sequences,
            skipped_sequences: state.skipped_sequences.clone(),
        }
    }

    /// Writes the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize validation report to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write data to file: {}", path.display()))?;
        Ok(())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Precision: {:.4}", self.precision)?;
        writeln!(f, "Recall: {:.4}", self.recall)?;
        writeln!(f, "F1: {:.4}", self.f1)?;
        writeln!(f, "mAP@0.5: {:.4}", self.map_50)?;
        writeln!(f, "Mean IoU: {:.4}", self.mean_iou)?;
        writeln!(f, "FP rate: {:.4}", self.false_positive_rate)?;
        writeln!(f, "FN rate: {:.4}", self.false_negative_rate)?;
        write!(f, "TP: {} | FP: {} | FN: {} | Ignored: {} | Frames: {} | Sequences: {}",
               self.tp, self.fp, self.fn_count, self.ignored, self.frames, self.sequences)?;
        if !self.skipped_sequences.is_empty() {
            write!(f, "\nSkipped (no labels): {}", self.skipped_sequences.join(", "))?;
        }
        Ok(())
    }
}
