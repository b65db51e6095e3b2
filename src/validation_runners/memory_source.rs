use std::collections::BTreeMap;
use crate::common::{BvrPrediction, GroundTruthBox};
use crate::validation_runners::FrameSource;

#[derive(Debug, Default, Clone)]
struct MemorySequence {
    ground_truth: Option<BTreeMap<String, Vec<GroundTruthBox>>>,
    predictions: BTreeMap<String, Vec<BvrPrediction>>,
}

/// A [`FrameSource`] backed by in-memory tables, for callers that already hold the data.
///
/// Sequences and frames come back in lexical order. Like a prediction folder on disk, a
/// sequence only exists once it holds predictions for at least one frame.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    sequences: BTreeMap<String, MemorySequence>,
}

impl MemorySource {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds one annotated frame together with its predictions.
    pub fn with_frame(mut self, sequence: &str, frame: &str,
                      ground_truth: Vec<GroundTruthBox>, predictions: Vec<BvrPrediction>) -> Self {
        let seq = self.sequences.entry(sequence.to_string()).or_default();
        seq.ground_truth
            .get_or_insert_with(BTreeMap::new)
            .insert(frame.to_string(), ground_truth);
        seq.predictions.insert(frame.to_string(), predictions);
        self
    }

    /// Adds predictions for a frame that has no annotation file.
    pub fn with_unlabelled_frame(mut self, sequence: &str, frame: &str, predictions: Vec<BvrPrediction>) -> Self {
        self.sequences
            .entry(sequence.to_string())
            .or_default()
            .predictions
            .insert(frame.to_string(), predictions);
        self
    }

    /// Adds annotations for a frame the detector produced no output for.
    pub fn with_undetected_frame(mut self, sequence: &str, frame: &str, ground_truth: Vec<GroundTruthBox>) -> Self {
        self.sequences
            .entry(sequence.to_string())
            .or_default()
            .ground_truth
            .get_or_insert_with(BTreeMap::new)
            .insert(frame.to_string(), ground_truth);
        self
    }
}

impl FrameSource for MemorySource {
    fn sequences(&self) -> anyhow::Result<Vec<String>> {
        Ok(self
            .sequences
            .iter()
            .filter(|(_, seq)| !seq.predictions.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn frames(&self, sequence: &str) -> anyhow::Result<Option<Vec<String>>> {
        Ok(self
            .sequences
            .get(sequence)
            .and_then(|seq| seq.ground_truth.as_ref())
            .map(|gt| gt.keys().cloned().collect()))
    }

    fn load_ground_truth(&self, sequence: &str, frame: &str) -> anyhow::Result<Vec<GroundTruthBox>> {
        self.sequences
            .get(sequence)
            .and_then(|seq| seq.ground_truth.as_ref())
            .and_then(|gt| gt.get(frame))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No ground truth for frame {}/{}", sequence, frame))
    }

    fn load_predictions(&self, sequence: &str, frame: &str) -> anyhow::Result<Vec<BvrPrediction>> {
        Ok(self
            .sequences
            .get(sequence)
            .and_then(|seq| seq.predictions.get(frame))
            .cloned()
            .unwrap_or_default())
    }
}
