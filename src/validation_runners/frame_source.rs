use crate::common::{BvrPrediction, GroundTruthBox};

/// Supplies annotations and detector output to the validator.
///
/// Keeps the matching core free of any storage concerns: the filesystem layout is one
/// implementation ([`DatasetSource`](super::DatasetSource)), an in-memory table
/// ([`MemorySource`](super::MemorySource)) is another.
pub trait FrameSource: Sync {
    /// Sequences (videos) that have predictions, in a stable order.
    fn sequences(&self) -> anyhow::Result<Vec<String>>;

    /// Frames of `sequence` that carry ground truth, in a stable order.
    ///
    /// `None` means the sequence has no ground truth at all and cannot be scored.
    fn frames(&self, sequence: &str) -> anyhow::Result<Option<Vec<String>>>;

    fn load_ground_truth(&self, sequence: &str, frame: &str) -> anyhow::Result<Vec<GroundTruthBox>>;

    /// A frame without detector output yields an empty list, not an error.
    fn load_predictions(&self, sequence: &str, frame: &str) -> anyhow::Result<Vec<BvrPrediction>>;
}
