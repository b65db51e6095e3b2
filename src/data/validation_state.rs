use crate::data::FrameResult;

/// Confusion-matrix state of one validation run.
///
/// Zeroed when a run starts, updated once per frame, read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationState {
    pub tp: usize,
    pub fp: usize,
    pub fn_count: usize,
    pub ignored: usize,
    pub ious: Vec<f32>,
    pub confidence_matches: Vec<(f32, bool)>,
    pub frames: usize,
    pub sequences: usize,
    /// Prediction sequences that had no ground truth and were not scored.
    pub skipped_sequences: Vec<String>,
}

impl ValidationState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds one frame's outcome to the running totals.
    pub fn fold(&mut self, frame: FrameResult) {
        self.tp += frame.tp;
        self.fp += frame.fp;
        self.fn_count += frame.fn_count;
        self.ignored += frame.ignored;
        self.ious.extend(frame.matched_ious);
        self.confidence_matches.extend(frame.confidence_matches);
        self.frames += 1;
    }

    /// Combines a partial state computed elsewhere (e.g. on another worker).
    ///
    /// Counters add and lists concatenate, so merging partials in sequence order gives the
    /// same state as a sequential run.
    pub fn merge(&mut self, other: ValidationState) {
        self.tp += other.tp;
        self.fp += other.fp;
        self.fn_count += other.fn_count;
        self.ignored += other.ignored;
        self.ious.extend(other.ious);
        self.confidence_matches.extend(other.confidence_matches);
        self.frames += other.frames;
        self.sequences += other.sequences;
        self.skipped_sequences.extend(other.skipped_sequences);
    }

    /// Number of ground-truth boxes scored so far (`tp + fn`).
    pub fn total_ground_truth(&self) -> usize {
        self.tp + self.fn_count
    }

    /// Number of accepted predictions scored so far.
    pub fn total_predictions(&self) -> usize {
        self.tp + self.fp + self.ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tp: usize, fp: usize, fn_count: usize) -> FrameResult {
        let mut result = FrameResult::default();
        for _ in 0..tp {
            result.record_tp(0.75, 0.9);
        }
        for _ in 0..fp {
            result.record_fp(0.4);
        }
        for _ in 0..fn_count {
            result.record_fn();
        }
        result
    }

    #[test]
    fn fold_accumulates_counts_and_lists() {
        let mut state = ValidationState::new();
        state.fold(frame(1, 2, 0));
        state.fold(frame(2, 0, 3));
        assert_eq!((state.tp, state.fp, state.fn_count), (3, 2, 3));
        assert_eq!(state.ious.len(), 3);
        assert_eq!(state.confidence_matches.len(), 5);
        assert_eq!(state.frames, 2);
        assert_eq!(state.total_ground_truth(), 6);
        assert_eq!(state.total_predictions(), 5);
    }

    #[test]
    fn merge_matches_sequential_fold() {
        let frames = vec![frame(1, 0, 1), frame(0, 1, 0), frame(2, 1, 0)];

        let mut sequential = ValidationState::new();
        for f in frames.iter().cloned() {
            sequential.fold(f);
        }

        let mut left = ValidationState::new();
        left.fold(frames[0].clone());
        let mut right = ValidationState::new();
        right.fold(frames[1].clone());
        right.fold(frames[2].clone());
        left.merge(right);

        assert_eq!(left, sequential);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut state = ValidationState::new();
        state.fold(frame(1, 1, 1));
        state.skipped_sequences.push("seq_7".to_string());
        state.reset();
        assert_eq!(state, ValidationState::default());
    }
}
