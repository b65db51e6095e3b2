/// Outcome of matching one frame. Folded into a [`ValidationState`](crate::data::ValidationState)
/// and then dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameResult {
    pub tp: usize,
    pub fp: usize,
    pub fn_count: usize,
    /// Accepted predictions absorbed by an unsure box under `UnsurePolicy::Ignore`.
    pub ignored: usize,
    pub matched_ious: Vec<f32>,
    /// `(confidence, is_true_positive)` for every scored prediction.
    pub confidence_matches: Vec<(f32, bool)>,
}

impl FrameResult {
    pub fn record_tp(&mut self, iou: f32, confidence: f32) {
        self.tp += 1;
        self.matched_ious.push(iou);
        self.confidence_matches.push((confidence, true));
    }

    pub fn record_fp(&mut self, confidence: f32) {
        self.fp += 1;
        self.confidence_matches.push((confidence, false));
    }

    pub fn record_fn(&mut self) {
        self.fn_count += 1;
    }

    pub fn record_ignored(&mut self) {
        self.ignored += 1;
    }
}
