//! Detection-quality metrics derived from a finished [`ValidationState`].
//!
//! Every metric is total: an all-zero state yields `0.0`, never NaN.

use crate::data::ValidationState;

/// Added to every metric denominator.
pub const METRIC_EPSILON: f64 = 1e-9;

fn ratio(numerator: usize, denominator: usize) -> f32 {
    (numerator as f64 / (denominator as f64 + METRIC_EPSILON)) as f32
}

impl ValidationState {
    pub fn precision(&self) -> f32 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f32 {
        ratio(self.tp, self.tp + self.fn_count)
    }

    pub fn f1(&self) -> f32 {
        let p = self.precision() as f64;
        let r = self.recall() as f64;
        (2.0 * p * r / (p + r + METRIC_EPSILON)) as f32
    }

    /// Average IoU of the true positives, `0.0` when nothing matched.
    pub fn mean_iou(&self) -> f32 {
        if self.ious.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.ious.iter().map(|iou| *iou as f64).sum();
        (sum / self.ious.len() as f64) as f32
    }

    pub fn false_positive_rate(&self) -> f32 {
        ratio(self.fp, self.fp + self.tp)
    }

    pub fn false_negative_rate(&self) -> f32 {
        ratio(self.fn_count, self.tp + self.fn_count)
    }

    /// Non-interpolated average precision at the run's IoU threshold.
    ///
    /// Scored predictions are ranked by confidence (descending; equal confidences keep their
    /// insertion order) and the precision/recall curve is integrated as
    /// `sum(precision_i * (recall_i - recall_{i-1}))`, with recall taken against
    /// `tp + fn` ground-truth boxes.
    pub fn map_50(&self) -> f32 {
        if self.confidence_matches.is_empty() {
            return 0.0;
        }

        let mut ranked = self.confidence_matches.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let total_gt = self.total_ground_truth() as f64;
        let mut tp_cum = 0usize;
        let mut fp_cum = 0usize;
        let mut prev_recall = 0f64;
        let mut ap = 0f64;

        for (_, is_tp) in ranked {
            if is_tp {
                tp_cum += 1;
            } else {
                fp_cum += 1;
            }

            let precision = tp_cum as f64 / ((tp_cum + fp_cum) as f64 + METRIC_EPSILON);
            let recall = tp_cum as f64 / (total_gt + METRIC_EPSILON);

            ap += precision * (recall - prev_recall);
            prev_recall = recall;
        }

        ap as f32
    }
}
