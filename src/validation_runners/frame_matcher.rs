//! Greedy one-to-one matching of a frame's ground truth against its predictions.
//!
//! Ground-truth boxes are visited in their given order and each takes the unconsumed
//! prediction with the highest IoU. This is not an optimal bipartite assignment: an early box
//! can take a prediction a later box would have matched better. Ties go to the lowest
//! prediction index, so results are deterministic.

use crate::common::{BvrBox, BvrPrediction, GroundTruthBox, UnsurePolicy, ValidatorConfig};
use crate::data::FrameResult;

#[derive(Debug, Clone, Copy)]
pub struct FrameMatcher<'a> {
    config: &'a ValidatorConfig,
}

impl<'a> FrameMatcher<'a> {
    pub fn new(config: &'a ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn match_frame(&self, ground_truth: &[GroundTruthBox], predictions: &[BvrPrediction]) -> FrameResult {
        let iou_threshold = self.config.iou_threshold;

        // Unwanted labels are not part of the evaluation, not even as match candidates.
        let candidates: Vec<&BvrPrediction> = predictions
            .iter()
            .filter(|p| self.config.is_label_wanted(&p.label))
            .collect();

        let (scored, ignore_zones) = split_by_policy(ground_truth, self.config.unsure_policy);

        let mut consumed = vec![false; candidates.len()];
        let mut result = FrameResult::default();

        for gt in &scored {
            let mut max_iou = 0f32;
            let mut max_iou_index = None;

            for (i, pred) in candidates.iter().enumerate() {
                // one to one
                if consumed[i] {
                    continue;
                }

                let iou = pred.iou(gt);
                if iou > max_iou {
                    max_iou = iou;
                    max_iou_index = Some(i);
                }
            }

            match max_iou_index {
                Some(i) if max_iou >= iou_threshold && self.config.is_confident(candidates[i]) => {
                    consumed[i] = true;
                    result.record_tp(max_iou, candidates[i].confidence);
                }
                _ => result.record_fn(),
            }
        }

        for (i, pred) in candidates.iter().enumerate() {
            if consumed[i] || !self.config.is_confident(pred) {
                continue;
            }

            if ignore_zones.iter().any(|zone| pred.iou(zone) >= iou_threshold) {
                result.record_ignored();
            } else {
                result.record_fp(pred.confidence);
            }
        }

        log::trace!("Frame matched: tp={} fp={} fn={} ignored={}",
            result.tp, result.fp, result.fn_count, result.ignored);
        result
    }
}

/// Splits the annotated boxes into the ones that are scored and the ones that only absorb
/// predictions (`UnsurePolicy::Ignore`).
fn split_by_policy(ground_truth: &[GroundTruthBox], policy: UnsurePolicy) -> (Vec<BvrBox>, Vec<BvrBox>) {
    match policy {
        UnsurePolicy::Include => (ground_truth.iter().map(|gt| gt.bbox).collect(), vec![]),
        UnsurePolicy::Exclude => (
            ground_truth.iter().filter(|gt| !gt.unsure).map(|gt| gt.bbox).collect(),
            vec![],
        ),
        UnsurePolicy::Ignore => (
            ground_truth.iter().filter(|gt| !gt.unsure).map(|gt| gt.bbox).collect(),
            ground_truth.iter().filter(|gt| gt.unsure).map(|gt| gt.bbox).collect(),
        ),
    }
}

/// Matches one frame with plain ground-truth boxes.
///
/// `confidence_threshold` of `None` accepts every prediction.
pub fn match_frame(
    ground_truth: &[BvrBox],
    predictions: &[BvrPrediction],
    iou_threshold: f32,
    confidence_threshold: Option<f32>,
) -> FrameResult {
    let mut config = ValidatorConfig::new().with_iou_threshold(iou_threshold);
    config.confidence_threshold = confidence_threshold;
    let ground_truth: Vec<GroundTruthBox> = ground_truth.iter().copied().map(GroundTruthBox::from).collect();
    FrameMatcher::new(&config).match_frame(&ground_truth, predictions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(conf: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> BvrPrediction {
        BvrPrediction::new("person", conf, BvrBox::new(x1, y1, x2, y2))
    }

    #[test]
    fn exact_match_is_a_true_positive() {
        let result = match_frame(&[BvrBox::new(0., 0., 10., 10.)], &[pred(0.9, 0., 0., 10., 10.)], 0.5, None);
        assert_eq!((result.tp, result.fp, result.fn_count), (1, 0, 0));
        assert_eq!(result.confidence_matches, vec![(0.9, true)]);
        assert!((result.matched_ious[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn no_overlap_is_one_miss_and_one_false_alarm() {
        let result = match_frame(&[BvrBox::new(0., 0., 10., 10.)], &[pred(0.9, 20., 20., 30., 30.)], 0.5, None);
        assert_eq!((result.tp, result.fp, result.fn_count), (0, 1, 1));
        assert!(result.matched_ious.is_empty());
        assert_eq!(result.confidence_matches, vec![(0.9, false)]);
    }

    #[test]
    fn best_match_below_iou_threshold_never_counts() {
        // IoU = 1/3
        let result = match_frame(&[BvrBox::new(0., 0., 10., 10.)], &[pred(0.9, 5., 0., 15., 10.)], 0.5, None);
        assert_eq!((result.tp, result.fp, result.fn_count), (0, 1, 1));
    }

    #[test]
    fn empty_inputs() {
        let only_gt = match_frame(&[BvrBox::new(0., 0., 10., 10.), BvrBox::new(20., 0., 30., 10.)], &[], 0.5, None);
        assert_eq!((only_gt.tp, only_gt.fp, only_gt.fn_count), (0, 0, 2));

        let only_preds = match_frame(&[], &[pred(0.7, 0., 0., 1., 1.)], 0.5, None);
        assert_eq!((only_preds.tp, only_preds.fp, only_preds.fn_count), (0, 1, 0));

        assert_eq!(match_frame(&[], &[], 0.5, None), FrameResult::default());
    }

    #[test]
    fn prediction_is_never_reused() {
        let gt = [BvrBox::new(0., 0., 10., 10.), BvrBox::new(0., 0., 10., 10.)];
        let result = match_frame(&gt, &[pred(0.9, 0., 0., 10., 10.)], 0.5, None);
        assert_eq!((result.tp, result.fp, result.fn_count), (1, 0, 1));
    }

    #[test]
    fn ties_go_to_the_first_prediction() {
        let preds = [pred(0.2, 0., 0., 10., 10.), pred(0.8, 0., 0., 10., 10.)];
        let result = match_frame(&[BvrBox::new(0., 0., 10., 10.)], &preds, 0.5, None);
        assert_eq!(result.confidence_matches, vec![(0.2, true), (0.8, false)]);
    }

    #[test]
    fn greedy_order_is_not_optimal() {
        // The first box takes the prediction the second box needed. An optimal assignment
        // would pair both boxes, the greedy one leaves the second box unmatched.
        let gt = [BvrBox::new(0., 0., 10., 10.), BvrBox::new(3., 0., 13., 10.)];
        let preds = [pred(0.9, 1., 0., 11., 10.), pred(0.8, 0., 3., 10., 13.)];
        let result = match_frame(&gt, &preds, 0.5, None);
        assert_eq!((result.tp, result.fp, result.fn_count), (1, 1, 1));
        assert_eq!(result.confidence_matches, vec![(0.9, true), (0.8, false)]);
    }

    #[test]
    fn low_confidence_best_match_is_a_miss_and_not_a_false_alarm() {
        let result = match_frame(&[BvrBox::new(0., 0., 10., 10.)], &[pred(0.2, 0., 0., 10., 10.)], 0.5, Some(0.3));
        assert_eq!((result.tp, result.fp, result.fn_count), (0, 0, 1));
        assert!(result.confidence_matches.is_empty());
    }

    #[test]
    fn matching_is_deterministic_and_leaves_inputs_alone() {
        let gt = [BvrBox::new(0., 0., 10., 10.), BvrBox::new(30., 30., 50., 60.)];
        let preds = vec![pred(0.6, 1., 1., 10., 10.), pred(0.9, 31., 29., 50., 61.), pred(0.4, 100., 100., 120., 120.)];
        let before = preds.clone();
        let first = match_frame(&gt, &preds, 0.5, Some(0.3));
        let second = match_frame(&gt, &preds, 0.5, Some(0.3));
        assert_eq!(first, second);
        assert_eq!(preds, before);
        assert_eq!((first.tp, first.fp, first.fn_count), (2, 1, 0));
    }

    #[test]
    fn unwanted_labels_are_not_evaluated() {
        let config = ValidatorConfig::new().with_wanted_labels(&["person"]);
        let gt = [GroundTruthBox::sure(BvrBox::new(0., 0., 10., 10.))];
        let preds = [
            BvrPrediction::new("car", 0.9, BvrBox::new(0., 0., 10., 10.)),
            BvrPrediction::new("dog", 0.9, BvrBox::new(50., 50., 60., 60.)),
        ];
        let result = FrameMatcher::new(&config).match_frame(&gt, &preds);
        assert_eq!((result.tp, result.fp, result.fn_count), (0, 0, 1));
    }

    fn unsure_frame() -> (Vec<GroundTruthBox>, Vec<BvrPrediction>) {
        let gt = vec![
            GroundTruthBox::sure(BvrBox::new(0., 0., 10., 10.)),
            GroundTruthBox::unsure(BvrBox::new(50., 50., 60., 60.)),
        ];
        let preds = vec![pred(0.9, 0., 0., 10., 10.), pred(0.7, 50., 50., 60., 60.)];
        (gt, preds)
    }

    #[test]
    fn unsure_policy_include_scores_unsure_boxes() {
        let (gt, preds) = unsure_frame();
        let config = ValidatorConfig::new().with_unsure_policy(UnsurePolicy::Include);
        let result = FrameMatcher::new(&config).match_frame(&gt, &preds);
        assert_eq!((result.tp, result.fp, result.fn_count, result.ignored), (2, 0, 0, 0));
    }

    #[test]
    fn unsure_policy_exclude_turns_hits_into_false_alarms() {
        let (gt, preds) = unsure_frame();
        let config = ValidatorConfig::new().with_unsure_policy(UnsurePolicy::Exclude);
        let result = FrameMatcher::new(&config).match_frame(&gt, &preds);
        assert_eq!((result.tp, result.fp, result.fn_count, result.ignored), (1, 1, 0, 0));
    }

    #[test]
    fn unsure_policy_ignore_absorbs_hits() {
        let (gt, mut preds) = unsure_frame();
        let config = ValidatorConfig::new().with_unsure_policy(UnsurePolicy::Ignore);
        let result = FrameMatcher::new(&config).match_frame(&gt, &preds);
        assert_eq!((result.tp, result.fp, result.fn_count, result.ignored), (1, 0, 0, 1));
        assert_eq!(result.confidence_matches, vec![(0.9, true)]);

        // A miss on an unsure box costs nothing either.
        preds.pop();
        let result = FrameMatcher::new(&config).match_frame(&gt, &preds);
        assert_eq!((result.tp, result.fp, result.fn_count, result.ignored), (1, 0, 0, 0));
    }
}
