//! Options for a validation run.

use anyhow::Result;
use crate::common::{BvrPrediction, UnsurePolicy};
use crate::error::ValidationError;

pub const DEFAULT_IOU_THRESHOLD: f32 = 0.5;
pub const DEFAULT_ANNOTATION_SUFFIX: &str = "_auto_annots";

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    pub iou_threshold: f32,
    // None accepts every prediction regardless of score
    pub confidence_threshold: Option<f32>,
    pub unsure_policy: UnsurePolicy,
    pub wanted_labels: Option<Vec<String>>,
    pub annotation_suffix: String,
    pub parallel: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            confidence_threshold: None,
            unsure_policy: UnsurePolicy::Include,
            wanted_labels: None,
            annotation_suffix: DEFAULT_ANNOTATION_SUFFIX.to_string(),
            parallel: false,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_iou_threshold(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn with_confidence_threshold(mut self, x: f32) -> Self {
        self.confidence_threshold = Some(x);
        self
    }

    pub fn without_confidence_threshold(mut self) -> Self {
        self.confidence_threshold = None;
        self
    }

    pub fn with_unsure_policy(mut self, x: UnsurePolicy) -> Self {
        self.unsure_policy = x;
        self
    }

    pub fn with_wanted_labels(mut self, labels: &[&str]) -> Self {
        self.wanted_labels = Some(labels.iter().map(|x| x.to_string()).collect::<Vec<String>>());
        self
    }

    pub fn with_annotation_suffix(mut self, suffix: &str) -> Self {
        self.annotation_suffix = suffix.to_string();
        self
    }

    pub fn with_parallel(mut self, x: bool) -> Self {
        self.parallel = x;
        self
    }

    /// Whether a prediction's score clears the configured confidence threshold.
    pub fn is_confident(&self, prediction: &BvrPrediction) -> bool {
        match self.confidence_threshold {
            Some(threshold) => prediction.confidence >= threshold,
            None => true,
        }
    }

    /// Whether a prediction's label takes part in the evaluation at all.
    pub fn is_label_wanted(&self, label: &str) -> bool {
        match &self.wanted_labels {
            Some(labels) => labels.iter().any(|wanted| wanted == label),
            None => true,
        }
    }

    /// A prediction is accepted when its label is wanted and its score clears the threshold.
    pub fn is_accepted(&self, prediction: &BvrPrediction) -> bool {
        self.is_label_wanted(&prediction.label) && self.is_confident(prediction)
    }

    /// Rejects thresholds outside `[0, 1]` and an empty annotation suffix.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(ValidationError::InvalidConfig(format!(
                "iou_threshold must be within [0, 1], got {}", self.iou_threshold
            )).into());
        }
        if let Some(conf) = self.confidence_threshold {
            if !(0.0..=1.0).contains(&conf) {
                return Err(ValidationError::InvalidConfig(format!(
                    "confidence_threshold must be within [0, 1], got {}", conf
                )).into());
            }
        }
        if self.annotation_suffix.is_empty() {
            return Err(ValidationError::InvalidConfig(
                "annotation_suffix must not be empty".to_string()
            ).into());
        }
        Ok(())
    }

    pub fn to_string(&self) -> String {
        let confidence = match self.confidence_threshold {
            Some(conf) => format!("{}", conf),
            None => "none".to_string(),
        };
        let labels = match &self.wanted_labels {
            Some(labels) => labels.join(", "),
            None => "all".to_string(),
        };
        format!("IoU Threshold: {}\n\
        Confidence Threshold: {}\n\
        Unsure Objects: {}\n\
        Labels: {}\n\
        Annotation Suffix: {}\n\
        Parallel: {}",
                self.iou_threshold, confidence, self.unsure_policy,
                labels, self.annotation_suffix, self.parallel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::BvrBox;

    #[test]
    fn defaults_accept_everything() {
        let config = ValidatorConfig::new();
        let pred = BvrPrediction::new("dog", 0.01, BvrBox::default());
        assert!(config.is_accepted(&pred));
        assert!(config.validate().is_ok());
        assert_eq!(config.iou_threshold, 0.5);
        assert_eq!(config.annotation_suffix, "_auto_annots");
    }

    #[test]
    fn threshold_and_label_gate_predictions() {
        let config = ValidatorConfig::new()
            .with_confidence_threshold(0.3)
            .with_wanted_labels(&["person"]);
        assert!(config.is_accepted(&BvrPrediction::new("person", 0.3, BvrBox::default())));
        assert!(!config.is_accepted(&BvrPrediction::new("person", 0.29, BvrBox::default())));
        assert!(!config.is_accepted(&BvrPrediction::new("car", 0.9, BvrBox::default())));
        assert!(config.without_confidence_threshold().confidence_threshold.is_none());
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let err = ValidatorConfig::new().with_iou_threshold(1.5).validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidConfig(_))
        ));
        assert!(ValidatorConfig::new().with_confidence_threshold(-0.1).validate().is_err());
        assert!(ValidatorConfig::new().with_annotation_suffix("").validate().is_err());
    }

    #[test]
    fn summary_lists_every_option() {
        let summary = ValidatorConfig::new()
            .with_unsure_policy(UnsurePolicy::Ignore)
            .with_parallel(true)
            .to_string();
        assert!(summary.contains("Confidence Threshold: none"));
        assert!(summary.contains("Unsure Objects: Ignore"));
        assert!(summary.contains("Parallel: true"));
    }
}
