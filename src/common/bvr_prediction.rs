use serde::{Deserialize, Serialize};
use crate::common::BvrBox;

/// One scored box emitted by the detector for a single frame.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct BvrPrediction {
    #[serde(default)]
    pub label: String,
    pub confidence: f32,
    pub bbox: BvrBox,
}

impl BvrPrediction {
    pub fn new(label: &str, confidence: f32, bbox: BvrBox) -> Self {
        Self {
            label: label.to_string(),
            confidence,
            bbox,
        }
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)`.
    ///
    /// # Arguments
    ///
    /// * `x1` - The x-coordinate of the top-left corner.
    /// * `y1` - The y-coordinate of the top-left corner.
    /// * `x2` - The x-coordinate of the bottom-right corner.
    /// * `y2` - The y-coordinate of the bottom-right corner.
    ///
    /// # Returns
    ///
    /// A `BvrPrediction` instance with updated coordinates.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = BvrBox::default().with_x1y1_x2y2(x1, y1, x2, y2);
        self
    }

    /// Sets the confidence score of the prediction.
    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }

    /// Sets the class label of the prediction.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn get_label(&self) -> &str {
        if self.label.is_empty() {
            "Unknown"
        } else {
            self.label.as_str()
        }
    }

    /// Computes the IoU between this prediction's box and `other`.
    pub fn iou(&self, other: &BvrBox) -> f32 {
        self.bbox.iou(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_detector_record() {
        let json = r#"{"label": "person", "confidence": 0.87, "bbox": [12, 40, 96, 230]}"#;
        let pred: BvrPrediction = serde_json::from_str(json).unwrap();
        assert_eq!(pred.get_label(), "person");
        assert!((pred.confidence - 0.87).abs() < 1e-6);
        assert_eq!(pred.bbox, BvrBox::new(12., 40., 96., 230.));
    }

    #[test]
    fn missing_label_falls_back_to_unknown() {
        let pred: BvrPrediction = serde_json::from_str(r#"{"confidence": 0.5, "bbox": [0, 0, 1, 1]}"#).unwrap();
        assert_eq!(pred.get_label(), "Unknown");
    }

    #[test]
    fn builder_sets_fields() {
        let pred = BvrPrediction::default()
            .with_label("train")
            .with_confidence(0.4)
            .with_x1y1_x2y2(1., 2., 3., 4.);
        assert_eq!(pred.label, "train");
        assert_eq!(pred.confidence, 0.4);
        assert_eq!(pred.iou(&BvrBox::new(1., 2., 3., 4.)), pred.bbox.iou(&pred.bbox));
    }
}
