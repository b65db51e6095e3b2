use serde::{Deserialize, Serialize};

/// Added to the IoU denominator so two degenerate boxes never divide by zero.
pub const IOU_EPSILON: f32 = 1e-6;

/// Axis-aligned box in pixel coordinates, stored as `(x1, y1, x2, y2)`.
///
/// Serialized as a plain `[x1, y1, x2, y2]` array, which is how the detector writes `bbox`.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BvrBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl From<[f32; 4]> for BvrBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BvrBox> for [f32; 4] {
    fn from(bbox: BvrBox) -> Self {
        [bbox.x1, bbox.y1, bbox.x2, bbox.y2]
    }
}

impl BvrBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Returns the bounding box coordinates as `(x1, y1, x2, y2)`.
    pub fn xy1_xy2(&self) -> (f32, f32, f32, f32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Computes the area of the bounding box.
    ///
    /// Inverted boxes report their signed area, the same as the detector's raw output would.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// True when the box has no positive extent along either axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0. || self.height() <= 0.
    }

    /// Computes the intersection area between this bounding box and another.
    pub fn intersect(&self, other: &BvrBox) -> f32 {
        let left = self.x1.max(other.x1);
        let top = self.y1.max(other.y1);
        let right = self.x2.min(other.x2);
        let bottom = self.y2.min(other.y2);
        (right - left).max(0.) * (bottom - top).max(0.)
    }

    /// Computes the union area between this bounding box and another.
    pub fn union(&self, other: &BvrBox) -> f32 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Computes the intersection over union (IoU) between this bounding box and another.
    ///
    /// The denominator carries [`IOU_EPSILON`], so degenerate input yields `0.0` instead of NaN.
    pub fn iou(&self, other: &BvrBox) -> f32 {
        self.intersect(other) / (self.union(other) + IOU_EPSILON)
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)`.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Sets the bounding box's coordinates using the top-left corner and a size `(x, y, w, h)`.
    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
        self
    }
}

/// Free-function form of [`BvrBox::iou`].
pub fn iou(a: &BvrBox, b: &BvrBox) -> f32 {
    a.iou(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_boxes_have_unit_iou() {
        let a = BvrBox::new(0., 0., 10., 10.);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn iou_is_symmetric() {
        let a = BvrBox::new(0., 0., 10., 10.);
        let b = BvrBox::new(5., 3., 17., 12.);
        assert_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn disjoint_and_touching_boxes_have_zero_iou() {
        let a = BvrBox::new(0., 0., 10., 10.);
        assert_eq!(iou(&a, &BvrBox::new(20., 20., 30., 30.)), 0.0);
        // Shared edge, zero-area overlap.
        assert_eq!(iou(&a, &BvrBox::new(10., 0., 20., 10.)), 0.0);
    }

    #[test]
    fn half_overlap() {
        let a = BvrBox::new(0., 0., 10., 10.);
        let b = BvrBox::new(5., 0., 15., 10.);
        // 50 / (100 + 100 - 50)
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_boxes_do_not_produce_nan() {
        let point = BvrBox::new(3., 3., 3., 3.);
        assert!(point.is_degenerate());
        let value = point.iou(&point);
        assert!(value.is_finite());
        assert_eq!(value, 0.0);
        assert_eq!(point.iou(&BvrBox::new(0., 0., 10., 10.)), 0.0);
    }

    #[test]
    fn serializes_as_coordinate_array() {
        let bbox = BvrBox::default().with_x1y1_wh(1., 2., 3., 4.);
        assert_eq!(bbox.xy1_xy2(), (1., 2., 4., 6.));
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[1.0,2.0,4.0,6.0]");
        let parsed: BvrBox = serde_json::from_str("[10, 20, 30, 40]").unwrap();
        assert_eq!(parsed, BvrBox::new(10., 20., 30., 40.));
    }
}
