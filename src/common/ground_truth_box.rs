use serde::{Deserialize, Serialize};
use crate::common::BvrBox;

/// An annotated object instance for one frame.
///
/// `unsure` records whether the annotator marked the object with the "unsure" tag; how those
/// boxes are scored is decided by [`UnsurePolicy`](crate::common::UnsurePolicy).
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthBox {
    pub bbox: BvrBox,
    #[serde(default)]
    pub unsure: bool,
}

impl GroundTruthBox {
    pub fn new(bbox: BvrBox, unsure: bool) -> Self {
        Self { bbox, unsure }
    }

    pub fn sure(bbox: BvrBox) -> Self {
        Self::new(bbox, false)
    }

    pub fn unsure(bbox: BvrBox) -> Self {
        Self::new(bbox, true)
    }
}

impl From<BvrBox> for GroundTruthBox {
    fn from(bbox: BvrBox) -> Self {
        Self::sure(bbox)
    }
}
