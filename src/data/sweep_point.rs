use serde::{Deserialize, Serialize};
use crate::data::ValidationState;

/// Metrics of one confidence threshold in a sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub threshold: f32,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_count: usize,
}

impl SweepPoint {
    pub fn from_state(threshold: f32, state: &ValidationState) -> Self {
        Self {
            threshold,
            precision: state.precision(),
            recall: state.recall(),
            f1: state.f1(),
            tp: state.tp,
            fp: state.fp,
            fn_count: state.fn_count,
        }
    }
}
