mod annotation_xml;
mod prediction_json;

pub use annotation_xml::{parse_annotation, parse_annotation_str, OBJECT_TAG, UNSURE_OBJECT_TAG};
pub use prediction_json::{load_predictions, parse_predictions_str, save_predictions, PredictionRecord};
