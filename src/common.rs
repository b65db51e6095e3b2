mod bvr_box;
mod bvr_prediction;
mod config_file;
mod ground_truth_box;
mod unsure_policy;
mod validator_config;

pub use bvr_box::*;
pub use bvr_prediction::*;
pub use config_file::{default_config_path, CONFIG_ENV_VAR};
pub use ground_truth_box::*;
pub use unsure_policy::*;
pub use validator_config::*;
