mod frame_source;
mod memory_source;
mod dataset_source;
mod frame_matcher;
mod metrics;
mod validator;
mod threshold_sweep;

pub use frame_source::*;
pub use memory_source::*;
pub use dataset_source::*;
pub use frame_matcher::*;
pub use metrics::*;
pub use validator::*;
pub use threshold_sweep::*;
