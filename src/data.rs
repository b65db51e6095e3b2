mod filesystem_access;
mod frame_result;
mod sweep_point;
mod time_calc;
mod validation_report;
mod validation_state;

pub use filesystem_access::FsAccess;
pub use frame_result::FrameResult;
pub use sweep_point::SweepPoint;
pub use time_calc::TimeCalc;
pub use validation_report::ValidationReport;
pub use validation_state::ValidationState;
