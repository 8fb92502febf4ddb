mod estimation_params;

pub use estimation_params::{DEFAULT_PROGRESS_FREQUENCY, EstimationParams};
