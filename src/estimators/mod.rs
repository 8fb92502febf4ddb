mod estimator;
mod interval;
mod kernel_state;
mod naive;
mod normalization;

pub use estimator::{AttachmentEstimator, KernelEstimator, Strategy, build_estimator};
pub use interval::{IntervalEstimator, IntervalNormalization};
pub use kernel_state::KernelState;
pub use naive::{NaiveEstimator, NaiveNormalization};
pub use normalization::Normalization;
