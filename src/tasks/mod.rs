mod kernel_estimation;

pub use kernel_estimation::KernelEstimation;
