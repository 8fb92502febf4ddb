pub mod core;
pub mod error;
pub mod estimators;
pub mod params;
pub mod report;
pub mod streams;
pub mod tasks;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::EstimateError;
