use crate::core::StreamSummary;
use std::fmt::{Display, Formatter, Result};

/// Point-in-time view of a running estimation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Progress {
    pub summary: StreamSummary,
    pub seconds: f64,
}

impl Display for Progress {
    /// `<steps> (<class-array size>)`, the classic progress line.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({})", self.summary.steps, self.summary.classes)
    }
}
