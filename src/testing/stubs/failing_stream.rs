use crate::core::StepRecord;
use crate::error::EstimateError;
use crate::streams::EventStream;

/// Yields `good` single-node steps, then a malformed record.
pub struct FailingStream {
    good: usize,
    produced: usize,
    failed: bool,
}

impl FailingStream {
    pub fn new(good: usize) -> Self {
        Self {
            good,
            produced: 0,
            failed: false,
        }
    }
}

impl EventStream for FailingStream {
    fn has_more_steps(&self) -> bool {
        !self.failed
    }

    fn next_step(&mut self) -> Option<Result<StepRecord, EstimateError>> {
        if self.failed {
            return None;
        }
        if self.produced < self.good {
            self.produced += 1;
            return Some(Ok(StepRecord::new(vec![self.produced as u64])));
        }
        self.failed = true;
        Some(Err(EstimateError::MalformedRecord {
            line: self.produced + 1,
            fields: 0,
            column: 0,
        }))
    }

    fn restart(&mut self) -> Result<(), EstimateError> {
        self.produced = 0;
        self.failed = false;
        Ok(())
    }
}
