use crate::core::StepRecord;
use crate::error::EstimateError;
use crate::streams::EventStream;

pub struct VecEventStream {
    pub steps: Vec<Vec<u64>>,
    idx: usize,
}

impl VecEventStream {
    pub fn new(steps: Vec<Vec<u64>>) -> Self {
        Self { steps, idx: 0 }
    }
}

impl EventStream for VecEventStream {
    fn has_more_steps(&self) -> bool {
        self.idx < self.steps.len()
    }

    fn next_step(&mut self) -> Option<Result<StepRecord, EstimateError>> {
        if !self.has_more_steps() {
            return None;
        }

        let nodes = self.steps[self.idx].clone();
        self.idx += 1;
        Some(Ok(StepRecord::new(nodes)))
    }

    fn restart(&mut self) -> Result<(), EstimateError> {
        self.idx = 0;
        Ok(())
    }
}
