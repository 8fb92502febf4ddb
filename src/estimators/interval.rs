use crate::estimators::estimator::AttachmentEstimator;
use crate::estimators::normalization::Normalization;

/// Kernel estimator that only records activity switches and rebuilds the
/// exposure weights once the stream has ended.
pub type IntervalEstimator = AttachmentEstimator<IntervalNormalization>;

/// Run-length encoding of every class's "has members" signal.
///
/// `switches[k]` alternates activation and deactivation steps,
/// `[t_a, t_i, t_a, t_i, ...]`, and ends on an activation when the class is
/// still populated. `edge_history[t]` is the edge volume of step `t + 1`, so
/// an active interval `[t_a, t_i)` covers steps `t_a + 1 ..= t_i`.
#[derive(Debug, Default, Clone)]
pub struct IntervalNormalization {
    switches: Vec<Vec<u64>>,
    edge_history: Vec<u64>,
}

impl IntervalNormalization {
    /// Recorded switch steps of `class`.
    pub fn switch_history(&self, class: usize) -> &[u64] {
        self.switches.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    fn exposure(&self, from: u64, to: u64) -> f64 {
        self.edge_history[from as usize..to as usize]
            .iter()
            .sum::<u64>() as f64
    }
}

impl Normalization for IntervalNormalization {
    fn resize(&mut self, len: usize) {
        self.switches.resize_with(len, Vec::new);
    }

    fn observe_step(&mut self, _step: u64, volume: u64, _population: &[u64]) {
        self.edge_history.push(volume);
    }

    fn class_deactivated(&mut self, class: usize, step: u64) {
        self.switches[class].push(step);
    }

    fn class_activated(&mut self, class: usize, step: u64) {
        self.switches[class].push(step);
    }

    fn weights(&self, steps: u64) -> Vec<f64> {
        self.switches
            .iter()
            .map(|history| {
                history
                    .chunks(2)
                    .map(|period| {
                        // an unmatched activation stays open until the last step
                        let until = period.get(1).copied().unwrap_or(steps);
                        self.exposure(period[0], until)
                    })
                    .sum()
            })
            .collect()
    }
}
