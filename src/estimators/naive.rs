use crate::estimators::estimator::AttachmentEstimator;
use crate::estimators::normalization::Normalization;

/// Kernel estimator that rescans every class at every step.
pub type NaiveEstimator = AttachmentEstimator<NaiveNormalization>;

/// Accumulates `w[k]` online: each step adds its edge volume to every class
/// that is populated at the start of the step.
///
/// Costs O(classes seen) per step, which becomes the bottleneck once the
/// number of classes grows with time.
#[derive(Debug, Default, Clone)]
pub struct NaiveNormalization {
    weights: Vec<f64>,
}

impl Normalization for NaiveNormalization {
    fn resize(&mut self, len: usize) {
        self.weights.resize(len, 0.0);
    }

    fn observe_step(&mut self, _step: u64, volume: u64, population: &[u64]) {
        let volume = volume as f64;
        for (w, &n) in self.weights.iter_mut().zip(population) {
            if n > 0 {
                *w += volume;
            }
        }
    }

    fn weights(&self, _steps: u64) -> Vec<f64> {
        self.weights.clone()
    }
}
