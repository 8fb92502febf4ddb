use crate::core::StepRecord;
use crate::error::EstimateError;
use crate::streams::EventStream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::iter;

/// Synthetic growing network with a known attachment kernel `A(k) = k^alpha`.
///
/// The first step joins nodes `0` and `1`. Every later step adds one new node
/// that attaches to `edges_per_step` distinct existing nodes, each drawn with
/// probability proportional to `degree^alpha`. The record of a step lists the
/// new node followed by its targets.
#[derive(Debug)]
pub struct PreferentialAttachmentGenerator {
    seed: u64,
    rng: StdRng,
    alpha: f64,
    edges_per_step: usize,
    max_steps: Option<u64>,
    produced: u64,
    degrees: Vec<u64>,
}

impl PreferentialAttachmentGenerator {
    pub fn new(
        alpha: f64,
        edges_per_step: usize,
        max_steps: Option<u64>,
        seed: u64,
    ) -> Result<Self, EstimateError> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(EstimateError::InvalidParameter(format!(
                "alpha must be a finite non-negative number, got {alpha}"
            )));
        }
        if edges_per_step == 0 {
            return Err(EstimateError::InvalidParameter(
                "edges_per_step must be > 0".into(),
            ));
        }
        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            alpha,
            edges_per_step,
            max_steps,
            produced: 0,
            degrees: Vec::new(),
        })
    }

    /// Number of nodes generated so far.
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    fn pick_targets(&mut self) -> Vec<u64> {
        // `k^alpha` overflows for large alpha, so draws work on `alpha * ln k`
        // shifted by the largest remaining value before exponentiating
        let mut log_weights: Vec<f64> = self
            .degrees
            .iter()
            .map(|&k| self.alpha * (k as f64).ln())
            .collect();
        let picks = self.edges_per_step.min(log_weights.len());

        let mut chosen = Vec::with_capacity(picks);
        for _ in 0..picks {
            let top = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if top == f64::NEG_INFINITY {
                break;
            }
            let weights: Vec<f64> = log_weights.iter().map(|&l| (l - top).exp()).collect();
            let total: f64 = weights.iter().sum();

            let mut roll = self.rng.random_range(0.0..total);
            // rounding can leave `roll` past the last bucket
            let mut idx = weights.iter().rposition(|&w| w > 0.0).unwrap_or(0);
            for (i, &w) in weights.iter().enumerate() {
                if roll < w {
                    idx = i;
                    break;
                }
                roll -= w;
            }
            chosen.push(idx as u64);
            log_weights[idx] = f64::NEG_INFINITY;
        }
        chosen
    }
}

impl EventStream for PreferentialAttachmentGenerator {
    fn has_more_steps(&self) -> bool {
        self.max_steps.map_or(true, |max| self.produced < max)
    }

    fn next_step(&mut self) -> Option<Result<StepRecord, EstimateError>> {
        if !self.has_more_steps() {
            return None;
        }

        let nodes: Vec<u64> = if self.degrees.is_empty() {
            vec![0, 1]
        } else {
            let newcomer = self.degrees.len() as u64;
            let targets = self.pick_targets();
            iter::once(newcomer).chain(targets).collect()
        };

        for &id in &nodes {
            let idx = id as usize;
            if idx >= self.degrees.len() {
                self.degrees.resize(idx + 1, 0);
            }
            self.degrees[idx] += 1;
        }
        self.produced += 1;
        Some(Ok(StepRecord::new(nodes)))
    }

    fn restart(&mut self) -> Result<(), EstimateError> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        self.degrees.clear();
        Ok(())
    }
}
