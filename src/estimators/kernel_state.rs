use crate::core::{StepRecord, StreamSummary};
use crate::estimators::normalization::Normalization;
use std::collections::BTreeMap;

/// Online state shared by every normalization strategy.
///
/// Holds the degree class of each node, the population of each class and the
/// raw kernel accumulator `A[k]`. The state only ever grows: node and class
/// arrays are extended on demand and nothing is released before the run ends.
#[derive(Debug, Default, Clone)]
pub struct KernelState {
    steps: u64,
    nodes: u64,
    edges: u64,
    degrees: Vec<u32>,
    population: Vec<u64>,
    kernel: Vec<f64>,
}

impl KernelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one time step.
    ///
    /// Kernel credits use the populations and node count from the start of the
    /// step; classes and populations are moved forward only afterwards.
    pub fn process_step<W: Normalization>(&mut self, record: &StepRecord, normalization: &mut W) {
        self.steps += 1;
        let step = self.steps;
        let volume = record.volume();
        self.edges += volume;

        let selected = record.distinct_nodes();

        let mut tally: BTreeMap<usize, u64> = BTreeMap::new();
        for &id in &selected {
            *tally.entry(self.class_slot(id)).or_insert(0) += 1;
        }

        let mut entering = 0;
        for &id in &selected {
            let class = self.degrees[id as usize] as usize;
            if class == 0 {
                entering += 1;
            } else {
                let count = tally[&class] as f64;
                self.kernel[class] += count * self.nodes as f64 / self.population[class] as f64;
            }
        }
        self.nodes += entering;

        for &id in &selected {
            let degree = &mut self.degrees[id as usize];
            *degree += 1;
            let class = *degree as usize;
            if class >= self.population.len() {
                let len = class + 2;
                self.population.resize(len, 0);
                self.kernel.resize(len, 0.0);
                normalization.resize(len);
            }
        }

        normalization.observe_step(step, volume, &self.population);

        for (&class, &count) in &tally {
            if class > 0 {
                self.population[class] -= count;
                if self.population[class] == 0 {
                    normalization.class_deactivated(class, step);
                }
            }
            if self.population[class + 1] == 0 {
                normalization.class_activated(class + 1, step);
            }
            self.population[class + 1] += count;
        }
    }

    /// Class of `id`, extending the node table with class 0 for unseen ids.
    fn class_slot(&mut self, id: u64) -> usize {
        let idx = id as usize;
        if idx >= self.degrees.len() {
            self.degrees.resize(idx + 1, 0);
        }
        self.degrees[idx] as usize
    }

    pub fn summary(&self) -> StreamSummary {
        StreamSummary {
            steps: self.steps,
            nodes: self.nodes,
            edges: self.edges,
            classes: self.kernel.len(),
        }
    }

    /// Raw kernel accumulator `A[k]`.
    pub fn kernel(&self) -> &[f64] {
        &self.kernel
    }

    /// Current population `n[k]` of every class. Class 0 is never tracked.
    pub fn population(&self) -> &[u64] {
        &self.population
    }

    /// Current degree class of node `id`; unseen nodes are in class 0.
    pub fn degree_of(&self, id: u64) -> usize {
        self.degrees.get(id as usize).map_or(0, |&d| d as usize)
    }
}
