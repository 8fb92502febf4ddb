/// Strategy for computing the per-class exposure weight `w[k]`.
///
/// [`KernelState`](super::KernelState) drives the hooks during each step:
/// [`resize`] whenever the class arrays grow, [`observe_step`] once the
/// classes of the selected nodes have advanced but before populations
/// migrate, and the activation hooks while populations migrate.
///
/// [`resize`]: Normalization::resize
/// [`observe_step`]: Normalization::observe_step
pub trait Normalization {
    /// Grows the class-indexed storage to `len` entries.
    fn resize(&mut self, len: usize);

    /// Called once per step with the class populations as they were at the
    /// start of the step.
    fn observe_step(&mut self, step: u64, volume: u64, population: &[u64]);

    /// Class `class` lost its last member at `step`.
    fn class_deactivated(&mut self, _class: usize, _step: u64) {}

    /// Class `class` gained its first member at `step`.
    fn class_activated(&mut self, _class: usize, _step: u64) {}

    /// Exposure weight of every class after `steps` steps.
    fn weights(&self, steps: u64) -> Vec<f64>;
}
