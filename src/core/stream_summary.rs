use serde::{Deserialize, Serialize};

/// Summary counters of a (possibly still running) estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Steps consumed so far (`T`).
    pub steps: u64,
    /// Nodes that ever left class 0 (`N`).
    pub nodes: u64,
    /// Edge endpoints processed (`E`).
    pub edges: u64,
    /// Current length of the class-indexed arrays.
    pub classes: usize,
}
