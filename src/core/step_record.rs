/// One time step of the edge stream: every listed node gains one edge.
///
/// The list is a multiset. Each occurrence counts toward the step's edge
/// volume, while a node listed twice still advances by a single degree class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepRecord {
    pub nodes: Vec<u64>,
}

impl StepRecord {
    pub fn new(nodes: Vec<u64>) -> StepRecord {
        StepRecord { nodes }
    }

    /// Number of edge endpoints introduced at this step.
    #[inline]
    pub fn volume(&self) -> u64 {
        self.nodes.len() as u64
    }

    /// Selected node ids with duplicates removed, in ascending order.
    pub fn distinct_nodes(&self) -> Vec<u64> {
        let mut ids = self.nodes.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl From<Vec<u64>> for StepRecord {
    fn from(nodes: Vec<u64>) -> Self {
        StepRecord::new(nodes)
    }
}
