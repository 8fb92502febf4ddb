use crate::core::StreamSummary;
use crate::error::EstimateError;
use crate::estimators::KernelEstimator;
use crate::report::{KernelReport, Progress};
use crate::streams::EventStream;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives an [`EventStream`] through a [`KernelEstimator`] in one pass.
pub struct KernelEstimation {
    estimator: Box<dyn KernelEstimator>,
    stream: Box<dyn EventStream>,

    max_steps: Option<u64>,
    progress_frequency: u64,

    processed: u64,
    start_time: Instant,
    snapshots: Vec<Progress>,

    progress_tx: Option<Sender<Progress>>,
}

impl KernelEstimation {
    pub fn new(
        estimator: Box<dyn KernelEstimator>,
        stream: Box<dyn EventStream>,
        max_steps: Option<u64>,
        progress_frequency: u64,
    ) -> Result<Self, EstimateError> {
        if progress_frequency == 0 {
            return Err(EstimateError::InvalidParameter(
                "progress_frequency must be > 0".into(),
            ));
        }

        Ok(Self {
            estimator,
            stream,
            max_steps,
            progress_frequency,
            processed: 0,
            start_time: Instant::now(),
            snapshots: Vec::new(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<Progress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Consumes the stream until it ends, `max_steps` is reached or a record
    /// fails to parse.
    ///
    /// A failing record aborts the run; steps already applied stay applied.
    pub fn run(&mut self) -> Result<StreamSummary, EstimateError> {
        self.start_time = Instant::now();

        while self.stream.has_more_steps() {
            if let Some(n) = self.max_steps {
                if self.processed >= n {
                    debug!(max_steps = n, "step limit reached");
                    break;
                }
            }
            let Some(record) = self.stream.next_step() else {
                break;
            };
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!(steps = self.processed, error = %e, "aborting on bad record");
                    return Err(e);
                }
            };

            self.estimator.process_step(&record);
            self.processed += 1;

            if self.processed % self.progress_frequency == 0 {
                let snapshot = self.push_snapshot();
                info!("{snapshot}");
            }
        }

        let current = self.estimator.summary();
        let last = match self.snapshots.last() {
            Some(p) if p.summary == current => *p,
            _ => self.push_snapshot(),
        };
        debug!(
            steps = last.summary.steps,
            nodes = last.summary.nodes,
            edges = last.summary.edges,
            seconds = last.seconds,
            "stream consumed"
        );
        Ok(last.summary)
    }

    /// Kernel table for everything consumed so far.
    pub fn report(&self) -> Result<KernelReport, EstimateError> {
        self.estimator.finalize()
    }

    pub fn summary(&self) -> StreamSummary {
        self.estimator.summary()
    }

    pub fn snapshots(&self) -> &[Progress] {
        &self.snapshots
    }

    fn push_snapshot(&mut self) -> Progress {
        let snapshot = Progress {
            summary: self.estimator.summary(),
            seconds: self.start_time.elapsed().as_secs_f64(),
        };

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot);
        }

        self.snapshots.push(snapshot);
        snapshot
    }
}
