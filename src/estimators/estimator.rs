use crate::core::{StepRecord, StreamSummary};
use crate::error::EstimateError;
use crate::estimators::interval::IntervalNormalization;
use crate::estimators::kernel_state::KernelState;
use crate::estimators::naive::NaiveNormalization;
use crate::estimators::normalization::Normalization;
use crate::report::KernelReport;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Single-pass estimator of the attachment kernel `A(k)`.
///
/// Records must be fed strictly in time order. [`finalize`] can be called at
/// any point and does not consume or alter the accumulated state.
///
/// [`finalize`]: KernelEstimator::finalize
pub trait KernelEstimator {
    /// Consumes the next time step of the stream.
    fn process_step(&mut self, record: &StepRecord);

    /// Counters `T`, `N`, `E` and the class-array size.
    fn summary(&self) -> StreamSummary;

    /// Raw kernel accumulator `A[k]`, indexed by degree class.
    fn kernel(&self) -> &[f64];

    /// Exposure weight `w[k]`, indexed by degree class.
    fn weights(&self) -> Vec<f64>;

    /// Builds the corrected and uncorrected kernel table.
    fn finalize(&self) -> Result<KernelReport, EstimateError> {
        KernelReport::from_accumulators(self.summary(), self.kernel(), &self.weights())
    }
}

/// How the exposure weights are computed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumString,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// Rescan every class at every step.
    Naive,
    /// Record activity switches and rebuild the weights after the stream.
    #[default]
    Fast,
}

/// Kernel estimator parameterized by its normalization strategy.
#[derive(Debug, Default, Clone)]
pub struct AttachmentEstimator<W: Normalization> {
    state: KernelState,
    normalization: W,
}

impl<W: Normalization + Default> AttachmentEstimator<W> {
    pub fn new() -> Self {
        Self {
            state: KernelState::new(),
            normalization: W::default(),
        }
    }
}

impl<W: Normalization> AttachmentEstimator<W> {
    pub fn state(&self) -> &KernelState {
        &self.state
    }

    pub fn normalization(&self) -> &W {
        &self.normalization
    }

    pub fn degree_of(&self, id: u64) -> usize {
        self.state.degree_of(id)
    }

    pub fn population(&self) -> &[u64] {
        self.state.population()
    }
}

impl<W: Normalization> KernelEstimator for AttachmentEstimator<W> {
    fn process_step(&mut self, record: &StepRecord) {
        self.state.process_step(record, &mut self.normalization);
    }

    fn summary(&self) -> StreamSummary {
        self.state.summary()
    }

    fn kernel(&self) -> &[f64] {
        self.state.kernel()
    }

    fn weights(&self) -> Vec<f64> {
        self.normalization.weights(self.state.summary().steps)
    }
}

pub fn build_estimator(strategy: Strategy) -> Box<dyn KernelEstimator> {
    match strategy {
        Strategy::Naive => Box::new(AttachmentEstimator::<NaiveNormalization>::new()),
        Strategy::Fast => Box::new(AttachmentEstimator::<IntervalNormalization>::new()),
    }
}
