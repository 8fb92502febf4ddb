use crate::core::StepRecord;
use crate::error::EstimateError;

/// Pull-based source of time-ordered [`StepRecord`]s.
///
/// Every record handed out is one time step; sources filter out anything
/// that is not a step (blank or comment lines) before yielding.
pub trait EventStream {
    /// Indicates whether the stream *may* produce more steps.
    ///
    /// Finite sources return `false` once exhausted. Line-oriented sources
    /// cannot know in advance and keep returning `true` until a read hits the
    /// end of input.
    fn has_more_steps(&self) -> bool;

    /// Produces the next step, `None` at end of stream.
    ///
    /// A malformed record is returned as an error and is never skipped: the
    /// caller decides whether to stop, since dropping it would shift every
    /// counter of the estimation.
    fn next_step(&mut self) -> Option<Result<StepRecord, EstimateError>>;

    /// Rewinds the stream to its first step.
    ///
    /// Fails for sources that cannot be re-read, such as standard input.
    fn restart(&mut self) -> Result<(), EstimateError>;
}
