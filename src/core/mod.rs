mod step_record;
mod stream_summary;

pub use step_record::StepRecord;
pub use stream_summary::StreamSummary;
