pub mod failing_stream;
pub mod vec_stream;

pub use failing_stream::FailingStream;
pub use vec_stream::VecEventStream;
