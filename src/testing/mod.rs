pub mod dummies;
pub mod stubs;

pub use dummies::{THREE_LINE_TSV, three_line_steps};
pub use stubs::{FailingStream, VecEventStream};
