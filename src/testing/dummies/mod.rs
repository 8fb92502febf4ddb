mod streams;

pub use streams::{THREE_LINE_TSV, three_line_steps};
