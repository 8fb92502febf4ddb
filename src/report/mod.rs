mod kernel_report;
mod number_format;
mod progress;

pub use kernel_report::{KernelReport, KernelRow, ReportFormat, write_summary_header};
pub use number_format::format_general;
pub use progress::Progress;
