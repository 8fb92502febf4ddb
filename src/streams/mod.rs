pub mod generators;
pub mod stream;
pub mod tsv;

pub use stream::EventStream;
pub use tsv::TsvEventStream;
