pub(crate) mod read;
pub(crate) mod source;
pub(crate) mod stats;

pub use read::Read;
pub use source::{OpenSource, RecordSource, SourceOptions};
pub use stats::ProcessingStats;
