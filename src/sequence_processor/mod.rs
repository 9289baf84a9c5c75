pub mod core;
pub mod readers;

// Re-export commonly used items
pub use core::{OpenSource, ProcessingStats, Read, RecordSource, SourceOptions};
pub use readers::{open_source, FastqSource, MemorySource, SourceFormat};
