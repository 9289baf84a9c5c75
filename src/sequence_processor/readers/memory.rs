use crate::error::QcResult;
use crate::sequence_processor::core::{Read, RecordSource};

/// Reads already held in memory, yielded in insertion order.
pub struct MemorySource {
    name: String,
    reads: std::vec::IntoIter<Read>,
}

impl MemorySource {
    pub fn new(reads: impl IntoIterator<Item = Read>) -> Self {
        Self {
            name: "<memory>".to_string(),
            reads: reads.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl RecordSource for MemorySource {
    fn read_next(&mut self) -> QcResult<Option<Read>> {
        Ok(self.reads.next())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
