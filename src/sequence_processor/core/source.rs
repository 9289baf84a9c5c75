use super::read::Read;
use crate::error::QcResult;
use std::path::Path;

/// Decoding options shared by every file-backed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// ASCII offset subtracted from encoded quality characters.
    pub phred_offset: u8,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { phred_offset: 33 }
    }
}

/// A finite, single-pass stream of reads.
///
/// `Ok(None)` marks the end of the stream. Sources are not restartable.
pub trait RecordSource {
    fn read_next(&mut self) -> QcResult<Option<Read>>;

    /// Human-readable origin, used in reports and error messages.
    fn name(&self) -> &str;
}

/// Sources that can be opened from a filesystem path.
pub trait OpenSource: RecordSource + Sized {
    fn open(path: &Path, options: &SourceOptions) -> QcResult<Self>;
}
