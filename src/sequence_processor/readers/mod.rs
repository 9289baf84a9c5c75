mod fastq;
mod memory;

pub use fastq::FastqSource;
pub use memory::MemorySource;

use crate::error::QcResult;
use crate::sequence_processor::core::{OpenSource, RecordSource, SourceOptions};
use std::path::Path;
use tracing::warn;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

const COMPRESSED_SUFFIXES: [&str; 5] = [".gz", ".bgz", ".bz2", ".xz", ".zst"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Fastq,
    Stdin,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Self {
        if path.as_os_str() == STDIN_PATH {
            return SourceFormat::Stdin;
        }
        if !has_fastq_extension(path) {
            warn!(
                path = %path.display(),
                "unrecognised extension, reading as FASTQ"
            );
        }
        SourceFormat::Fastq
    }

    pub fn open(self, path: &Path, options: &SourceOptions) -> QcResult<Box<dyn RecordSource>> {
        match self {
            SourceFormat::Fastq => Ok(Box::new(FastqSource::open(path, options)?)),
            SourceFormat::Stdin => Ok(Box::new(FastqSource::stdin(options)?)),
        }
    }
}

/// Opens the source matching `path`, or standard input for `-`.
pub fn open_source(path: &Path, options: &SourceOptions) -> QcResult<Box<dyn RecordSource>> {
    SourceFormat::detect(path).open(path, options)
}

fn has_fastq_extension(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let stem = COMPRESSED_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name.as_str());

    stem.ends_with(".fastq") || stem.ends_with(".fq")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(SourceFormat::detect(Path::new("-")), SourceFormat::Stdin);
        assert_eq!(SourceFormat::detect(Path::new("reads.fq.gz")), SourceFormat::Fastq);
        assert_eq!(SourceFormat::detect(Path::new("reads.txt")), SourceFormat::Fastq);
    }

    #[test]
    fn test_fastq_extensions() {
        assert!(has_fastq_extension(Path::new("a.fastq")));
        assert!(has_fastq_extension(Path::new("dir/a.FQ")));
        assert!(has_fastq_extension(Path::new("a.fastq.gz")));
        assert!(has_fastq_extension(Path::new("a.fq.zst")));
        assert!(!has_fastq_extension(Path::new("a.bam")));
        assert!(!has_fastq_extension(Path::new("a.gz")));
    }
}
