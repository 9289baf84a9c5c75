use crate::error::{QcError, QcResult};
use crate::sequence_processor::core::{OpenSource, Read, RecordSource, SourceOptions};
use niffler::get_reader;
use seq_io::fastq::{self, Record, RefRecord};
use std::fs::File;
use std::io;
use std::io::Read as _;
use std::path::Path;
use tracing::debug;

/// Bytes niffler needs to recognise a compression format.
const SNIFF_LEN: usize = 5;

type FastqReader = fastq::Reader<Box<dyn io::Read>>;

/// FASTQ records from a file or stream, plain or compressed.
///
/// Compression is sniffed from the leading bytes, so the same source handles
/// gzip, bzip2, xz and zstd input as well as plain text. Zero-length records
/// (an empty sequence line paired with an empty quality line) are accepted.
pub struct FastqSource {
    name: String,
    reader: Option<FastqReader>,
    phred_offset: u8,
    index: u64,
}

impl FastqSource {
    pub fn from_reader(
        name: impl Into<String>,
        reader: Box<dyn io::Read>,
        options: &SourceOptions,
    ) -> QcResult<Self> {
        let name = name.into();
        let reader = decompress(&name, reader)?.map(fastq::Reader::new);

        Ok(Self {
            name,
            reader,
            phred_offset: options.phred_offset,
            index: 0,
        })
    }

    pub fn stdin(options: &SourceOptions) -> QcResult<Self> {
        Self::from_reader("<stdin>", Box::new(io::stdin()), options)
    }
}

/// Returns the decoded stream, or `None` when the input holds no bytes at all.
fn decompress(name: &str, mut reader: Box<dyn io::Read>) -> QcResult<Option<Box<dyn io::Read>>> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    reader
        .by_ref()
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|e| QcError::unavailable(name, e))?;

    if head.is_empty() {
        debug!(source = %name, "input is empty");
        return Ok(None);
    }

    let short = head.len() < SNIFF_LEN;
    let rejoined: Box<dyn io::Read> = Box::new(io::Cursor::new(head).chain(reader));
    if short {
        // Too short for any compression header; let the parser judge it.
        debug!(source = %name, "input shorter than a compression header");
        return Ok(Some(rejoined));
    }

    match get_reader(rejoined) {
        Ok((inner, compression)) => {
            debug!(source = %name, ?compression, "opened FASTQ stream");
            Ok(Some(inner))
        }
        Err(e) => Err(QcError::unavailable(
            name,
            io::Error::new(io::ErrorKind::Other, e),
        )),
    }
}

fn create_read_from_record(record: &RefRecord, phred_offset: u8) -> Result<Read, String> {
    Ok(Read {
        id: Some(String::from_utf8_lossy(record.id_bytes()).into_owned()),
        sequence: record.seq().to_vec(),
        quality: decode_quality(record.qual(), phred_offset)?,
    })
}

impl OpenSource for FastqSource {
    fn open(path: &Path, options: &SourceOptions) -> QcResult<Self> {
        let file = File::open(path).map_err(|e| QcError::unavailable(path, e))?;
        Self::from_reader(path.display().to_string(), Box::new(file), options)
    }
}

impl RecordSource for FastqSource {
    fn read_next(&mut self) -> QcResult<Option<Read>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let index = self.index;
        let phred_offset = self.phred_offset;

        let decoded = match reader.next() {
            None => None,
            Some(Err(e)) => {
                return Err(QcError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                })
            }
            Some(Ok(record)) => Some(create_read_from_record(&record, phred_offset)),
        };

        match decoded {
            None => {
                self.reader = None;
                Ok(None)
            }
            Some(read) => {
                self.index += 1;
                read.map(Some)
                    .map_err(|reason| QcError::InvalidRecord { index, reason })
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn decode_quality(encoded: &[u8], offset: u8) -> Result<Vec<u8>, String> {
    encoded
        .iter()
        .map(|&q| {
            q.checked_sub(offset).ok_or_else(|| {
                format!(
                    "quality character {:?} is below the Phred offset {}",
                    q as char, offset
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source_from(text: &'static str) -> FastqSource {
        FastqSource::from_reader(
            "test",
            Box::new(Cursor::new(text.as_bytes())),
            &SourceOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_plain_records() {
        let mut source = source_from("@r1\nACGT\n+\nI5+!\n@r2\nGG\n+\nII\n");

        let first = source.read_next().unwrap().unwrap();
        assert_eq!(first.id.as_deref(), Some("r1"));
        assert_eq!(first.sequence, b"ACGT".to_vec());
        assert_eq!(first.quality, vec![40, 20, 10, 0]);

        let second = source.read_next().unwrap().unwrap();
        assert_eq!(second.quality, vec![40, 40]);

        assert!(source.read_next().unwrap().is_none());
        assert!(source.read_next().unwrap().is_none());
    }

    #[test]
    fn test_empty_input_has_no_records() {
        let mut source = source_from("");
        assert!(source.read_next().unwrap().is_none());
        assert_eq!(source.name(), "test");
    }

    #[test]
    fn test_zero_length_record() {
        let mut source = source_from("@r1\n\n+\n\n@r2\nAC\n+\nII\n");

        let empty = source.read_next().unwrap().unwrap();
        assert_eq!(empty.id.as_deref(), Some("r1"));
        assert!(empty.is_empty());
        assert!(empty.is_well_formed());

        let second = source.read_next().unwrap().unwrap();
        assert_eq!(second.sequence, b"AC".to_vec());
        assert!(source.read_next().unwrap().is_none());
    }

    #[test]
    fn test_short_garbage_is_rejected() {
        let mut source = source_from("xy\n");
        let err = source.read_next().unwrap_err();
        assert!(matches!(err, QcError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_long_garbage_is_rejected() {
        let mut source = source_from("this is not fastq at all\n");
        let err = source.read_next().unwrap_err();
        assert!(matches!(err, QcError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_length_mismatch_is_left_to_the_aggregator() {
        let mut source = source_from("@r1\nACGT\n+\nII\n");
        let read = source.read_next().unwrap().unwrap();
        assert_eq!(read.sequence.len(), 4);
        assert_eq!(read.quality.len(), 2);
        assert!(!read.is_well_formed());
    }

    #[test]
    fn test_custom_phred_offset() {
        let options = SourceOptions { phred_offset: 64 };
        let mut source = FastqSource::from_reader(
            "test",
            Box::new(Cursor::new(&b"@r1\nAC\n+\nhT\n"[..])),
            &options,
        )
        .unwrap();

        let read = source.read_next().unwrap().unwrap();
        assert_eq!(read.quality, vec![40, 20]);
    }

    #[test]
    fn test_quality_below_offset_is_rejected() {
        let options = SourceOptions { phred_offset: 64 };
        let mut source = FastqSource::from_reader(
            "test",
            Box::new(Cursor::new(&b"@r1\nAC\n+\n!!\n"[..])),
            &options,
        )
        .unwrap();

        let err = source.read_next().unwrap_err();
        assert_eq!(err.record_index(), Some(0));
    }

    #[test]
    fn test_decode_quality() {
        assert_eq!(decode_quality(b"!+5?I", 33).unwrap(), vec![0, 10, 20, 30, 40]);
        assert!(decode_quality(b" ", 33).is_err());
    }
}
