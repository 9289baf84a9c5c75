use std::path::PathBuf;
use thiserror::Error;

pub type QcResult<T> = Result<T, QcError>;

/// Failures raised while reading records or aggregating them.
///
/// An empty input is not represented here: it yields a summary flagged as
/// empty instead.
#[derive(Debug, Error)]
pub enum QcError {
    #[error("cannot read {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "record {index}: sequence length {sequence_len} does not match quality length {quality_len}"
    )]
    MalformedRecord {
        index: u64,
        sequence_len: usize,
        quality_len: usize,
    },

    #[error("record {index}: {reason}")]
    InvalidRecord { index: u64, reason: String },

    #[error("aggregator used out of order: {0}")]
    Reuse(&'static str),
}

impl QcError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QcError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Ordinal of the offending record, when the error is tied to one.
    pub fn record_index(&self) -> Option<u64> {
        match self {
            QcError::MalformedRecord { index, .. } | QcError::InvalidRecord { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}
