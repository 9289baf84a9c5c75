use super::state::AccumulatorState;
use crate::error::{QcError, QcResult};
use crate::sequence_processor::{ProcessingStats, Read, RecordSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Records between two progress notifications unless configured otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// What to do with a read whose sequence and quality lengths differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop the pass with `QcError::MalformedRecord`.
    #[default]
    Abort,
    /// Leave the read out and count it in `skipped_records`.
    Skip,
}

pub type ProgressCallback = Box<dyn FnMut(&ProcessingStats) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ingesting,
    Aborted,
    Finalized,
}

/// Single-pass accumulator over a stream of reads.
///
/// Feed reads with [`ingest`](Self::ingest) (or a whole source with
/// [`ingest_source`](Self::ingest_source)), then call
/// [`finalize`](Self::finalize) once to obtain a read-only [`Snapshot`].
pub struct Aggregator {
    state: AccumulatorState,
    stats: ProcessingStats,
    policy: MalformedPolicy,
    progress_interval: u64,
    on_progress: Option<ProgressCallback>,
    phase: Phase,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            state: AccumulatorState::default(),
            stats: ProcessingStats::default(),
            policy: MalformedPolicy::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            on_progress: None,
            phase: Phase::Ingesting,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Calls `callback` after every `interval` records. An interval of 0
    /// disables notifications.
    pub fn with_progress<F>(mut self, interval: u64, callback: F) -> Self
    where
        F: FnMut(&ProcessingStats) + Send + 'static,
    {
        self.progress_interval = interval;
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn stats(&self) -> ProcessingStats {
        self.stats
    }

    pub fn ingest(&mut self, read: &Read) -> QcResult<()> {
        match self.phase {
            Phase::Ingesting => {}
            Phase::Finalized => return Err(QcError::Reuse("ingest called after finalize")),
            Phase::Aborted => return Err(QcError::Reuse("ingest called after an aborted pass")),
        }

        let index = self.stats.seen();
        if read.is_well_formed() {
            self.state.observe(read);
            self.stats.processed += 1;
        } else {
            let err = QcError::MalformedRecord {
                index,
                sequence_len: read.sequence.len(),
                quality_len: read.quality.len(),
            };
            match self.policy {
                MalformedPolicy::Abort => {
                    self.phase = Phase::Aborted;
                    return Err(err);
                }
                MalformedPolicy::Skip => {
                    warn!(%err, "skipping malformed record");
                    self.state.skipped_records += 1;
                    self.stats.skipped += 1;
                }
            }
        }

        self.notify();
        Ok(())
    }

    /// Drains `source`, ingesting every read it yields.
    pub fn ingest_source(&mut self, source: &mut dyn RecordSource) -> QcResult<ProcessingStats> {
        debug!(source = source.name(), "ingesting records");
        loop {
            let next = match source.read_next() {
                Ok(next) => next,
                Err(e) => {
                    self.phase = Phase::Aborted;
                    return Err(e);
                }
            };
            match next {
                Some(read) => self.ingest(&read)?,
                None => break,
            }
        }
        debug!(
            source = source.name(),
            processed = self.stats.processed,
            skipped = self.stats.skipped,
            "source exhausted"
        );
        Ok(self.stats)
    }

    /// Freezes the accumulated state. Only the first call succeeds.
    pub fn finalize(&mut self) -> QcResult<Snapshot> {
        match self.phase {
            Phase::Ingesting => {}
            Phase::Finalized => return Err(QcError::Reuse("finalize called twice")),
            Phase::Aborted => return Err(QcError::Reuse("finalize called after an aborted pass")),
        }
        self.phase = Phase::Finalized;

        Ok(Snapshot {
            state: std::mem::take(&mut self.state),
        })
    }

    fn notify(&mut self) {
        if self.progress_interval == 0 || self.stats.seen() % self.progress_interval != 0 {
            return;
        }
        if let Some(callback) = self.on_progress.as_mut() {
            callback(&self.stats);
        }
    }
}

/// Frozen aggregation result. Nothing can mutate it once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    state: AccumulatorState,
}

impl Snapshot {
    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    /// True when no read was aggregated.
    pub fn is_empty(&self) -> bool {
        self.state.total_sequences == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qc::state::{BaseCounts, QualitySum};
    use crate::sequence_processor::MemorySource;
    use std::sync::{Arc, Mutex};

    fn sample_reads() -> Vec<Read> {
        vec![
            Read::new("ATGC", vec![30, 30, 30, 30]),
            Read::new("AT", vec![10, 10]),
            Read::new("GGCC", vec![40, 40, 20, 20]),
        ]
    }

    #[test]
    fn test_accumulates_sample_reads() {
        let mut aggregator = Aggregator::new();
        for read in sample_reads() {
            aggregator.ingest(&read).unwrap();
        }
        let snapshot = aggregator.finalize().unwrap();
        let state = snapshot.state();

        assert_eq!(state.total_sequences, 3);
        assert_eq!(state.total_length, 10);
        assert_eq!(state.total_bases, 10);
        assert_eq!(state.gc_count, 6);
        assert_eq!(state.length_counts.get(&4), Some(&2));
        assert_eq!(state.length_counts.get(&2), Some(&1));
        assert_eq!(state.position_quality.len(), 4);
        assert_eq!(state.position_quality[0], QualitySum { sum: 80, count: 3 });
        assert_eq!(state.position_quality[2], QualitySum { sum: 50, count: 2 });
        assert_eq!(
            state.position_composition[0],
            BaseCounts { a: 2, c: 0, g: 1, t: 0 }
        );
        assert_eq!(state.per_read_quality_means.count, 3);
        assert_eq!(state.per_read_quality_means.sum, 30.0 + 10.0 + 30.0);
    }

    #[test]
    fn test_empty_read_counts_without_positions() {
        let mut aggregator = Aggregator::new();
        aggregator.ingest(&Read::new("", vec![])).unwrap();
        let snapshot = aggregator.finalize().unwrap();
        let state = snapshot.state();

        assert_eq!(state.total_sequences, 1);
        assert_eq!(state.total_length, 0);
        assert_eq!(state.length_counts.get(&0), Some(&1));
        assert!(state.position_quality.is_empty());
        assert!(state.position_composition.is_empty());
        assert_eq!(state.per_read_quality_means.count, 0);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_non_acgt_symbols_count_toward_length_only() {
        let mut aggregator = Aggregator::new();
        aggregator.ingest(&Read::new("NNGx", vec![5, 5, 5, 5])).unwrap();
        let snapshot = aggregator.finalize().unwrap();
        let state = snapshot.state();

        assert_eq!(state.total_bases, 4);
        assert_eq!(state.gc_count, 1);
        assert_eq!(state.position_composition[0].observed(), 0);
        assert_eq!(state.position_composition[2].g, 1);
    }

    #[test]
    fn test_malformed_record_aborts_with_index() {
        let mut aggregator = Aggregator::new();
        aggregator.ingest(&Read::new("AC", vec![30, 30])).unwrap();
        let err = aggregator.ingest(&Read::new("ACG", vec![30])).unwrap_err();

        match err {
            QcError::MalformedRecord {
                index,
                sequence_len,
                quality_len,
            } => {
                assert_eq!(index, 1);
                assert_eq!(sequence_len, 3);
                assert_eq!(quality_len, 1);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            aggregator.ingest(&Read::new("A", vec![1])),
            Err(QcError::Reuse(_))
        ));
        assert!(matches!(aggregator.finalize(), Err(QcError::Reuse(_))));
    }

    #[test]
    fn test_skip_policy_counts_malformed_records() {
        let mut aggregator = Aggregator::new().with_policy(MalformedPolicy::Skip);
        aggregator.ingest(&Read::new("ACG", vec![30])).unwrap();
        aggregator.ingest(&Read::new("AC", vec![30, 30])).unwrap();

        assert_eq!(aggregator.stats(), ProcessingStats { processed: 1, skipped: 1 });
        let snapshot = aggregator.finalize().unwrap();
        assert_eq!(snapshot.state().total_sequences, 1);
        assert_eq!(snapshot.state().skipped_records, 1);
    }

    #[test]
    fn test_finalize_only_once() {
        let mut aggregator = Aggregator::new();
        aggregator.finalize().unwrap();

        assert!(matches!(aggregator.finalize(), Err(QcError::Reuse(_))));
        assert!(matches!(
            aggregator.ingest(&Read::new("A", vec![30])),
            Err(QcError::Reuse(_))
        ));
    }

    #[test]
    fn test_progress_called_every_interval() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut aggregator = Aggregator::new()
            .with_progress(2, move |stats| sink.lock().unwrap().push(stats.processed));

        let reads = (0..5).map(|_| Read::new("A", vec![30]));
        let stats = aggregator
            .ingest_source(&mut MemorySource::new(reads))
            .unwrap();

        assert_eq!(stats.processed, 5);
        assert_eq!(*seen.lock().unwrap(), vec![2, 4]);
    }

    #[test]
    fn test_ingest_source_matches_manual_ingest() {
        let mut manual = Aggregator::new();
        for read in sample_reads() {
            manual.ingest(&read).unwrap();
        }

        let mut streamed = Aggregator::new();
        streamed
            .ingest_source(&mut MemorySource::new(sample_reads()))
            .unwrap();

        assert_eq!(manual.finalize().unwrap(), streamed.finalize().unwrap());
    }
}
