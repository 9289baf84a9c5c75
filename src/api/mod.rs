//! Entry points shared by every front end.
//!
//! [`analyze_source`] is the one ingest → finalize → summarize pipeline; the
//! text reports, the JSON export and [`spawn_analysis`] all go through it.

use crate::config::Config;
use crate::error::QcResult;
use crate::qc::{Aggregator, MalformedPolicy, ProgressCallback, Summary, SummaryComputer};
use crate::sequence_processor::{open_source, ProcessingStats, RecordSource, SourceOptions};
use crossbeam_channel::{unbounded, Receiver};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tracing::info;

/// Progress events sent from a background analysis to its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { task: String },
    Progress { task: String, processed: u64, skipped: u64 },
    Completed { task: String, processed: u64 },
    Error { task: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub source: SourceOptions,
    pub policy: MalformedPolicy,
    pub progress_interval: u64,
    pub top_lengths: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings::from(&Config::default())
    }
}

impl From<&Config> for AnalysisSettings {
    fn from(config: &Config) -> Self {
        Self {
            source: config.source_options(),
            policy: config.malformed_policy(),
            progress_interval: config.progress_interval,
            top_lengths: config.top_lengths,
        }
    }
}

/// Aggregates every read from `source` and derives the full summary.
pub fn analyze_source(
    source: &mut dyn RecordSource,
    settings: &AnalysisSettings,
    on_progress: Option<ProgressCallback>,
) -> QcResult<Summary> {
    let mut aggregator = Aggregator::new().with_policy(settings.policy);
    if let Some(callback) = on_progress {
        aggregator = aggregator.with_progress(settings.progress_interval, callback);
    }

    let stats = aggregator.ingest_source(source)?;
    let snapshot = aggregator.finalize()?;
    info!(
        source = source.name(),
        processed = stats.processed,
        skipped = stats.skipped,
        "aggregation complete"
    );

    Ok(SummaryComputer::new(&snapshot).summarize(source.name(), settings.top_lengths))
}

/// Opens `path` (or stdin for `-`) and analyzes it.
pub fn analyze_path(
    path: &Path,
    settings: &AnalysisSettings,
    on_progress: Option<ProgressCallback>,
) -> QcResult<Summary> {
    let mut source = open_source(path, &settings.source)?;
    analyze_source(source.as_mut(), settings, on_progress)
}

/// A running background analysis.
pub struct AnalysisHandle {
    events: Receiver<ProgressEvent>,
    handle: JoinHandle<QcResult<Summary>>,
}

impl AnalysisHandle {
    pub fn events(&self) -> &Receiver<ProgressEvent> {
        &self.events
    }

    /// Blocks until the worker finishes and returns its result.
    pub fn wait(self) -> QcResult<Summary> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Runs the whole pipeline for `path` on a worker thread, so a UI can keep
/// responding. Only the worker touches the aggregator.
pub fn spawn_analysis(path: PathBuf, settings: AnalysisSettings) -> AnalysisHandle {
    let (tx, events) = unbounded();

    let handle = thread::spawn(move || {
        let task = path.display().to_string();
        let _ = tx.send(ProgressEvent::Started { task: task.clone() });

        let progress_tx = tx.clone();
        let progress_task = task.clone();
        let callback: ProgressCallback = Box::new(move |stats: &ProcessingStats| {
            let _ = progress_tx.send(ProgressEvent::Progress {
                task: progress_task.clone(),
                processed: stats.processed,
                skipped: stats.skipped,
            });
        });

        let result = analyze_path(&path, &settings, Some(callback));
        let _ = match &result {
            Ok(summary) => tx.send(ProgressEvent::Completed {
                task,
                processed: summary.basic.total_sequences,
            }),
            Err(e) => tx.send(ProgressEvent::Error {
                task,
                error: e.to_string(),
            }),
        };
        result
    });

    AnalysisHandle { events, handle }
}
