pub mod profile;
pub mod quality;
pub mod stats;

use crate::api::{self, AnalysisSettings};
use crate::config::Config;
use crate::export::AnalysisExport;
use crate::qc::{ProgressCallback, Summary};
use crate::sequence_processor::readers::STDIN_PATH;
use crate::sequence_processor::ProcessingStats;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Runs the shared pipeline over `file` with a spinner on stderr.
fn analyze_file(file: &Path, config: &Config, show_progress: bool) -> Result<Summary> {
    if file.as_os_str() != STDIN_PATH && !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let progress = ProgressBarBuilder::new(format!("Reading {}", file.display()))
        .with_template("{spinner:.green} [{elapsed_precise}] {msg}: {pos} records ({per_sec})")
        .with_tick()
        .hidden(!show_progress)
        .build()?;

    let pb = progress.clone();
    let callback: ProgressCallback =
        Box::new(move |stats: &ProcessingStats| pb.set_position(stats.seen()));

    let settings = AnalysisSettings::from(config);
    let result = api::analyze_path(file, &settings, Some(callback));
    progress.finish_and_clear();

    let summary = result.with_context(|| format!("Failed to analyze {}", file.display()))?;
    info!(
        source = %summary.source,
        sequences = summary.basic.total_sequences,
        "analysis finished"
    );
    Ok(summary)
}

/// Writes `export` as pretty JSON to `output`, or stdout when absent.
fn write_json(export: &AnalysisExport, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, export)?;
            writeln!(writer)?;
            writer.flush()?;
            info!(path = %path.display(), "wrote export");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, export)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
