use super::{analyze_file, write_json};
use crate::config::Config;
use crate::export::{AnalysisData, AnalysisExport};
use anyhow::Result;
use std::path::PathBuf;
use tracing::warn;

pub fn run(
    file: PathBuf,
    output_file: Option<PathBuf>,
    all_lengths: bool,
    config: &Config,
    show_progress: bool,
) -> Result<()> {
    let mut config = config.clone();
    if all_lengths {
        config.top_lengths = usize::MAX;
    }

    let summary = analyze_file(&file, &config, show_progress)?;
    if summary.is_empty() {
        warn!(source = %summary.source, "no valid sequences found, exporting an empty profile");
    }

    let source = summary.source.clone();
    let export = AnalysisExport::new(source, AnalysisData::Profile(summary.into()));
    write_json(&export, output_file.as_deref())
}
