use super::{analyze_file, write_json};
use crate::config::Config;
use crate::export::formats::stats::StatsExport;
use crate::export::{AnalysisData, AnalysisExport};
use crate::report::TextReport;
use anyhow::Result;
use std::io;
use std::path::PathBuf;

pub fn run(
    file: PathBuf,
    detailed: bool,
    top: Option<usize>,
    json: bool,
    config: &Config,
    show_progress: bool,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(top) = top {
        config.top_lengths = top;
    }

    let summary = analyze_file(&file, &config, show_progress)?;

    if json {
        let data = AnalysisData::Stats(StatsExport::from_summary(&summary, detailed));
        return write_json(&AnalysisExport::new(summary.source.clone(), data), None);
    }

    let report = TextReport::new(config.theme.clone());
    report.write_stats(&mut io::stdout().lock(), &summary, detailed)?;
    Ok(())
}
