use super::{analyze_file, write_json};
use crate::config::Config;
use crate::export::formats::quality::QualityExport;
use crate::export::{AnalysisData, AnalysisExport};
use crate::report::TextReport;
use anyhow::Result;
use std::io;
use std::path::PathBuf;

pub fn run(
    file: PathBuf,
    thresholds: bool,
    json: bool,
    config: &Config,
    show_progress: bool,
) -> Result<()> {
    let summary = analyze_file(&file, config, show_progress)?;

    if json {
        let data = AnalysisData::Quality(QualityExport::from_summary(&summary));
        return write_json(&AnalysisExport::new(summary.source.clone(), data), None);
    }

    let report = TextReport::new(config.theme.clone());
    report.write_quality(&mut io::stdout().lock(), &summary, thresholds)?;
    Ok(())
}
