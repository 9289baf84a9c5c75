use super::ReportTheme;
use crate::qc::{BasicStats, LengthBin, QualityStats, Summary};
use std::fmt::Display;
use std::io::{self, Write};

const THRESHOLD_NOTES: [&str; 3] = [
    "Q20: 1% error rate (99% accuracy), minimum acceptable level",
    "Q30: 0.1% error rate (99.9% accuracy), good quality",
    "Q40: 0.01% error rate (99.99% accuracy), excellent quality",
];

/// Renders summaries as aligned label/value text.
pub struct TextReport {
    theme: ReportTheme,
}

impl TextReport {
    pub fn new(theme: ReportTheme) -> Self {
        Self { theme }
    }

    /// Basic statistics, optionally followed by the most frequent lengths.
    pub fn write_stats<W: Write>(
        &self,
        out: &mut W,
        summary: &Summary,
        detailed: bool,
    ) -> io::Result<()> {
        writeln!(out, "Statistics for file: {}", summary.source)?;
        writeln!(out, "{}", self.theme.rule())?;

        if summary.is_empty() {
            return self.write_no_data(out, &summary.basic);
        }

        let basic = &summary.basic;
        self.line(out, "Total sequences:", group_thousands(basic.total_sequences), "")?;
        self.line(out, "Total bases:", group_thousands(basic.total_length), " bp")?;
        self.line(out, "Mean sequence length:", format!("{:.1}", basic.mean_length), " bp")?;
        self.line(out, "Minimum length:", display_or_na(basic.min_length), " bp")?;
        self.line(out, "Maximum length:", display_or_na(basic.max_length), " bp")?;
        self.line(out, "GC content:", format!("{:.1}", basic.gc_percent), "%")?;
        self.write_skipped(out, basic)?;

        if detailed {
            self.write_length_distribution(out, &summary.length_distribution)?;
        }
        Ok(())
    }

    /// Quality figures, the overall grade and, on request, what Q20/Q30 mean.
    pub fn write_quality<W: Write>(
        &self,
        out: &mut W,
        summary: &Summary,
        thresholds: bool,
    ) -> io::Result<()> {
        writeln!(out, "Quality analysis for file: {}", summary.source)?;
        writeln!(out, "{}", self.theme.rule())?;

        if summary.is_empty() {
            return self.write_no_data(out, &summary.basic);
        }

        let quality: &QualityStats = &summary.quality;
        self.line(out, "Total sequences:", group_thousands(quality.total_sequences), "")?;
        self.line(out, "Total bases:", group_thousands(quality.total_bases), "")?;
        self.line(
            out,
            "Mean quality (per-read mean, Phred):",
            format!("{:.1}", quality.mean_of_read_means),
            "",
        )?;
        self.line(
            out,
            "Mean quality (per-base, Phred):",
            format!("{:.1}", quality.position_weighted_mean),
            "",
        )?;
        self.line(out, "Minimum quality:", display_or_na(quality.min_quality), "")?;
        self.line(out, "Maximum quality:", display_or_na(quality.max_quality), "")?;
        self.line(out, "Bases with Q>=20:", format!("{:.1}", quality.q20_percent), "%")?;
        self.line(out, "Bases with Q>=30:", format!("{:.1}", quality.q30_percent), "%")?;
        self.line(out, "Quality grade:", quality.grade, "")?;
        self.write_skipped(out, &summary.basic)?;

        if thresholds {
            writeln!(out)?;
            writeln!(out, "Quality thresholds:")?;
            for note in THRESHOLD_NOTES {
                writeln!(out, "  {}", note)?;
            }
        }
        Ok(())
    }

    fn write_length_distribution<W: Write>(&self, out: &mut W, bins: &[LengthBin]) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Read length distribution:")?;
        for bin in bins {
            writeln!(
                out,
                "  {:>4} bp: {:>8} reads ({:>5.1}%)",
                bin.length,
                group_thousands(bin.count),
                bin.percent
            )?;
        }
        Ok(())
    }

    fn write_no_data<W: Write>(&self, out: &mut W, basic: &BasicStats) -> io::Result<()> {
        writeln!(out, "No valid sequences found")?;
        self.write_skipped(out, basic)
    }

    fn write_skipped<W: Write>(&self, out: &mut W, basic: &BasicStats) -> io::Result<()> {
        if basic.skipped_records > 0 {
            self.line(
                out,
                "Skipped malformed records:",
                group_thousands(basic.skipped_records),
                "",
            )?;
        }
        Ok(())
    }

    fn line<W: Write>(
        &self,
        out: &mut W,
        label: &str,
        value: impl Display,
        unit: &str,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{:<label_width$} {:>value_width$}{}",
            label,
            value.to_string(),
            unit,
            label_width = self.theme.label_width,
            value_width = self.theme.value_width,
        )
    }
}

fn display_or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
