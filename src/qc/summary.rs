//! Metrics derived from a frozen [`Snapshot`].
//!
//! Every function here is pure: the same snapshot always yields the same
//! values, and zero denominators produce 0 (or `None` for extremes) rather
//! than a fault.

use super::aggregator::Snapshot;
use super::state::{percent, ratio};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_sequences: u64,
    pub total_length: u64,
    pub mean_length: f64,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub gc_count: u64,
    pub total_bases: u64,
    pub gc_percent: f64,
    pub skipped_records: u64,
    pub is_empty: bool,
}

/// One entry of the read length distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthBin {
    pub length: usize,
    pub count: u64,
    /// Share of all aggregated reads, 0–100.
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QualityGrade::Excellent => "Excellent",
            QualityGrade::Good => "Good",
            QualityGrade::Acceptable => "Acceptable",
            QualityGrade::Poor => "Poor",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityStats {
    pub total_sequences: u64,
    pub total_bases: u64,
    /// Average of each read's own mean quality; every read weighs the same.
    pub mean_of_read_means: f64,
    /// Average over all bases; long reads weigh more.
    pub position_weighted_mean: f64,
    pub min_quality: Option<u8>,
    pub max_quality: Option<u8>,
    pub q20_percent: f64,
    pub q30_percent: f64,
    pub grade: QualityGrade,
}

/// A/C/G/T shares at a position, each 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub a: f64,
    pub c: f64,
    pub g: f64,
    pub t: f64,
}

impl Composition {
    pub fn total(&self) -> f64 {
        self.a + self.c + self.g + self.t
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStats {
    /// Zero-based offset into the read.
    pub position: usize,
    /// Reads long enough to reach this position.
    pub reads: u64,
    pub mean_quality: f64,
    pub composition: Composition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionProfile {
    pub positions: Vec<PositionStats>,
}

/// Everything a presenter might need, computed in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub source: String,
    pub basic: BasicStats,
    pub quality: QualityStats,
    pub length_distribution: Vec<LengthBin>,
    pub profile: PositionProfile,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.basic.is_empty
    }
}

/// First matching rule wins.
pub fn classify_grade(q20_percent: f64, q30_percent: f64) -> QualityGrade {
    if q30_percent >= 80.0 {
        QualityGrade::Excellent
    } else if q30_percent >= 60.0 {
        QualityGrade::Good
    } else if q20_percent >= 80.0 {
        QualityGrade::Acceptable
    } else {
        QualityGrade::Poor
    }
}

pub struct SummaryComputer<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> SummaryComputer<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn basic_stats(&self) -> BasicStats {
        let state = self.snapshot.state();

        BasicStats {
            total_sequences: state.total_sequences,
            total_length: state.total_length,
            mean_length: ratio(state.total_length as f64, state.total_sequences),
            min_length: state.length_counts.keys().next().copied(),
            max_length: state.length_counts.keys().next_back().copied(),
            gc_count: state.gc_count,
            total_bases: state.total_bases,
            gc_percent: percent(state.gc_count, state.total_bases),
            skipped_records: state.skipped_records,
            is_empty: self.snapshot.is_empty(),
        }
    }

    /// The `k` most frequent lengths, most frequent first; equal counts are
    /// ordered by ascending length.
    pub fn length_distribution(&self, k: usize) -> Vec<LengthBin> {
        let state = self.snapshot.state();
        let mut counts: Vec<(usize, u64)> = state
            .length_counts
            .iter()
            .map(|(&length, &count)| (length, count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts.truncate(k);

        counts
            .into_iter()
            .map(|(length, count)| LengthBin {
                length,
                count,
                percent: percent(count, state.total_sequences),
            })
            .collect()
    }

    pub fn quality_stats(&self) -> QualityStats {
        let state = self.snapshot.state();
        let quality_sum: u64 = state.position_quality.iter().map(|p| p.sum).sum();
        let q20_percent = percent(state.q20_bases, state.total_bases);
        let q30_percent = percent(state.q30_bases, state.total_bases);

        QualityStats {
            total_sequences: state.total_sequences,
            total_bases: state.total_bases,
            mean_of_read_means: state.per_read_quality_means.mean(),
            position_weighted_mean: ratio(quality_sum as f64, state.total_bases),
            min_quality: state.min_quality,
            max_quality: state.max_quality,
            q20_percent,
            q30_percent,
            grade: classify_grade(q20_percent, q30_percent),
        }
    }

    pub fn position_profile(&self) -> PositionProfile {
        let state = self.snapshot.state();
        let positions = state
            .position_quality
            .iter()
            .zip(&state.position_composition)
            .enumerate()
            .map(|(position, (quality, bases))| {
                // Every base reaching the position is in the denominator, so
                // N and other symbols pull the A/C/G/T total below 100.
                let observed = quality.count;
                PositionStats {
                    position,
                    reads: quality.count,
                    mean_quality: quality.mean(),
                    composition: Composition {
                        a: percent(bases.a, observed),
                        c: percent(bases.c, observed),
                        g: percent(bases.g, observed),
                        t: percent(bases.t, observed),
                    },
                }
            })
            .collect();

        PositionProfile { positions }
    }

    pub fn summarize(&self, source: impl Into<String>, top_lengths: usize) -> Summary {
        Summary {
            source: source.into(),
            basic: self.basic_stats(),
            quality: self.quality_stats(),
            length_distribution: self.length_distribution(top_lengths),
            profile: self.position_profile(),
        }
    }
}
