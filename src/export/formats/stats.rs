use crate::qc::{BasicStats, LengthBin, Summary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsExport {
    pub basic: BasicStats,
    /// Only present for detailed reports.
    pub length_distribution: Option<Vec<LengthBin>>,
}

impl StatsExport {
    pub fn from_summary(summary: &Summary, detailed: bool) -> Self {
        Self {
            basic: summary.basic.clone(),
            length_distribution: detailed.then(|| summary.length_distribution.clone()),
        }
    }
}
