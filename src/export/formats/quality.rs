use crate::qc::{QualityStats, Summary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityExport {
    pub quality: QualityStats,
    pub skipped_records: u64,
}

impl QualityExport {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            quality: summary.quality.clone(),
            skipped_records: summary.basic.skipped_records,
        }
    }
}
