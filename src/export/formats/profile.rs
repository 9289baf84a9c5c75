use crate::qc::{BasicStats, LengthBin, PositionStats, QualityStats, Summary};
use serde::{Deserialize, Serialize};

/// Chart feed: everything a plotting front end needs to draw the length
/// histogram and the per-position quality and composition curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileExport {
    pub basic: BasicStats,
    pub quality: QualityStats,
    pub length_distribution: Vec<LengthBin>,
    pub positions: Vec<PositionStats>,
}

impl From<Summary> for ProfileExport {
    fn from(summary: Summary) -> Self {
        Self {
            basic: summary.basic,
            quality: summary.quality,
            length_distribution: summary.length_distribution,
            positions: summary.profile.positions,
        }
    }
}
