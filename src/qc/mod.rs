//! Streaming read statistics: single-pass aggregation and the metrics derived
//! from it.

mod aggregator;
mod state;
mod summary;

pub use aggregator::{
    Aggregator, MalformedPolicy, ProgressCallback, Snapshot, DEFAULT_PROGRESS_INTERVAL,
};
pub use state::{AccumulatorState, BaseCounts, MeanOfMeans, QualitySum, Q20, Q30};
pub use summary::{
    classify_grade, BasicStats, Composition, LengthBin, PositionProfile, PositionStats,
    QualityGrade, QualityStats, Summary, SummaryComputer,
};
