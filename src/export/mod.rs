pub mod formats;

use crate::export::formats::profile::ProfileExport;
use crate::export::formats::quality::QualityExport;
use crate::export::formats::stats::StatsExport;
use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error};
use serde::{Deserialize, Serialize, Serializer};

pub const RECORD_TYPE: &str = "fastq-qc.analysis";
pub const EXPORT_VERSION: &str = "1";

/// Root structure for every JSON export.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisExport {
    #[serde(rename = "$type")]
    pub record_type: String,

    pub version: String,
    #[serde(serialize_with = "serialize_datetime", deserialize_with = "deserialize_datetime")]
    pub created_at: DateTime<Utc>,
    pub tool_version: String,
    pub source: String,

    #[serde(flatten)]
    pub data: AnalysisData,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnalysisData {
    Stats(StatsExport),
    Quality(QualityExport),
    Profile(ProfileExport),
}

impl AnalysisExport {
    pub fn new(source: impl Into<String>, data: AnalysisData) -> Self {
        Self {
            record_type: RECORD_TYPE.to_string(),
            version: EXPORT_VERSION.to_string(),
            created_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.into(),
            data,
        }
    }
}

fn serialize_datetime<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339())
}

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(D::Error::custom)
}
