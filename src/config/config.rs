use crate::qc::{MalformedPolicy, DEFAULT_PROGRESS_INTERVAL};
use crate::report::ReportTheme;
use crate::sequence_processor::SourceOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lengths listed by `stats --detailed` and the profile export.
    #[serde(default = "default_top_lengths")]
    pub top_lengths: usize,
    /// Records between progress updates.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    #[serde(default = "default_phred_offset")]
    pub phred_offset: u8,
    #[serde(default)]
    pub skip_malformed: bool,
    #[serde(default)]
    pub theme: ReportTheme,
}

fn default_top_lengths() -> usize {
    10
}

fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}

fn default_phred_offset() -> u8 {
    33
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_lengths: default_top_lengths(),
            progress_interval: default_progress_interval(),
            phred_offset: default_phred_offset(),
            skip_malformed: false,
            theme: ReportTheme::default(),
        }
    }
}

impl Config {
    /// Location of the per-user config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "fastq-qc", "fastq-qc")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the per-user config, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Config::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Config::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring config file: {:#}", e);
                Config::default()
            }
        }
    }

    /// Loads a config file that must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            phred_offset: self.phred_offset,
        }
    }

    pub fn malformed_policy(&self) -> MalformedPolicy {
        if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        }
    }
}
