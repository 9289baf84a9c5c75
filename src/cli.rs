use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(author, version, about = "Quality control statistics for FASTQ reads", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and hide progress spinners
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip reads whose sequence and quality lengths differ instead of failing
    #[arg(long, global = true)]
    pub skip_malformed: bool,
}

impl Args {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print general statistics for a FASTQ file (use - for stdin)
    Stats {
        /// Path to the FASTQ file (.gz, .bz2, .xz and .zst are supported)
        file: PathBuf,

        /// Include the most frequent read lengths
        #[arg(short, long)]
        detailed: bool,

        /// Number of lengths to list with --detailed
        #[arg(long)]
        top: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Analyze base qualities: Q20/Q30 shares and an overall grade
    Quality {
        /// Path to the FASTQ file (.gz, .bz2, .xz and .zst are supported)
        file: PathBuf,

        /// Explain the Q20/Q30/Q40 thresholds
        #[arg(short, long)]
        thresholds: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export per-position quality and composition plus the length
    /// distribution as JSON for plotting
    Profile {
        /// Path to the FASTQ file (.gz, .bz2, .xz and .zst are supported)
        file: PathBuf,

        /// Output file for the profile (stdout if omitted)
        #[arg(short = 'o', long = "output")]
        output_file: Option<PathBuf>,

        /// Export every observed length, not just the most frequent ones
        #[arg(long)]
        all_lengths: bool,
    },
}
