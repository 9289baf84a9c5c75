use anyhow::Result;
use clap::Parser;
use fastq_qc::cli::{Args, Commands};
use fastq_qc::commands;
use fastq_qc::config::Config;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by -v/-q.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str().to_ascii_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if args.skip_malformed {
        config.skip_malformed = true;
    }
    let show_progress = !args.quiet;

    match args.command {
        Commands::Stats {
            file,
            detailed,
            top,
            json,
        } => commands::stats::run(file, detailed, top, json, &config, show_progress),
        Commands::Quality {
            file,
            thresholds,
            json,
        } => commands::quality::run(file, thresholds, json, &config, show_progress),
        Commands::Profile {
            file,
            output_file,
            all_lengths,
        } => commands::profile::run(file, output_file, all_lengths, &config, show_progress),
    }
}
