//! Iperf Report CLI Application
//!
//! Command-line front end for the iperf-report library. It adds everything
//! the library deliberately leaves out:
//! - Input file selection (arguments or a TOML config file)
//! - Result directory setup (fresh timestamped folder per batch)
//! - Per-file failure policy and the batch summary
//! - Logging setup

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod batch;
mod config;

/// Iperf Report - Convert iperf3 JSON reports to xlsx workbooks
#[derive(Parser, Debug)]
#[command(name = "iperf-report-cli")]
#[command(about = "Convert iperf3 JSON throughput reports to styled xlsx workbooks", long_about = None)]
#[command(version)]
struct Args {
    /// iperf3 JSON report file(s) to convert
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Base directory for the timestamped result folder
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Only include intervals earlier than this timestamp
    /// (e.g. "2023-11-15 07:13:30")
    #[arg(long, value_name = "TIMESTAMP")]
    cutoff: Option<String>,

    /// Path to a TOML batch configuration file (alternative to FILE arguments)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Iperf Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using report library v{}", iperf_report::VERSION);

    let job = if !args.inputs.is_empty() {
        batch::BatchJob {
            inputs: args.inputs.clone(),
            base_dir: args.output_dir.clone(),
            cutoff: args.cutoff.clone(),
        }
    } else if let Some(config_path) = &args.config {
        log::info!("Loading configuration from: {:?}", config_path);
        let config = config::load_config(config_path)?;
        batch::BatchJob {
            inputs: config.input.files,
            base_dir: config
                .output
                .dir
                .unwrap_or_else(|| args.output_dir.clone()),
            cutoff: config.cutoff.or_else(|| args.cutoff.clone()),
        }
    } else {
        // No arguments - show help
        println!("Iperf Report - No input specified");
        println!("\nQuick Start:");
        println!("  iperf-report-cli run1.json run2.json");
        println!("  iperf-report-cli run1.json --output-dir results/");
        println!("  iperf-report-cli run1.json --cutoff \"2023-11-15 07:13:30\"");
        println!("\nFor batch configuration:");
        println!("  iperf-report-cli --config batch.toml");
        println!("\nUse --help for more options");
        return Ok(());
    };

    let summary = batch::run(&job)?;

    println!(
        "Converted {}/{} file(s) into {:?}",
        summary.succeeded,
        summary.total(),
        summary.result_dir
    );

    if summary.failed > 0 {
        anyhow::bail!("{} of {} file(s) failed to convert", summary.failed, summary.total());
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
