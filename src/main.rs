//! CLI entry point for the bike-sharing insights tool.
//!
//! Provides subcommands for aggregating a daily dataset into a JSON report
//! for the dashboard and for checking dataset quality.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bikeshare_insights::analyzers::aggregate::aggregate_days;
use bikeshare_insights::analyzers::quality::quality_report;
use bikeshare_insights::loader::load;
use bikeshare_insights::normalize::{CategoryMaps, DayRecord, normalize};
use bikeshare_insights::output::{print_pretty, to_json, write_monthly_csv, write_report};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_insights")]
#[command(about = "A tool to aggregate daily bike-sharing data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a daily dataset CSV into a JSON report
    Analyze {
        /// Path to the daily dataset CSV
        #[arg(value_name = "CSV_FILE")]
        source: PathBuf,

        /// JSON file to write the report to (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also export the monthly count pivot as a CSV table
        #[arg(long)]
        monthly_csv: Option<PathBuf>,
    },
    /// Check a daily dataset CSV for duplicates and count mismatches
    Quality {
        /// Path to the daily dataset CSV
        #[arg(value_name = "CSV_FILE")]
        source: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            output,
            monthly_csv,
        } => {
            let rows = run_pipeline(&source)?;
            let maps = CategoryMaps::default();
            let report = aggregate_days(&source.display().to_string(), &rows, &maps)?;
            print_pretty(&report);

            if let Some(path) = monthly_csv {
                write_monthly_csv(&path, &report.monthly_counts)?;
            }

            match output {
                Some(path) => write_report(&path, &report)?,
                None => println!("{}", to_json(&report)?),
            }
        }
        Commands::Quality { source } => {
            let rows = run_pipeline(&source)?;
            let quality = quality_report(&rows);

            info!(
                rows = quality.rows,
                duplicate_rows = quality.duplicate_rows,
                count_mismatches = quality.count_mismatches,
                "Quality check complete"
            );
            println!("{}", serde_json::to_string_pretty(&quality)?);
        }
    }

    Ok(())
}

/// Loads and normalizes a dataset file.
#[tracing::instrument(fields(source = %source.display()))]
fn run_pipeline(source: &Path) -> Result<Vec<DayRecord>> {
    let raw = load(source)?;
    let rows = normalize(&raw, &CategoryMaps::default())?;
    info!(rows = rows.len(), "Dataset normalized");
    Ok(rows)
}
