mod aggregate;
mod cleaning;
mod config;
mod features;
mod models;
mod pipeline;
mod report;
mod types;

use std::io::stderr;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{
    CleaningPolicy, MarginTable, PipelineConfig, DEFAULT_BOTTOM_N, DEFAULT_CLEANED_OUTPUT, DEFAULT_INPUT,
    DEFAULT_REPORT_OUTPUT, DEFAULT_TOP_N
};
use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "coffee-sales-pipeline")]
#[command(about = "Cleans coffee shop sales data and writes a business analysis report", long_about = None)]
struct Cli {
    /// Raw sales CSV
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the cleaned dataset
    #[arg(short, long, default_value = DEFAULT_CLEANED_OUTPUT)]
    output: PathBuf,

    /// Where to write the text report
    #[arg(short, long, default_value = DEFAULT_REPORT_OUTPUT)]
    report: PathBuf,

    /// Optional `category,margin` CSV overriding the built-in margin table
    #[arg(short, long)]
    margins: Option<PathBuf>,

    /// Revenue outlier threshold in standard deviations (0 disables it)
    #[arg(long, default_value_t = CleaningPolicy::DEFAULT_SIGMA)]
    outlier_sigma: f64,

    /// Number of top products listed in the report
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Number of lowest performing products listed in the report
    #[arg(long, default_value_t = DEFAULT_BOTTOM_N)]
    bottom: usize,

    /// error, warn, info, debug or trace
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let margins = match &cli.margins {
        Some(path) => {
            let table = MarginTable::from_path(path)
                .with_context(|| format!("Unable to load margins from [{}]", path.display()))?;
            info!("Loaded {} category margins from [{}]", table.category_count(), path.display());
            table
        }
        None => MarginTable::default()
    };

    let config = PipelineConfig {
        input: cli.input,
        cleaned_output: cli.output,
        report_output: cli.report,
        top_n: cli.top,
        bottom_n: cli.bottom,
        policy: CleaningPolicy::default().with_outlier_sigma(cli.outlier_sigma),
        margins
    };

    let pipeline = Pipeline::new(config);

    let timer = Instant::now();
    let output = pipeline.run(Local::now().naive_local())
        .with_context(|| format!("Unable to analyse [{}]", pipeline.config().input.display()))?;
    let duration = timer.elapsed();

    info!(
        "Processed {} of {} rows in: {duration:?} ({:.1}% retained)",
        output.quality.final_rows,
        output.quality.rows_read,
        output.quality.retention_rate()
    );

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Logs go to stderr so the console stays readable when output is piped
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
