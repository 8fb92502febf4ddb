//! Attachment kernel estimation from a temporal edge stream.
//!
//! ```bash
//! # node ids start at the third field of every line
//! cat edges.tsv | kernel-estimate 2
//!
//! # baseline strategy, JSON output
//! cat edges.tsv | kernel-estimate 2 --strategy naive --format json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use kernel_estimate::EstimateError;
use kernel_estimate::estimators::{Strategy, build_estimator};
use kernel_estimate::params::EstimationParams;
use kernel_estimate::report::{ReportFormat, write_summary_header};
use kernel_estimate::streams::TsvEventStream;
use kernel_estimate::tasks::KernelEstimation;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

const USAGE: &str = "usage: cat file(tsv) | kernel-estimate <column>\n\
# In the tsv input, each line corresponds to one time step,\n\
# and entries from <column> on are node ids that obtain edges at that time step.";

/// Estimates the attachment kernel A(k) of a growing network read from stdin.
#[derive(Parser)]
#[command(name = "kernel-estimate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Zero-based index of the first node-id field on each line.
    column: Option<usize>,

    /// Exposure normalization strategy (naive, fast).
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Output format of the kernel table (tsv, json).
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Report progress every N steps.
    #[arg(long)]
    progress_every: Option<u64>,

    /// Stop after this many steps.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Largest node id accepted from the input.
    #[arg(long)]
    max_node_id: Option<u64>,

    /// Read parameters from a JSON file; command-line flags take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the table to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the JSON schema of the parameter file and exit.
    #[arg(long)]
    print_schema: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_level(false)
        .without_time()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.print_schema {
        let schema = serde_json::to_string_pretty(&EstimationParams::schema())?;
        println!("{schema}");
        return Ok(ExitCode::SUCCESS);
    }

    let Some(params) = resolve_params(&cli)? else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::FAILURE);
    };

    info!(
        column = params.column,
        strategy = %params.strategy,
        "estimating attachment kernel"
    );

    let stream = TsvEventStream::from_reader(io::stdin().lock(), params.column)
        .with_max_node_id(params.max_node_id);
    let mut estimation = KernelEstimation::new(
        build_estimator(params.strategy),
        Box::new(stream),
        params.max_steps,
        params.progress_frequency,
    )?;
    estimation.run().context("reading edge stream")?;

    match estimation.report() {
        Ok(report) => match &cli.output {
            Some(path) => report
                .export(path, params.format)
                .with_context(|| format!("writing {}", path.display()))?,
            None => {
                let mut out = BufWriter::new(io::stdout().lock());
                report.write(&mut out, params.format)?;
                out.flush()?;
            }
        },
        Err(EstimateError::InsufficientData) if params.format == ReportFormat::Tsv => {
            let mut out = io::stdout().lock();
            write_summary_header(&mut out, &estimation.summary())?;
            out.flush()?;
            return Err(EstimateError::InsufficientData.into());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(ExitCode::SUCCESS)
}

/// Merges the optional config file with the command-line flags.
/// `None` when no column was given anywhere.
fn resolve_params(cli: &Cli) -> Result<Option<EstimationParams>> {
    let mut params = match &cli.config {
        Some(path) => EstimationParams::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => match cli.column {
            Some(column) => EstimationParams::new(column),
            None => return Ok(None),
        },
    };

    if let Some(column) = cli.column {
        params.column = column;
    }
    if let Some(strategy) = cli.strategy {
        params.strategy = strategy;
    }
    if let Some(format) = cli.format {
        params.format = format;
    }
    if let Some(freq) = cli.progress_every {
        params.progress_frequency = freq;
    }
    if cli.max_steps.is_some() {
        params.max_steps = cli.max_steps;
    }
    if let Some(max) = cli.max_node_id {
        params.max_node_id = max;
    }
    params.validate()?;
    Ok(Some(params))
}
