//! Perron command-line tool.
//!
//! Computes certified Perron-Frobenius eigenvectors of integer matrices read
//! from JSON files, and compares decimal approximations of algebraic numbers.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use perron_core::approximation::AlgebraicApproximation;
use perron_core::config::RefinementConfig;
use perron_core::error::{ErrorKind, PerronError};
use perron_core::matrix::Matrix;
use perron_core::traits::{PerronFrobeniusSolver, RefinableCoordinate};
use perron_eigen::solver::PowerIterationSolver;
use serde::Serialize;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "perron", version, about = "Certified Perron-Frobenius eigenvectors")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the normalized Perron eigenvector of a matrix.
    Solve(SolveArgs),
    /// Compare two approximations of algebraic numbers.
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// JSON file holding the matrix as an array of rows
    #[arg(short, long)]
    matrix: PathBuf,

    /// JSON file holding a condition matrix whose image of the eigenvector
    /// must be nonnegative
    #[arg(short, long)]
    condition: Option<PathBuf>,

    /// Decimal places to report for each coordinate
    #[arg(short, long)]
    accuracy: Option<u32>,

    /// Iteration budget per refinement call
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Base-10 logarithm of the coordinate height bound
    #[arg(long)]
    log_height: Option<u32>,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Left-hand decimal literal
    left: String,

    /// Right-hand decimal literal
    right: String,

    /// Degree bound shared by both numbers
    #[arg(short, long, default_value_t = 1)]
    degree: u32,

    /// Height bound shared by both numbers
    #[arg(long, default_value_t = 1)]
    height: u64,
}

/// Result of `perron solve`, as printed with `--json`.
#[derive(Serialize, Debug)]
struct SolveReport {
    dimension: usize,
    certified: bool,
    eigenvalue: AlgebraicApproximation,
    eigenvector: Vec<AlgebraicApproximation>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    if let Err(e) = run(cli.command) {
        error!("{e:#}");
        eprintln!("error: {}", describe(&e));
        process::exit(exit_code(&e));
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Solve(args) => {
            let json = args.json;
            let report = solve(args)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Commands::Compare(args) => {
            let ordering = compare(&args)?;
            let symbol = match ordering {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            println!("{} {} {}", args.left, symbol, args.right);
            Ok(())
        }
    }
}

/// Environment configuration overlaid with command-line flags.
fn refinement_config(args: &SolveArgs) -> Result<RefinementConfig> {
    let mut config = RefinementConfig::from_env().map_err(PerronError::from)?;
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if args.log_height.is_some() {
        config.log_height = args.log_height;
    }
    Ok(config)
}

fn load_matrix(path: &Path) -> Result<Matrix> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read matrix file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid matrix in {}", path.display()))
}

fn solve(args: SolveArgs) -> Result<SolveReport> {
    let config = refinement_config(&args)?;
    let budget = config.budget();
    let matrix = load_matrix(&args.matrix)?;
    let condition = args.condition.as_deref().map(load_matrix).transpose()?;
    info!(
        dimension = matrix.row_count(),
        certified = condition.is_some(),
        "solving"
    );

    let solver = PowerIterationSolver::new(config);
    let mut pair = solver
        .perron_frobenius_eigen(&matrix, condition.as_ref())
        .map_err(PerronError::from)?;

    let mut eigenvector = Vec::with_capacity(pair.eigenvector.len());
    for entry in &mut pair.eigenvector {
        let index = entry.index();
        let accuracy = args.accuracy.unwrap_or_else(|| entry.accuracy_needed());
        let value = entry
            .increase_accuracy(accuracy, &budget)
            .map_err(PerronError::from)?;
        debug!(index, %value, "coordinate");
        eigenvector.push(value.clone());
    }

    Ok(SolveReport {
        dimension: eigenvector.len(),
        certified: condition.is_some(),
        eigenvalue: pair.eigenvalue,
        eigenvector,
    })
}

fn compare(args: &CompareArgs) -> Result<Ordering> {
    let parse = |text: &str| {
        AlgebraicApproximation::from_string(text, args.degree, args.height)
            .map_err(PerronError::from)
            .with_context(|| format!("Invalid approximation: {text}"))
    };
    let left = parse(&args.left)?;
    let right = parse(&args.right)?;
    Ok(left.compare(&right).map_err(PerronError::from)?)
}

fn print_report(report: &SolveReport) {
    println!("dimension:  {}", report.dimension);
    println!("certified:  {}", report.certified);
    println!("eigenvalue: {}", report.eigenvalue);
    for (i, value) in report.eigenvector.iter().enumerate() {
        println!("  v[{i}] = {value}");
    }
}

fn kind(e: &anyhow::Error) -> Option<ErrorKind> {
    e.downcast_ref::<PerronError>().map(PerronError::kind)
}

/// One-line explanation keyed on the error kind.
fn describe(e: &anyhow::Error) -> String {
    match kind(e) {
        Some(ErrorKind::InsufficientPrecision) => format!("insufficient accuracy ({e})"),
        Some(ErrorKind::AssumptionViolated) => format!("matrix is reducible or imprimitive ({e})"),
        Some(ErrorKind::ComputationUncertain) => {
            format!("matrix is probably reducible; raise the budget to decide ({e})")
        }
        Some(ErrorKind::InvalidInput) | None => format!("{e:#}"),
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    match kind(e) {
        Some(ErrorKind::InsufficientPrecision) => 2,
        Some(ErrorKind::AssumptionViolated) => 3,
        Some(ErrorKind::ComputationUncertain) => 4,
        Some(ErrorKind::InvalidInput) | None => 1,
    }
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text on stderr.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
