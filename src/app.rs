//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - ingests the product and brand CSVs
//! - builds the growth report
//! - writes the JSON export and/or prints the terminal summary

use clap::Parser;

use crate::cli::{Command, ReportArgs, RunArgs, ShowArgs};
use crate::domain::ReportConfig;
use crate::error::AppError;
use crate::io::export::{read_report_json, validate_date_format, write_report_json};

pub mod pipeline;

/// Entry point for the `salesgrowth` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    crate::logging::initialize();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Summary(args) => handle_summary(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args.run, Some(args.output.clone()), args.summary)?;
    execute(&config)
}

fn handle_summary(args: RunArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args, None, true)?;
    execute(&config)
}

/// Run the pipeline for a resolved configuration and emit its outputs.
///
/// The report is fully built before any file is written, so a failed run
/// never leaves a partial export behind.
pub fn execute(config: &ReportConfig) -> Result<(), AppError> {
    let report = pipeline::run_report(config)?;

    if let Some(path) = &config.output {
        write_report_json(path, &report, &config.date_format)?;
    }
    if config.print_summary {
        println!("{}", crate::report::format_run_summary(&report, config));
    }

    tracing::info!(
        products = report.products.len(),
        brands = report.brands.len(),
        "report run complete"
    );
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let value = read_report_json(&args.report)?;
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| AppError::new(4, format!("Failed to format report JSON: {e}")))?;
    println!("{text}");
    Ok(())
}

pub fn report_config_from_args(
    args: &RunArgs,
    output: Option<std::path::PathBuf>,
    print_summary: bool,
) -> Result<ReportConfig, AppError> {
    validate_date_format(&args.date_format)?;
    Ok(ReportConfig {
        product_csv: args.products.clone(),
        brand_csv: args.brands.clone(),
        output,
        date_format: args.date_format.clone(),
        print_summary,
        parallel: !args.sequential,
    })
}

/// Rewrite argv so `salesgrowth` defaults to `salesgrowth report`.
///
/// Rules:
/// - `salesgrowth`                          -> `salesgrowth report`
/// - `salesgrowth --products p.csv ...`     -> `salesgrowth report --products p.csv ...`
/// - `salesgrowth --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "summary" | "show");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    argv
}
