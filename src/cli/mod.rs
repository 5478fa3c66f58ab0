//! Command-line parsing for the sales growth reporter.
//!
//! Argument parsing and command dispatch stay separate from the engine.
//! Path options fall back to environment variables (a `.env` file is loaded
//! before parsing).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_DATE_FORMAT;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "salesgrowth",
    version,
    about = "Period-over-period sales growth report for products and brands"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the growth report and write the dashboard JSON.
    Report(ReportArgs),
    /// Build the growth report and print it to the terminal without writing a file.
    Summary(RunArgs),
    /// Pretty-print a previously exported report JSON.
    Show(ShowArgs),
}

/// Inputs and processing options shared by `report` and `summary`.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Product sales CSV (period_id, period_name, week_commencing_date, barcode_no, product_name, gross_sales, units_sold).
    #[arg(long, value_name = "CSV", env = "SALES_PRODUCT_CSV")]
    pub products: PathBuf,

    /// Brand sales CSV (period_id, period_name, week_commencing_date, brand_id, brand_name, gross_sales, units_sold).
    #[arg(long, value_name = "CSV", env = "SALES_BRAND_CSV")]
    pub brands: PathBuf,

    /// strftime pattern for week-commencing dates in the output.
    #[arg(long, env = "SALES_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Run the product and brand pipelines one after the other.
    #[arg(long)]
    pub sequential: bool,
}

/// Options for `report`.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Where to write the report JSON.
    #[arg(long, short = 'o', value_name = "JSON", env = "SALES_REPORT_JSON", default_value = "output/results.json")]
    pub output: PathBuf,

    /// Also print the terminal summary.
    #[arg(long)]
    pub summary: bool,
}

/// Options for `show`.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Report JSON produced by `salesgrowth report`.
    #[arg(long, value_name = "JSON", env = "SALES_REPORT_JSON", default_value = "output/results.json")]
    pub report: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_args_parse_with_defaults() {
        let cli = Cli::try_parse_from([
            "salesgrowth",
            "report",
            "--products",
            "p.csv",
            "--brands",
            "b.csv",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.run.products, PathBuf::from("p.csv"));
        assert!(!args.run.sequential);
        assert!(!args.summary);
        // Defaults may be overridden by the environment; only check when unset.
        if std::env::var_os("SALES_DATE_FORMAT").is_none() {
            assert_eq!(args.run.date_format, DEFAULT_DATE_FORMAT);
        }
    }
}
