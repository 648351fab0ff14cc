//! CLI argument definitions for tidecast.
//!
//! The flag set mirrors the dashboard's controls: which file, which
//! two columns, how far to forecast, and whether to model yearly
//! seasonality.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `columns` | List the column names of a CSV file |
//! | `preview` | Map two columns to `ds`/`y` and show the first rows |
//! | `forecast` | Fit the model and print the forecast tail |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tidecast_core::DEFAULT_HORIZON;

/// Forecast CSV time series from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "tidecast",
    author,
    version,
    about = "CSV time series forecasting CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text tables for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the column names of a CSV file.
    Columns(ColumnsArgs),
    /// Map the chosen columns onto `ds`/`y` and preview the head.
    Preview(PreviewArgs),
    /// Fit the forecast model and print the tail of the result.
    Forecast(ForecastArgs),
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Path to the CSV file.
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Path to the CSV file.
    pub file: PathBuf,

    /// Column holding the time axis.
    #[arg(long)]
    pub date_column: String,

    /// Column holding the observed metric.
    #[arg(long)]
    pub value_column: String,

    /// Number of leading rows to show.
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Path to the CSV file.
    pub file: PathBuf,

    /// Column holding the time axis.
    #[arg(long)]
    pub date_column: String,

    /// Column holding the observed metric.
    #[arg(long)]
    pub value_column: String,

    /// Periods to forecast past the last observation (1-365).
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    pub horizon: u32,

    /// Disable the yearly seasonality component.
    #[arg(long, default_value_t = false)]
    pub no_yearly_seasonality: bool,

    /// Number of trailing forecast rows to print.
    #[arg(long, default_value_t = 5)]
    pub tail: usize,
}
