mod columns;
mod forecast;
mod preview;

use serde::Serialize;
use tidecast_core::present::PreviewRow;
use tidecast_core::{ForecastRow, Frequency};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command produced, in a shape both output formats can render.
#[derive(Debug, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Columns {
        file: String,
        columns: Vec<String>,
        rows: usize,
    },
    Preview {
        rows: usize,
        usable_rows: usize,
        preview: Vec<PreviewRow>,
    },
    Forecast {
        horizon: u32,
        yearly_seasonality: bool,
        used_yearly_seasonality: bool,
        frequency: Frequency,
        rows: usize,
        tail: Vec<ForecastRow>,
    },
}

pub fn run(cli: &Cli) -> Result<Report, CliError> {
    match &cli.command {
        Command::Columns(args) => columns::run(args),
        Command::Preview(args) => preview::run(args),
        Command::Forecast(args) => forecast::run(args),
    }
}
