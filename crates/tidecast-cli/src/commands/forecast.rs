use tidecast_core::{ForecastConfig, ObservationSeries, RawTable};

use crate::cli::ForecastArgs;
use crate::error::CliError;

use super::Report;

pub fn run(args: &ForecastArgs) -> Result<Report, CliError> {
    let table = RawTable::from_path(&args.file)?;
    let series = ObservationSeries::map_columns(&table, &args.date_column, &args.value_column)?;
    let config = ForecastConfig::new(args.horizon, !args.no_yearly_seasonality)?;

    let result = tidecast_core::run(&series, &config)?;

    Ok(Report::Forecast {
        horizon: config.horizon(),
        yearly_seasonality: config.yearly_seasonality(),
        used_yearly_seasonality: result.used_yearly_seasonality(),
        frequency: result.frequency(),
        rows: result.rows().len(),
        tail: result.tail(args.tail).to_vec(),
    })
}
