use tidecast_core::{present, ObservationSeries, RawTable};

use crate::cli::PreviewArgs;
use crate::error::CliError;

use super::Report;

pub fn run(args: &PreviewArgs) -> Result<Report, CliError> {
    let table = RawTable::from_path(&args.file)?;
    let series = ObservationSeries::map_columns(&table, &args.date_column, &args.value_column)?;

    Ok(Report::Preview {
        rows: series.len(),
        usable_rows: series.usable_rows(),
        preview: present::preview(&series, args.rows),
    })
}
