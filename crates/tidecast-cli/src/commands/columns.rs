use tidecast_core::RawTable;

use crate::cli::ColumnsArgs;
use crate::error::CliError;

use super::Report;

pub fn run(args: &ColumnsArgs) -> Result<Report, CliError> {
    let table = RawTable::from_path(&args.file)?;
    Ok(Report::Columns {
        file: args.file.display().to_string(),
        columns: table.headers().to_vec(),
        rows: table.row_count(),
    })
}
