use crate::cli::OutputFormat;
use crate::commands::Report;
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(report),
    }

    Ok(())
}

fn render_table(report: &Report) {
    match report {
        Report::Columns {
            file,
            columns,
            rows,
        } => {
            println!("file   : {file}");
            println!("rows   : {rows}");
            println!("columns:");
            for column in columns {
                println!("  - {column}");
            }
        }
        Report::Preview {
            rows,
            usable_rows,
            preview,
        } => {
            println!("rows        : {rows}");
            println!("usable rows : {usable_rows}");
            println!("{:<22} {:>14}", "ds", "y");
            for row in preview {
                match row.y {
                    Some(y) => println!("{:<22} {:>14.4}", row.ds, y),
                    None => println!("{:<22} {:>14}", row.ds, "-"),
                }
            }
        }
        Report::Forecast {
            horizon,
            yearly_seasonality,
            used_yearly_seasonality,
            frequency,
            rows,
            tail,
        } => {
            println!("horizon            : {horizon}");
            println!("yearly seasonality : {yearly_seasonality} (applied: {used_yearly_seasonality})");
            println!("frequency          : {frequency:?}");
            println!("result rows        : {rows}");
            println!(
                "{:<22} {:>14} {:>14} {:>14}",
                "ds", "yhat", "yhat_lower", "yhat_upper"
            );
            for row in tail {
                println!(
                    "{:<22} {:>14.4} {:>14.4} {:>14.4}",
                    row.ds.format_rfc3339(),
                    row.yhat,
                    row.yhat_lower,
                    row.yhat_upper
                );
            }
        }
    }
}
