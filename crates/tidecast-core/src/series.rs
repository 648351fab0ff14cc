use serde::{Deserialize, Serialize};

use crate::domain::Timestamp;
use crate::error::SchemaError;
use crate::table::RawTable;

/// Fixed semantic role name for the time axis column.
pub const TIMESTAMP_ROLE: &str = "ds";
/// Fixed semantic role name for the observed metric column.
pub const VALUE_ROLE: &str = "y";

/// One mapped row: canonical timestamp plus observed value.
///
/// `y` is `NaN` when the source cell was empty or non-numeric; such
/// rows pass through to the orchestrator unfiltered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Observation {
    pub ds: Timestamp,
    pub y: f64,
}

/// The two-column projection of an uploaded table, in source order.
///
/// Timestamps are not required to be sorted or unique here; ordering
/// is the orchestrator's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Project `table` onto the `ds`/`y` roles using the two chosen
    /// columns. The same column may serve both roles. Output length
    /// always equals the table's row count: no rows are dropped or
    /// added, only renamed and parsed.
    pub fn map_columns(
        table: &RawTable,
        date_column: &str,
        value_column: &str,
    ) -> Result<Self, SchemaError> {
        let date_index = table
            .column_index(date_column)
            .ok_or_else(|| SchemaError::MissingColumn {
                name: date_column.to_owned(),
            })?;
        let value_index =
            table
                .column_index(value_column)
                .ok_or_else(|| SchemaError::MissingColumn {
                    name: value_column.to_owned(),
                })?;

        if table.row_count() == 0 {
            return Err(SchemaError::EmptyTable);
        }

        let mut observations = Vec::with_capacity(table.row_count());
        for (row, cells) in table.rows().iter().enumerate() {
            let ds_cell = &cells[date_index];
            let ds = Timestamp::parse(ds_cell).map_err(|_| SchemaError::Timestamp {
                row,
                value: ds_cell.clone(),
            })?;
            let y = cells[value_index].trim().parse::<f64>().unwrap_or(f64::NAN);
            observations.push(Observation { ds, y });
        }

        Ok(Self { observations })
    }

    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Rows with a finite `y`, the population the model can fit on.
    pub fn usable_rows(&self) -> usize {
        self.observations.iter().filter(|o| o.y.is_finite()).count()
    }

    pub fn head(&self, rows: usize) -> &[Observation] {
        &self.observations[..rows.min(self.observations.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> RawTable {
        RawTable::from_bytes(csv.as_bytes()).expect("test table")
    }

    #[test]
    fn maps_chosen_columns_to_roles() {
        let table = table("day,region,amount\n2024-01-01,eu,10.5\n2024-01-02,eu,11\n");
        let series = ObservationSeries::map_columns(&table, "day", "amount").expect("must map");
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0].y, 10.5);
        assert_eq!(
            series.observations()[1].ds,
            Timestamp::parse("2024-01-02").expect("ts")
        );
    }

    #[test]
    fn output_length_equals_row_count() {
        let table = table("day,amount\n2024-01-03,3\n2024-01-01,1\n2024-01-01,1\n");
        let series = ObservationSeries::map_columns(&table, "day", "amount").expect("must map");
        // Unsorted and duplicated timestamps are kept as-is.
        assert_eq!(series.len(), table.row_count());
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let table = table("day,amount\n2024-01-01,1\n");
        let err = ObservationSeries::map_columns(&table, "date", "amount").expect_err("must fail");
        assert_eq!(
            err,
            SchemaError::MissingColumn {
                name: "date".to_owned()
            }
        );
    }

    #[test]
    fn unparseable_timestamp_reports_row_and_value() {
        let table = table("day,amount\n2024-01-01,1\nyesterday,2\n");
        let err = ObservationSeries::map_columns(&table, "day", "amount").expect_err("must fail");
        assert_eq!(
            err,
            SchemaError::Timestamp {
                row: 1,
                value: "yesterday".to_owned()
            }
        );
    }

    #[test]
    fn same_column_for_both_roles_is_allowed() {
        let table = table("day,amount\n2024-01-01,1\n2024-01-02,2\n");
        let series = ObservationSeries::map_columns(&table, "day", "day").expect("must map");
        assert_eq!(series.len(), 2);
        // Date text is not numeric, so every y is NaN and nothing is usable.
        assert_eq!(series.usable_rows(), 0);
    }

    #[test]
    fn non_numeric_values_become_nan_and_pass_through() {
        let table = table("day,amount\n2024-01-01,1\n2024-01-02,\n2024-01-03,n/a\n");
        let series = ObservationSeries::map_columns(&table, "day", "amount").expect("must map");
        assert_eq!(series.len(), 3);
        assert!(series.observations()[1].y.is_nan());
        assert!(series.observations()[2].y.is_nan());
        assert_eq!(series.usable_rows(), 1);
    }

    #[test]
    fn empty_table_is_a_schema_error() {
        let table = table("day,amount\n");
        let err = ObservationSeries::map_columns(&table, "day", "amount").expect_err("must fail");
        assert_eq!(err, SchemaError::EmptyTable);
    }
}
