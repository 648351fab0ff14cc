use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::LoadError;

/// Minimum column count for a usable upload (one date, one value).
pub const MIN_COLUMNS: usize = 2;

/// Uploaded tabular data, as parsed: named columns over string cells.
///
/// Cell typing is deferred to the schema mapper; the loader keeps
/// whatever the source file contained. The table is discarded once
/// mapped, so there is no columnar storage here.
#[derive(Debug, Clone, Serialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse delimited text from a reader. The stream is read exactly
    /// once; any parse failure propagates, never an empty table.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(LoadError::Empty);
        }
        if headers.len() < MIN_COLUMNS {
            return Err(LoadError::TooFewColumns {
                found: headers.len(),
            });
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_owned).collect();
            // Ragged rows are padded so every row indexes like the header.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        Self::from_reader(bytes)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
