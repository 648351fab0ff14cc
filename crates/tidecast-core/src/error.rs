use thiserror::Error;

/// Failures while reading uploaded content into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input is not parseable as a delimited table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("input has no header row")]
    Empty,

    #[error("input must have at least 2 columns, found {found}")]
    TooFewColumns { found: usize },
}

/// Failures while projecting a table onto the `ds`/`y` roles.
///
/// These mean the user should reselect columns, not change forecast
/// parameters, so they stay distinct from [`ForecastError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("column '{name}' not found in the uploaded table")]
    MissingColumn { name: String },

    #[error("row {row}: '{value}' is not parseable as a date/time")]
    Timestamp { row: usize, value: String },

    #[error("table has no data rows to map")]
    EmptyTable,
}

/// Failures while configuring, fitting, or predicting the model.
///
/// All variants are terminal for the run: no partial result is kept
/// and nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("horizon must be between {min} and {max}, got {value}")]
    InvalidHorizon { value: u32, min: u32, max: u32 },

    #[error("need at least 2 usable rows to fit a model, found {rows}")]
    InsufficientData { rows: usize },

    #[error("forecast model error: {0}")]
    Model(String),
}

/// Top-level error for callers running the whole pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}
