use thiserror::Error;

/// CLI-level error categories mapped to exit codes, one per pipeline
/// stage so scripts can tell a bad file from a bad column choice from
/// a failed model run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] tidecast_core::LoadError),

    #[error(transparent)]
    Schema(#[from] tidecast_core::SchemaError),

    #[error(transparent)]
    Forecast(#[from] tidecast_core::ForecastError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Schema(_) => 2,
            Self::Load(_) => 3,
            Self::Forecast(_) => 4,
            Self::Serialization(_) => 10,
        }
    }
}
