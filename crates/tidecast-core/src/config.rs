use serde::Serialize;

use crate::error::ForecastError;

pub const MIN_HORIZON: u32 = 1;
pub const MAX_HORIZON: u32 = 365;
pub const DEFAULT_HORIZON: u32 = 90;

/// Per-run forecast parameters, immutable once a run is triggered.
///
/// Only the horizon and the yearly-seasonality toggle are exposed;
/// every other model knob stays at the library default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastConfig {
    horizon: u32,
    yearly_seasonality: bool,
}

impl ForecastConfig {
    pub fn new(horizon: u32, yearly_seasonality: bool) -> Result<Self, ForecastError> {
        if !(MIN_HORIZON..=MAX_HORIZON).contains(&horizon) {
            return Err(ForecastError::InvalidHorizon {
                value: horizon,
                min: MIN_HORIZON,
                max: MAX_HORIZON,
            });
        }

        Ok(Self {
            horizon,
            yearly_seasonality,
        })
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn yearly_seasonality(&self) -> bool {
        self.yearly_seasonality
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            yearly_seasonality: true,
        }
    }
}
