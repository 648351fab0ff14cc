//! Core pipeline for tidecast.
//!
//! This crate contains:
//! - The input loader turning uploaded CSV bytes into a [`RawTable`]
//! - The schema mapper projecting a table onto the `ds`/`y` roles
//! - The forecast orchestrator wrapping the additive model
//! - Read-only presenter payloads for dashboards and CLIs
//!
//! Data flows strictly forward: load → map → run → render. Every run
//! recomputes from the current table and config; nothing is persisted.

pub mod config;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod present;
pub mod series;
pub mod table;

pub use config::{ForecastConfig, DEFAULT_HORIZON, MAX_HORIZON, MIN_HORIZON};
pub use domain::{Frequency, Timestamp, TimestampParseError};
pub use error::{ForecastError, LoadError, PipelineError, SchemaError};
pub use forecast::{run, ForecastComponents, ForecastResult, ForecastRow, INTERVAL_LEVEL};
pub use present::{render, CombinedChart, ComponentsChart, Dashboard, PreviewRow, TAIL_ROWS};
pub use series::{Observation, ObservationSeries, TIMESTAMP_ROLE, VALUE_ROLE};
pub use table::RawTable;
