use std::sync::Arc;

use tidecast_core::{ObservationSeries, RawTable};
use tokio::sync::RwLock;

/// Shared handle to the single user session.
#[derive(Clone, Default)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
}

/// Everything a session holds between requests: the current upload and
/// the current column mapping. A new upload replaces the table and
/// clears the mapping; nothing survives a restart.
#[derive(Default)]
pub struct Session {
    pub table: Option<RawTable>,
    pub mapping: Option<Mapping>,
}

/// The user's column selection plus the series it produced.
#[derive(Clone)]
pub struct Mapping {
    pub date_column: String,
    pub value_column: String,
    pub series: ObservationSeries,
}
