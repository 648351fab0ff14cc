//! API route handlers and the error-to-response mapping.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tidecast_core::{
    present, ForecastConfig, ForecastError, LoadError, ObservationSeries, RawTable, SchemaError,
    DEFAULT_HORIZON,
};
use uuid::Uuid;

use crate::state::{AppState, Mapping};

/// API failure, tagged with the pipeline stage it belongs to so the
/// dashboard can show stage-specific guidance: reselect columns for a
/// schema failure, change parameters for a forecast failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("no table uploaded yet")]
    NoTable,

    #[error("columns are not mapped yet")]
    NoMapping,
}

impl ApiError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Load(_) | Self::Upload(_) | Self::NoTable => "load",
            Self::Schema(_) | Self::NoMapping => "schema",
            Self::Forecast(_) => "forecast",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Load(_) | Self::Upload(_) => StatusCode::BAD_REQUEST,
            Self::Schema(_) | Self::Forecast(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoTable | Self::NoMapping => StatusCode::CONFLICT,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::Upload(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "stage": self.stage(),
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub columns: Vec<String>,
    pub rows: usize,
}

#[derive(Debug, Deserialize)]
pub struct MapRequest {
    pub date_column: String,
    pub value_column: String,
}

#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub preview: Vec<present::PreviewRow>,
    pub rows: usize,
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub horizon: Option<u32>,
    pub yearly_seasonality: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub run_id: Uuid,
    pub dashboard: present::Dashboard,
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Accept a CSV upload, replacing the session's table and clearing any
/// previous mapping.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut bytes = None;
    while let Some(field) = multipart.next_field().await? {
        if bytes.is_none() || field.name() == Some("file") {
            bytes = Some(field.bytes().await?);
        }
    }
    let bytes = bytes.ok_or_else(|| ApiError::Upload(String::from("no file in upload")))?;

    let table = RawTable::from_bytes(&bytes)?;
    tracing::info!(columns = table.headers().len(), rows = table.row_count(), "table uploaded");

    let response = UploadResponse {
        columns: table.headers().to_vec(),
        rows: table.row_count(),
    };

    let mut session = state.session.write().await;
    session.table = Some(table);
    session.mapping = None;

    Ok(Json(response))
}

/// Map the chosen columns onto the `ds`/`y` roles and return the head
/// preview. No forecast runs here. Any previous mapping is dropped up
/// front so a failed reselection never leaves a stale column choice
/// for a later forecast to run against.
pub async fn map(
    State(state): State<AppState>,
    Json(request): Json<MapRequest>,
) -> Result<Json<MapResponse>, ApiError> {
    let mut session = state.session.write().await;
    session.mapping = None;
    let table = session.table.as_ref().ok_or(ApiError::NoTable)?;

    let series =
        ObservationSeries::map_columns(table, &request.date_column, &request.value_column)?;
    let response = MapResponse {
        preview: present::preview(&series, present::PREVIEW_ROWS),
        rows: series.len(),
    };

    session.mapping = Some(Mapping {
        date_column: request.date_column,
        value_column: request.value_column,
        series,
    });

    Ok(Json(response))
}

/// Run one forecast against the current mapping. Synchronous within
/// the request: the response carries the full dashboard or a staged
/// error, never a partial result.
pub async fn forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let series = {
        let session = state.session.read().await;
        if session.table.is_none() {
            return Err(ApiError::NoTable);
        }
        session
            .mapping
            .as_ref()
            .ok_or(ApiError::NoMapping)?
            .series
            .clone()
    };

    let config = ForecastConfig::new(
        request.horizon.unwrap_or(DEFAULT_HORIZON),
        request.yearly_seasonality.unwrap_or(true),
    )?;

    let run_id = Uuid::new_v4();
    tracing::info!(%run_id, horizon = config.horizon(), "forecast run requested");

    let result = tidecast_core::run(&series, &config)?;
    let dashboard = present::render(&result, &series);

    Ok(Json(ForecastResponse { run_id, dashboard }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY_CSV: &str = "day,amount\n2024-01-01,1\n2024-01-02,2\n2024-01-03,3\n2024-01-04,4\n2024-01-05,5\n2024-01-06,6\n";

    #[tokio::test]
    async fn map_returns_head_preview_and_stores_mapping() {
        let state = AppState::default();
        state.session.write().await.table =
            Some(RawTable::from_bytes(DAILY_CSV.as_bytes()).expect("table"));

        let response = map(
            State(state.clone()),
            Json(MapRequest {
                date_column: String::from("day"),
                value_column: String::from("amount"),
            }),
        )
        .await
        .expect("map");

        assert_eq!(response.0.rows, 6);
        assert_eq!(response.0.preview.len(), 5);
        assert!(state.session.read().await.mapping.is_some());
    }

    #[tokio::test]
    async fn map_without_upload_is_a_load_stage_conflict() {
        let err = map(
            State(AppState::default()),
            Json(MapRequest {
                date_column: String::from("day"),
                value_column: String::from("amount"),
            }),
        )
        .await
        .expect_err("must fail");
        assert_eq!(err.stage(), "load");
        assert!(matches!(err, ApiError::NoTable));
    }

    #[tokio::test]
    async fn bad_column_choice_is_a_schema_stage_error() {
        let state = AppState::default();
        state.session.write().await.table =
            Some(RawTable::from_bytes(DAILY_CSV.as_bytes()).expect("table"));

        let err = map(
            State(state),
            Json(MapRequest {
                date_column: String::from("nope"),
                value_column: String::from("amount"),
            }),
        )
        .await
        .expect_err("must fail");
        assert_eq!(err.stage(), "schema");
    }

    #[tokio::test]
    async fn failed_remap_drops_the_previous_mapping() {
        let state = AppState::default();
        state.session.write().await.table =
            Some(RawTable::from_bytes(DAILY_CSV.as_bytes()).expect("table"));
        map(
            State(state.clone()),
            Json(MapRequest {
                date_column: String::from("day"),
                value_column: String::from("amount"),
            }),
        )
        .await
        .expect("map");

        // Reselecting an unparseable date column fails the remap.
        let err = map(
            State(state.clone()),
            Json(MapRequest {
                date_column: String::from("amount"),
                value_column: String::from("amount"),
            }),
        )
        .await
        .expect_err("must fail");
        assert_eq!(err.stage(), "schema");

        // The stale mapping is gone, so a forecast cannot silently run
        // against the old column choice.
        assert!(state.session.read().await.mapping.is_none());
        let err = forecast(
            State(state),
            Json(ForecastRequest {
                horizon: None,
                yearly_seasonality: None,
            }),
        )
        .await
        .expect_err("must fail");
        assert!(matches!(err, ApiError::NoMapping));
    }

    #[tokio::test]
    async fn forecast_runs_against_the_stored_mapping() {
        let state = AppState::default();
        state.session.write().await.table =
            Some(RawTable::from_bytes(DAILY_CSV.as_bytes()).expect("table"));
        map(
            State(state.clone()),
            Json(MapRequest {
                date_column: String::from("day"),
                value_column: String::from("amount"),
            }),
        )
        .await
        .expect("map");

        let response = forecast(
            State(state),
            Json(ForecastRequest {
                horizon: Some(3),
                yearly_seasonality: Some(false),
            }),
        )
        .await
        .expect("forecast");

        let dashboard = &response.0.dashboard;
        assert_eq!(dashboard.combined.ds.len(), 9);
        assert_eq!(dashboard.tail.len(), 5);
        assert!(!dashboard.used_yearly_seasonality);
    }

    #[tokio::test]
    async fn forecast_without_mapping_is_a_schema_stage_conflict() {
        let state = AppState::default();
        state.session.write().await.table =
            Some(RawTable::from_bytes(DAILY_CSV.as_bytes()).expect("table"));

        let err = forecast(
            State(state),
            Json(ForecastRequest {
                horizon: None,
                yearly_seasonality: None,
            }),
        )
        .await
        .expect_err("must fail");
        assert!(matches!(err, ApiError::NoMapping));
        assert_eq!(err.stage(), "schema");
    }

    #[tokio::test]
    async fn invalid_horizon_is_a_forecast_stage_error() {
        let state = AppState::default();
        state.session.write().await.table =
            Some(RawTable::from_bytes(DAILY_CSV.as_bytes()).expect("table"));
        map(
            State(state.clone()),
            Json(MapRequest {
                date_column: String::from("day"),
                value_column: String::from("amount"),
            }),
        )
        .await
        .expect("map");

        let err = forecast(
            State(state),
            Json(ForecastRequest {
                horizon: Some(400),
                yearly_seasonality: None,
            }),
        )
        .await
        .expect_err("must fail");
        assert_eq!(err.stage(), "forecast");
    }
}
