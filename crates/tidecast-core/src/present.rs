use serde::Serialize;

use crate::forecast::{ForecastResult, ForecastRow};
use crate::series::{Observation, ObservationSeries};

/// Rows shown in the tail-of-forecast preview table.
pub const TAIL_ROWS: usize = 5;
/// Rows shown in the post-mapping head preview.
pub const PREVIEW_ROWS: usize = 5;

/// Combined chart: history points, point estimate, and uncertainty
/// band over the full axis. `history` is `None` past the observed
/// range and for NaN observations, so gaps render as gaps.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedChart {
    pub ds: Vec<String>,
    pub history: Vec<Option<f64>>,
    pub yhat: Vec<f64>,
    pub yhat_lower: Vec<f64>,
    pub yhat_upper: Vec<f64>,
}

/// Decomposition chart: trend and seasonal contribution per axis point.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentsChart {
    pub ds: Vec<String>,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
}

/// One row of the post-mapping head preview.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub ds: String,
    pub y: Option<f64>,
}

/// Everything a dashboard needs to draw one completed run.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub combined: CombinedChart,
    pub components: ComponentsChart,
    pub tail: Vec<ForecastRow>,
    pub used_yearly_seasonality: bool,
}

/// Build the dashboard payloads for a completed run. Pure read path:
/// neither input is mutated and nothing is recomputed.
pub fn render(result: &ForecastResult, history: &ObservationSeries) -> Dashboard {
    let ds: Vec<String> = result
        .rows()
        .iter()
        .map(|row| row.ds.format_rfc3339())
        .collect();

    // The result axis is the sorted history plus the horizon; align
    // observed values positionally against a sorted copy.
    let mut observed: Vec<Observation> = history.observations().to_vec();
    observed.sort_by(|a, b| a.ds.cmp(&b.ds));
    let mut history_values: Vec<Option<f64>> = observed
        .iter()
        .map(|o| o.y.is_finite().then_some(o.y))
        .collect();
    history_values.resize(result.rows().len(), None);

    let combined = CombinedChart {
        ds: ds.clone(),
        history: history_values,
        yhat: result.rows().iter().map(|r| r.yhat).collect(),
        yhat_lower: result.rows().iter().map(|r| r.yhat_lower).collect(),
        yhat_upper: result.rows().iter().map(|r| r.yhat_upper).collect(),
    };

    let components = ComponentsChart {
        ds,
        trend: result.components().trend.clone(),
        seasonal: result.components().seasonal.clone(),
    };

    Dashboard {
        combined,
        components,
        tail: result.tail(TAIL_ROWS).to_vec(),
        used_yearly_seasonality: result.used_yearly_seasonality(),
    }
}

/// Head preview of a mapped series, shown before any run is triggered.
pub fn preview(series: &ObservationSeries, rows: usize) -> Vec<PreviewRow> {
    series
        .head(rows)
        .iter()
        .map(|o| PreviewRow {
            ds: o.ds.format_rfc3339(),
            y: o.y.is_finite().then_some(o.y),
        })
        .collect()
}
