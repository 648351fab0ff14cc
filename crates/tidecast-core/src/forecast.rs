use augurs::ets::AutoETS;
use augurs::forecaster::transforms::LinearInterpolator;
use augurs::forecaster::{Forecaster, Transformer};
use augurs::mstl::MSTLModel;
use augurs::{Fit, Forecast};
use serde::Serialize;

use crate::config::ForecastConfig;
use crate::domain::{Frequency, Timestamp};
use crate::error::ForecastError;
use crate::series::{Observation, ObservationSeries};

/// Prediction interval level. Fixed at the model's dashboard default;
/// not user-configurable.
pub const INTERVAL_LEVEL: f64 = 0.80;

/// The underlying model's own fit precondition.
const MIN_USABLE_ROWS: usize = 2;

/// One point on the result axis: point estimate plus uncertainty
/// interval, over both the historical range and the horizon.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ForecastRow {
    pub ds: Timestamp,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Additive decomposition of the point estimate over the full axis.
///
/// `trend` is the non-seasonal trend model's path; `seasonal` is the
/// remainder of the combined estimate over that trend, all zeros when
/// the seasonal model was not applied.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastComponents {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
}

/// Output of one forecast run. Read-only; a new run replaces it
/// wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    rows: Vec<ForecastRow>,
    components: ForecastComponents,
    history_len: usize,
    frequency: Frequency,
    used_yearly_seasonality: bool,
}

impl ForecastResult {
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn components(&self) -> &ForecastComponents {
        &self.components
    }

    /// Number of leading rows that cover the observed range; the rest
    /// extend past the last observation.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Whether the seasonal model was actually applied. False when the
    /// toggle was off or the series was too short for the period.
    pub fn used_yearly_seasonality(&self) -> bool {
        self.used_yearly_seasonality
    }

    pub fn tail(&self, rows: usize) -> &[ForecastRow] {
        &self.rows[self.rows.len().saturating_sub(rows)..]
    }
}

/// Fit the configured model against `series` and predict over the
/// observed range plus `config.horizon()` future periods.
///
/// The series is sorted into a working copy first; the input is not
/// mutated. Interior NaN values are linearly interpolated by the
/// forecaster's transform. Identical inputs produce identical results.
pub fn run(
    series: &ObservationSeries,
    config: &ForecastConfig,
) -> Result<ForecastResult, ForecastError> {
    let mut observations: Vec<Observation> = series.observations().to_vec();
    observations.sort_by(|a, b| a.ds.cmp(&b.ds));

    let usable = observations.iter().filter(|o| o.y.is_finite()).count();
    if usable < MIN_USABLE_ROWS {
        return Err(ForecastError::InsufficientData { rows: usable });
    }

    let timestamps: Vec<Timestamp> = observations.iter().map(|o| o.ds).collect();
    let values: Vec<f64> = observations.iter().map(|o| o.y).collect();
    let horizon = config.horizon() as usize;

    let frequency = Frequency::infer(&timestamps);
    let period = frequency.periods_per_year();
    // The seasonal period must fit twice into the series to be
    // estimable; otherwise fall back to the plain trend model.
    let seasonal = config.yearly_seasonality() && period > 1 && period < values.len() / 2;

    tracing::debug!(
        rows = values.len(),
        usable,
        horizon,
        ?frequency,
        seasonal,
        "fitting forecast model"
    );

    let (in_sample, future) = if seasonal {
        fit_predict_mstl(&values, period, horizon)?
    } else {
        fit_predict_ets(&values, horizon)?
    };

    let trend = if seasonal {
        // The same trend model MSTL forecasts with, fitted without the
        // seasonal decomposition.
        let (trend_in, trend_out) = fit_predict_ets(&values, horizon)?;
        let mut trend = trend_in.point;
        trend.extend(trend_out.point);
        trend
    } else {
        let mut trend = in_sample.point.clone();
        trend.extend(future.point.clone());
        trend
    };

    let mut rows = Vec::with_capacity(values.len() + horizon);
    push_rows(&mut rows, &timestamps, &in_sample);
    // Non-empty: the usable-row check above already passed.
    let last = timestamps[timestamps.len() - 1];
    let future_axis: Vec<Timestamp> = (1..=horizon as i64)
        .map(|step| frequency.advance(last, step))
        .collect();
    push_rows(&mut rows, &future_axis, &future);

    let seasonal_component: Vec<f64> = rows
        .iter()
        .zip(trend.iter())
        .map(|(row, trend)| if seasonal { row.yhat - trend } else { 0.0 })
        .collect();

    Ok(ForecastResult {
        history_len: values.len(),
        rows,
        components: ForecastComponents {
            trend,
            seasonal: seasonal_component,
        },
        frequency,
        used_yearly_seasonality: seasonal,
    })
}

fn push_rows(rows: &mut Vec<ForecastRow>, axis: &[Timestamp], forecast: &Forecast) {
    for (index, &ds) in axis.iter().enumerate() {
        let yhat = forecast.point[index];
        let (yhat_lower, yhat_upper) = match &forecast.intervals {
            Some(intervals) => (intervals.lower[index], intervals.upper[index]),
            // Degenerate band when the library yields no intervals.
            None => (yhat, yhat),
        };
        rows.push(ForecastRow {
            ds,
            yhat,
            yhat_lower,
            yhat_upper,
        });
    }
}

fn fit_predict_ets(
    values: &[f64],
    horizon: usize,
) -> Result<(Forecast, Forecast), ForecastError> {
    let mut forecaster = Forecaster::new(AutoETS::non_seasonal()).with_transformers(transformers());
    fit_predict(&mut forecaster, values, horizon)
}

fn fit_predict_mstl(
    values: &[f64],
    period: usize,
    horizon: usize,
) -> Result<(Forecast, Forecast), ForecastError> {
    let trend_model = AutoETS::non_seasonal().into_trend_model();
    let model = MSTLModel::new(vec![period], trend_model);
    let mut forecaster = Forecaster::new(model).with_transformers(transformers());
    fit_predict(&mut forecaster, values, horizon)
}

fn fit_predict<M: Fit>(
    forecaster: &mut Forecaster<M>,
    values: &[f64],
    horizon: usize,
) -> Result<(Forecast, Forecast), ForecastError> {
    forecaster
        .fit(values)
        .map_err(|e| ForecastError::Model(e.to_string()))?;
    let in_sample = forecaster
        .predict_in_sample(INTERVAL_LEVEL)
        .map_err(|e| ForecastError::Model(e.to_string()))?;
    let future = forecaster
        .predict(horizon, INTERVAL_LEVEL)
        .map_err(|e| ForecastError::Model(e.to_string()))?;
    Ok((in_sample, future))
}

fn transformers() -> Vec<Box<dyn Transformer>> {
    vec![Box::new(LinearInterpolator::default())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    fn daily_series(values: &[f64]) -> ObservationSeries {
        let start = Timestamp::parse("2024-01-01").expect("ts");
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &y)| Observation {
                ds: Frequency::Daily.advance(start, i as i64),
                y,
            })
            .collect();
        ObservationSeries::from_observations(observations)
    }

    fn monthly_series(values: &[f64]) -> ObservationSeries {
        let start = Timestamp::parse("2022-01-01").expect("ts");
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &y)| Observation {
                ds: Frequency::Monthly.advance(start, i as i64),
                y,
            })
            .collect();
        ObservationSeries::from_observations(observations)
    }

    #[test]
    fn axis_length_is_history_plus_horizon() {
        let series = daily_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let config = ForecastConfig::new(1, false).expect("config");
        let result = run(&series, &config).expect("run");
        assert_eq!(result.rows().len(), series.len() + 1);
        assert_eq!(result.history_len(), series.len());
    }

    #[test]
    fn future_axis_continues_the_inferred_frequency() {
        let series = daily_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let config = ForecastConfig::new(2, false).expect("config");
        let result = run(&series, &config).expect("run");
        assert_eq!(result.frequency(), Frequency::Daily);
        let tail = result.tail(2);
        assert_eq!(tail[0].ds, Timestamp::parse("2024-01-06").expect("ts"));
        assert_eq!(tail[1].ds, Timestamp::parse("2024-01-07").expect("ts"));
    }

    #[test]
    fn fewer_than_two_usable_rows_is_insufficient_data() {
        let series = daily_series(&[1.0, f64::NAN, f64::NAN]);
        let config = ForecastConfig::new(5, false).expect("config");
        let err = run(&series, &config).expect_err("must fail");
        assert_eq!(err, ForecastError::InsufficientData { rows: 1 });
    }

    #[test]
    fn identical_inputs_yield_identical_results() {
        let series = daily_series(&[3.0, 5.0, 4.0, 6.0, 5.5, 7.0, 6.5, 8.0, 7.5, 9.0]);
        let config = ForecastConfig::new(7, false).expect("config");
        let first = run(&series, &config).expect("run");
        let second = run(&series, &config).expect("run");
        for (a, b) in first.rows().iter().zip(second.rows()) {
            assert_eq!(a.ds, b.ds);
            assert!((a.yhat - b.yhat).abs() < 1e-9);
            assert!((a.yhat_lower - b.yhat_lower).abs() < 1e-9);
            assert!((a.yhat_upper - b.yhat_upper).abs() < 1e-9);
        }
    }

    #[test]
    fn unsorted_input_is_sorted_before_fitting() {
        let sorted = daily_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut shuffled: Vec<Observation> = sorted.observations().to_vec();
        shuffled.swap(0, 4);
        shuffled.swap(2, 5);
        let series = ObservationSeries::from_observations(shuffled);
        let config = ForecastConfig::new(3, false).expect("config");

        let from_sorted = run(&sorted, &config).expect("run");
        let from_shuffled = run(&series, &config).expect("run");
        for (a, b) in from_sorted.rows().iter().zip(from_shuffled.rows()) {
            assert_eq!(a.ds, b.ds);
            assert!((a.yhat - b.yhat).abs() < 1e-9);
        }
    }

    #[test]
    fn linear_monthly_history_extrapolates_monotonically() {
        let values: Vec<f64> = (1..=24).map(f64::from).collect();
        let series = monthly_series(&values);
        let config = ForecastConfig::new(3, false).expect("config");
        let result = run(&series, &config).expect("run");

        assert_eq!(result.rows().len(), 27);
        let tail = result.tail(3);
        assert!(tail[0].yhat > 20.0, "tail should continue the trend, got {}", tail[0].yhat);
        assert!(tail[1].yhat >= tail[0].yhat - 1e-6);
        assert!(tail[2].yhat >= tail[1].yhat - 1e-6);
    }

    #[test]
    fn short_series_skips_yearly_seasonality() {
        // 24 monthly rows cannot hold two full yearly periods.
        let values: Vec<f64> = (1..=24).map(f64::from).collect();
        let series = monthly_series(&values);
        let config = ForecastConfig::new(3, true).expect("config");
        let result = run(&series, &config).expect("run");
        assert!(!result.used_yearly_seasonality());
        assert!(result.components().seasonal.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn long_monthly_series_applies_yearly_seasonality() {
        // Five years of monthly data with a yearly cycle on a trend.
        let values: Vec<f64> = (0..60)
            .map(|i| {
                100.0
                    + 0.5 * i as f64
                    + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin()
            })
            .collect();
        let series = monthly_series(&values);
        let config = ForecastConfig::new(12, true).expect("config");
        let result = run(&series, &config).expect("run");

        assert!(result.used_yearly_seasonality());
        assert_eq!(result.rows().len(), 72);
        assert_eq!(result.components().trend.len(), 72);
        assert!(result
            .components()
            .seasonal
            .iter()
            .any(|&s| s.abs() > 1e-6));
    }

    #[test]
    fn interior_nan_values_are_tolerated() {
        let mut values: Vec<f64> = (1..=12).map(f64::from).collect();
        values[5] = f64::NAN;
        let series = daily_series(&values);
        let config = ForecastConfig::new(2, false).expect("config");
        let result = run(&series, &config).expect("run");
        assert_eq!(result.rows().len(), 14);
        assert!(result.rows().iter().all(|r| r.yhat.is_finite()));
    }
}
