use chrono::{Datelike, Duration, NaiveDate};
use common::{ForecastPoint, ForecastSeries, PricePoint};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Width of the uncertainty band in residual standard deviations.
const BAND_Z: f64 = 1.96;

/// Whether seasonal effects are added to or multiply the trend component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonalityMode {
    Additive,
    Multiplicative,
}

/// Configuration for a forecast fit.
#[derive(Debug, Clone)]
pub struct ForecastOptions {
    /// Fit yearly (calendar month) seasonal factors
    pub yearly_seasonality: bool,
    /// Fit weekly (weekday) seasonal factors
    pub weekly_seasonality: bool,
    /// Accepted for configuration parity; daily observations carry no
    /// sub-daily signal, so this flag has no effect on the fit.
    pub daily_seasonality: bool,
    /// How seasonal factors combine with the trend
    pub seasonality_mode: SeasonalityMode,
    /// Lower clamp applied to the point estimate and both band edges
    pub floor: Option<f64>,
    /// Number of daily rows projected past the last observation
    pub horizon_days: i64,
}

impl Default for ForecastOptions {
    /// The dashboard configuration: yearly seasonality on, weekly and daily
    /// off, multiplicative mode, values floored at zero, 365-day horizon.
    fn default() -> Self {
        Self {
            yearly_seasonality: true,
            weekly_seasonality: false,
            daily_seasonality: false,
            seasonality_mode: SeasonalityMode::Multiplicative,
            floor: Some(0.0),
            horizon_days: 365,
        }
    }
}

/// Fit a trend-plus-seasonality model to a daily closing-price series and
/// project it `horizon_days` past the last observation.
///
/// The output has one row per historical date followed by one row per
/// calendar day of the horizon, strictly ascending. An empty input series
/// is reported as [`ComputeError::EmptyHistory`]; callers treat it as an
/// unknown ticker.
#[instrument(skip(history), fields(observations = history.len()))]
pub fn forecast(history: &[PricePoint], options: &ForecastOptions) -> Result<ForecastSeries> {
    let Some(last) = history.last() else {
        return Err(ComputeError::EmptyHistory);
    };
    for pair in history.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(ComputeError::UnorderedHistory(format!(
                "{} follows {}",
                pair[1].date, pair[0].date
            )));
        }
    }
    if options.horizon_days < 0 {
        return Err(ComputeError::ForecastComputation(format!(
            "negative horizon: {}",
            options.horizon_days
        )));
    }

    let model = FittedModel::fit(history, options);
    debug!(
        slope = model.slope,
        intercept = model.intercept,
        sigma = model.sigma,
        "model fitted"
    );

    let mut points = Vec::with_capacity(history.len() + options.horizon_days as usize);
    for observed in history {
        points.push(model.row(observed.date, options.floor));
    }
    for day in 1..=options.horizon_days {
        points.push(model.row(last.date + Duration::days(day), options.floor));
    }

    Ok(ForecastSeries::new(points))
}

/// A fitted model: linear trend, per-month and per-weekday seasonal
/// factors, and the residual spread that sizes the band.
///
/// In multiplicative mode the seasonal factors and `sigma` are relative to
/// the trend; in additive mode they are in price units.
#[derive(Debug)]
struct FittedModel {
    start: NaiveDate,
    slope: f64,
    intercept: f64,
    yearly: [f64; 12],
    weekly: [f64; 7],
    mode: SeasonalityMode,
    sigma: f64,
}

impl FittedModel {
    fn fit(history: &[PricePoint], options: &ForecastOptions) -> Self {
        let start = history[0].date;
        let ts: Vec<f64> = history
            .iter()
            .map(|p| (p.date - start).num_days() as f64)
            .collect();
        let ys: Vec<f64> = history.iter().map(|p| p.close).collect();

        let (slope, intercept) = linear_trend(&ts, &ys);
        let mode = options.seasonality_mode;

        // Seasonal components are estimated from the detrended series:
        // ratios against the trend in multiplicative mode, differences in
        // additive mode. Samples where a multiplicative ratio is undefined
        // (trend at zero) are skipped.
        let detrended: Vec<Option<f64>> = ts
            .iter()
            .zip(&ys)
            .map(|(&t, &y)| {
                let trend = intercept + slope * t;
                match mode {
                    SeasonalityMode::Multiplicative => {
                        (trend.abs() > f64::EPSILON).then(|| y / trend - 1.0)
                    }
                    SeasonalityMode::Additive => Some(y - trend),
                }
            })
            .collect();

        let yearly: [f64; 12] = if options.yearly_seasonality {
            bin_means(history.iter().map(|p| p.date.month0() as usize), &detrended)
        } else {
            [0.0; 12]
        };

        // Weekly factors are fitted on what the yearly component leaves over.
        let weekly: [f64; 7] = if options.weekly_seasonality {
            let remainder: Vec<Option<f64>> = history
                .iter()
                .zip(detrended.iter().copied())
                .map(|(p, component)| {
                    let yearly_factor = yearly[p.date.month0() as usize];
                    component.and_then(|c| match mode {
                        SeasonalityMode::Multiplicative => {
                            let base = 1.0 + yearly_factor;
                            (base.abs() > f64::EPSILON).then(|| (1.0 + c) / base - 1.0)
                        }
                        SeasonalityMode::Additive => Some(c - yearly_factor),
                    })
                })
                .collect();
            bin_means(
                history
                    .iter()
                    .map(|p| p.date.weekday().num_days_from_monday() as usize),
                &remainder,
            )
        } else {
            [0.0; 7]
        };

        let mut model = Self {
            start,
            slope,
            intercept,
            yearly,
            weekly,
            mode,
            sigma: 0.0,
        };
        model.sigma = model.residual_spread(history);
        model
    }

    /// Point estimate for a single date.
    fn predict(&self, date: NaiveDate) -> f64 {
        let t = (date - self.start).num_days() as f64;
        let trend = self.intercept + self.slope * t;
        let yearly = self.yearly[date.month0() as usize];
        let weekly = self.weekly[date.weekday().num_days_from_monday() as usize];
        match self.mode {
            SeasonalityMode::Multiplicative => trend * (1.0 + yearly) * (1.0 + weekly),
            SeasonalityMode::Additive => trend + yearly + weekly,
        }
    }

    /// Standard deviation of the in-sample residuals, relative to the
    /// fitted value in multiplicative mode.
    fn residual_spread(&self, history: &[PricePoint]) -> f64 {
        let residuals: Vec<f64> = history
            .iter()
            .filter_map(|p| {
                let fitted = self.predict(p.date);
                match self.mode {
                    SeasonalityMode::Multiplicative => {
                        (fitted.abs() > f64::EPSILON).then(|| p.close / fitted - 1.0)
                    }
                    SeasonalityMode::Additive => Some(p.close - fitted),
                }
            })
            .collect();
        std_dev(&residuals)
    }

    /// One output row: point estimate, symmetric band, floor applied.
    fn row(&self, date: NaiveDate, floor: Option<f64>) -> ForecastPoint {
        let yhat = self.predict(date);
        let delta = match self.mode {
            SeasonalityMode::Multiplicative => BAND_Z * self.sigma * yhat.abs(),
            SeasonalityMode::Additive => BAND_Z * self.sigma,
        };
        let (mut yhat, mut lower, mut upper) = (yhat, yhat - delta, yhat + delta);
        if let Some(floor) = floor {
            yhat = yhat.max(floor);
            lower = lower.max(floor);
            upper = upper.max(floor);
        }
        ForecastPoint::new(date, yhat, lower, upper)
    }
}

/// Ordinary least-squares line through `(ts, ys)`, returned as
/// `(slope, intercept)`. A degenerate abscissa yields a flat line at the
/// mean.
fn linear_trend(ts: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = ts.len() as f64;
    let mean_t = ts.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut var_t = 0.0;
    let mut cov_ty = 0.0;
    for (&t, &y) in ts.iter().zip(ys) {
        var_t += (t - mean_t) * (t - mean_t);
        cov_ty += (t - mean_t) * (y - mean_y);
    }

    if var_t.abs() < f64::EPSILON {
        (0.0, mean_y)
    } else {
        let slope = cov_ty / var_t;
        (slope, mean_y - slope * mean_t)
    }
}

/// Mean of the present samples per bin; empty bins stay at zero.
fn bin_means<const BINS: usize>(
    bins: impl Iterator<Item = usize>,
    samples: &[Option<f64>],
) -> [f64; BINS] {
    let mut sums = [0.0; BINS];
    let mut counts = [0usize; BINS];
    for (bin, sample) in bins.zip(samples) {
        if let Some(value) = *sample {
            sums[bin] += value;
            counts[bin] += 1;
        }
    }
    let mut means = [0.0; BINS];
    for bin in 0..BINS {
        if counts[bin] > 0 {
            means[bin] = sums[bin] / counts[bin] as f64;
        }
    }
    means
}

fn std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}
