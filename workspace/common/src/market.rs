use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single observation of a ticker's closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricePoint {
    /// Trading day (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Closing price in the ticker's native currency
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// One row of a forecast: point estimate plus uncertainty band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
    /// Forecasted day (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Point estimate
    pub yhat: f64,
    /// Lower edge of the uncertainty band
    pub yhat_lower: f64,
    /// Upper edge of the uncertainty band
    pub yhat_upper: f64,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, yhat: f64, yhat_lower: f64, yhat_upper: f64) -> Self {
        Self {
            date,
            yhat,
            yhat_lower,
            yhat_upper,
        }
    }
}

/// Full output of a model fit: one row per historical date followed by one
/// row per horizon date, ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastSeries {
    /// Forecast rows in ascending date order
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the last row, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Display metadata for a ticker. Either field may be missing upstream;
/// the caller decides the fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TickerMeta {
    /// Full company name (e.g. "Microsoft Corporation")
    pub long_name: Option<String>,
    /// ISO currency code (e.g. "USD")
    pub currency: Option<String>,
}
