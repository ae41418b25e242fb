pub mod error;
pub mod forecast;

pub use error::{ComputeError, Result};
pub use forecast::{ForecastOptions, SeasonalityMode, forecast};

/// Returns the default pre-configured forecast options that will be used
/// most of the time.
///
/// This is the dashboard configuration: yearly seasonality enabled, weekly
/// and daily disabled, multiplicative seasonality mode, projected values
/// floored at zero, and a 365 day horizon.
pub fn default_options() -> ForecastOptions {
    ForecastOptions::default()
}
