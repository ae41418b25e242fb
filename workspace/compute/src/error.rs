use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The input series has no observations. Callers surface this as an
    /// unknown-ticker condition.
    #[error("History is empty")]
    EmptyHistory,

    /// The input series is not strictly ascending by date.
    #[error("History is not strictly ascending by date: {0}")]
    UnorderedHistory(String),

    /// Error from the model fit itself
    #[error("Forecast computation error: {0}")]
    ForecastComputation(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
