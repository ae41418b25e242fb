use thiserror::Error;

/// Error types for the market data provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport or decode failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream endpoint answered with an unexpected status code
    #[error("Upstream status: {0}")]
    UpstreamStatus(u16),
}

/// Type alias for Result with ProviderError
pub type Result<T> = std::result::Result<T, ProviderError>;
