//! Market data access for the dashboard: daily closing-price history and
//! display metadata per ticker, fetched from Yahoo Finance's public JSON
//! endpoints.

pub mod error;
mod yahoo;

pub use error::{ProviderError, Result};
pub use yahoo::{DEFAULT_BASE_URL, YahooClient};

use async_trait::async_trait;
use common::{PricePoint, TickerMeta};

/// The two queries the dashboard makes against a market data source.
///
/// Implemented by [`YahooClient`] in production; tests substitute a stub.
#[async_trait]
pub trait MarketData: Send + Sync + std::fmt::Debug {
    /// Daily closing prices for `ticker` over the trailing
    /// `lookback_years`, ascending by date. An unknown ticker yields an
    /// empty series, not an error.
    async fn daily_history(&self, ticker: &str, lookback_years: u32) -> Result<Vec<PricePoint>>;

    /// Display name and currency for `ticker`. Fields the upstream does
    /// not carry come back as `None`.
    async fn metadata(&self, ticker: &str) -> Result<TickerMeta>;
}
