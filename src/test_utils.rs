#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use async_trait::async_trait;
    use axum::Router;
    use chrono::{Duration, NaiveDate};
    use common::{PricePoint, TickerMeta};
    use provider::{MarketData, ProviderError, Result as ProviderResult};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Market data stub serving fixed fixtures instead of HTTP calls.
    #[derive(Debug, Clone, Default)]
    pub struct StubMarket {
        pub history: Vec<PricePoint>,
        pub meta: TickerMeta,
        /// Answer the metadata query with a transport error
        pub fail_metadata: bool,
    }

    #[async_trait]
    impl MarketData for StubMarket {
        async fn daily_history(
            &self,
            _ticker: &str,
            _lookback_years: u32,
        ) -> ProviderResult<Vec<PricePoint>> {
            Ok(self.history.clone())
        }

        async fn metadata(&self, _ticker: &str) -> ProviderResult<TickerMeta> {
            if self.fail_metadata {
                return Err(ProviderError::UpstreamStatus(500));
            }
            Ok(self.meta.clone())
        }
    }

    /// `days` consecutive calendar days of synthetic closes starting
    /// 2024-01-01, gently trending upward.
    pub fn synthetic_history(days: i64) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..days)
            .map(|day| PricePoint::new(start + Duration::days(day), 300.0 + day as f64 * 0.5))
            .collect()
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing, backed by the given market stub
    pub fn setup_test_app(stub: StubMarket) -> Router {
        let _ = init_test_tracing();

        let state = AppState {
            market: Arc::new(stub),
        };
        create_router(state)
    }
}
