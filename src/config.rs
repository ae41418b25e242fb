use crate::schemas::AppState;
use anyhow::Result;
use provider::YahooClient;
use std::sync::Arc;

/// Initialize application state against an explicit market data endpoint
pub fn initialize_app_state_with_url(base_url: &str) -> Result<AppState> {
    tracing::info!("Using market data endpoint: {}", base_url);
    let market = YahooClient::new(base_url)?;

    Ok(AppState {
        market: Arc::new(market),
    })
}
