use provider::MarketData;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Market data source the forecast handler fetches from
    pub market: Arc<dyn MarketData>,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct ForecastQuery {
    /// Lookback window in years (default 5)
    pub lookback_years: Option<u32>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// A rendered Plotly figure, ready for `Plotly.newPlot` on the dashboard
/// page.
#[derive(Debug, Serialize, ToSchema)]
pub struct FigureResponse {
    /// Plotly trace objects, in render order
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
    /// Plotly layout object
    #[schema(value_type = Object)]
    pub layout: serde_json::Value,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::forecast::get_forecast,
    ),
    components(
        schemas(
            ApiResponse<FigureResponse>,
            FigureResponse,
            ErrorResponse,
            HealthResponse,
            ForecastQuery,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecast", description = "Price history and forecast endpoints"),
    ),
    info(
        title = "Stockcast API",
        description = "Stock forecast dashboard - type a ticker, get its price history overlaid with a one-year forecast band",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
