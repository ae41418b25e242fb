use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use compute::ComputeError;
use tracing::{error, instrument};

use crate::helpers::chart::forecast_figure;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, FigureResponse, ForecastQuery};

/// User-visible message for a ticker with no price history.
pub const UNKNOWN_TICKER_MESSAGE: &str = "Ticker symbol does not exist.";

/// Y-axis label when the upstream metadata carries no currency.
pub const FALLBACK_CURRENCY_LABEL: &str = "Currency";

const DEFAULT_LOOKBACK_YEARS: u32 = 5;

/// Fetch a ticker's history, fit the forecast, and answer with the
/// rendered figure. Stateless: every request recomputes from scratch.
#[utoipa::path(
    get,
    path = "/api/v1/forecast/{ticker}",
    tag = "forecast",
    params(
        ("ticker" = String, Path, description = "Ticker symbol, e.g. MSFT"),
        ("lookback_years" = Option<u32>, Query, description = "Lookback window in years (default 5)"),
    ),
    responses(
        (status = 200, description = "Forecast figure computed successfully", body = ApiResponse<FigureResponse>),
        (status = 404, description = "Ticker has no price history", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Path(ticker): Path<String>,
    Query(query): Query<ForecastQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FigureResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let ticker = ticker.trim().to_uppercase();
    let lookback_years = query.lookback_years.unwrap_or(DEFAULT_LOOKBACK_YEARS);

    let history = match state.market.daily_history(&ticker, lookback_years).await {
        Ok(history) => history,
        Err(err) => {
            error!(%ticker, %err, "price history fetch failed");
            return Err(internal_error());
        }
    };

    let forecast = match compute::forecast(&history, &compute::default_options()) {
        Ok(forecast) => forecast,
        Err(ComputeError::EmptyHistory) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: UNKNOWN_TICKER_MESSAGE.to_string(),
                    code: "TICKER_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(err) => {
            error!(%ticker, %err, "forecast computation failed");
            return Err(internal_error());
        }
    };

    // Metadata is cosmetic: fields the upstream does not carry fall back
    // to the raw ticker and a placeholder currency label. Transport
    // failures do not.
    let meta = match state.market.metadata(&ticker).await {
        Ok(meta) => meta,
        Err(err) => {
            error!(%ticker, %err, "metadata fetch failed");
            return Err(internal_error());
        }
    };
    let name = meta.long_name.unwrap_or_else(|| ticker.clone());
    let currency = meta
        .currency
        .unwrap_or_else(|| FALLBACK_CURRENCY_LABEL.to_string());

    let figure = match forecast_figure(&name, &currency, &history, &forecast) {
        Ok(figure) => figure,
        Err(err) => {
            error!(%ticker, %err, "figure serialization failed");
            return Err(internal_error());
        }
    };

    Ok(Json(ApiResponse {
        data: figure,
        message: "Forecast computed successfully".to_string(),
        success: true,
    }))
}

fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
            code: "INTERNAL_ERROR".to_string(),
            success: false,
        }),
    )
}
