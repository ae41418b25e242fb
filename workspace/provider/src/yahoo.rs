use async_trait::async_trait;
use chrono::DateTime;
use common::{PricePoint, TickerMeta};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::{ProviderError, Result};
use crate::MarketData;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance client over its v8 chart and v10 quoteSummary endpoints.
///
/// The base URL is injectable so tests can point the client at a local
/// stub server.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("stockcast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn history_url(&self, ticker: &str, lookback_years: u32) -> String {
        format!(
            "{}/v8/finance/chart/{ticker}?symbol={ticker}&interval=1d&range={lookback_years}y",
            self.base_url
        )
    }

    fn metadata_url(&self, ticker: &str) -> String {
        format!(
            "{}/v10/finance/quoteSummary/{ticker}?modules=price",
            self.base_url
        )
    }
}

#[async_trait]
impl MarketData for YahooClient {
    #[instrument(skip(self))]
    async fn daily_history(&self, ticker: &str, lookback_years: u32) -> Result<Vec<PricePoint>> {
        let url = self.history_url(ticker, lookback_years);
        let response = self.http.get(&url).send().await?;

        // An unknown symbol answers 404 with an error body; the dashboard
        // reports it the same way as an empty series.
        if response.status() == StatusCode::NOT_FOUND {
            warn!(%ticker, "chart endpoint answered 404; treating as empty history");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(ProviderError::UpstreamStatus(response.status().as_u16()));
        }

        let envelope: ChartEnvelope = response.json().await?;
        let history = parse_chart(envelope, ticker);
        debug!(%ticker, points = history.len(), "fetched price history");
        Ok(history)
    }

    #[instrument(skip(self))]
    async fn metadata(&self, ticker: &str) -> Result<TickerMeta> {
        let url = self.metadata_url(ticker);
        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!(%ticker, "quoteSummary endpoint answered 404; no metadata");
            return Ok(TickerMeta::default());
        }
        if !response.status().is_success() {
            return Err(ProviderError::UpstreamStatus(response.status().as_u16()));
        }

        let envelope: QuoteSummaryEnvelope = response.json().await?;
        Ok(parse_quote_summary(envelope))
    }
}

/// Pair the chart timestamps with their closes, skipping days the feed
/// reports as `null`. A missing result set decodes to an empty series.
fn parse_chart(envelope: ChartEnvelope, ticker: &str) -> Vec<PricePoint> {
    let Some(data) = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        warn!(%ticker, "failed to extract price data; filling with an empty series instead");
        return Vec::new();
    };

    let Some(quote) = data.indicators.quote.first() else {
        warn!(%ticker, "chart result carries no quote block");
        return Vec::new();
    };

    data.timestamp
        .iter()
        .zip(&quote.close)
        .filter_map(|(&timestamp, close)| {
            let date = DateTime::from_timestamp(timestamp, 0)?.date_naive();
            close.map(|close| PricePoint::new(date, close))
        })
        .collect()
}

fn parse_quote_summary(envelope: QuoteSummaryEnvelope) -> TickerMeta {
    envelope
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|entry| entry.price)
        .map(|price| TickerMeta {
            long_name: price.long_name,
            currency: price.currency,
        })
        .unwrap_or_default()
}

// `chart` response schema

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    chart: ChartResponse,
}

#[derive(Deserialize, Debug)]
struct ChartResponse {
    result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

// `quoteSummary` response schema

#[derive(Deserialize, Debug)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryResponse,
}

#[derive(Deserialize, Debug)]
struct QuoteSummaryResponse {
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Deserialize, Debug)]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
}

#[derive(Deserialize, Debug)]
struct PriceModule {
    currency: Option<String>,
    #[serde(rename = "longName")]
    long_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn history_url_carries_interval_and_range() {
        let client = YahooClient::new("http://localhost:9999").unwrap();
        assert_eq!(
            client.history_url("MSFT", 5),
            "http://localhost:9999/v8/finance/chart/MSFT?symbol=MSFT&interval=1d&range=5y"
        );
        assert_eq!(
            client.metadata_url("MSFT"),
            "http://localhost:9999/v10/finance/quoteSummary/MSFT?modules=price"
        );
    }

    #[test]
    fn chart_rows_pair_timestamps_with_closes() {
        // 2024-01-02 and 2024-01-03 market opens, UTC.
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"currency": "USD", "symbol": "MSFT"},
                    "timestamp": [1704207600, 1704294000],
                    "indicators": {
                        "quote": [{
                            "open": [370.0, 369.0],
                            "close": [370.87, 370.60],
                            "volume": [100, 200]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        let history = parse_chart(envelope, "MSFT");

        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(history[0].close, 370.87);
        assert_eq!(history[1].close, 370.60);
    }

    #[test]
    fn null_closes_are_skipped() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704207600, 1704294000, 1704380400],
                    "indicators": {
                        "quote": [{"close": [370.87, null, 372.10]}]
                    }
                }],
                "error": null
            }
        }"#;
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        let history = parse_chart(envelope, "MSFT");

        assert_eq!(history.len(), 2);
        assert_eq!(history[1].close, 372.10);
    }

    #[test]
    fn missing_chart_result_decodes_to_an_empty_series() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        assert!(parse_chart(envelope, "XXXX").is_empty());
    }

    #[test]
    fn quote_summary_extracts_name_and_currency() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "currency": "USD",
                        "longName": "Microsoft Corporation",
                        "regularMarketPrice": {"raw": 370.87}
                    }
                }],
                "error": null
            }
        }"#;
        let envelope: QuoteSummaryEnvelope = serde_json::from_str(json).unwrap();
        let meta = parse_quote_summary(envelope);

        assert_eq!(meta.long_name.as_deref(), Some("Microsoft Corporation"));
        assert_eq!(meta.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn quote_summary_without_fields_yields_empty_meta() {
        let json = r#"{"quoteSummary": {"result": [{"price": {}}], "error": null}}"#;
        let envelope: QuoteSummaryEnvelope = serde_json::from_str(json).unwrap();
        let meta = parse_quote_summary(envelope);
        assert!(meta.long_name.is_none());
        assert!(meta.currency.is_none());

        let json = r#"{"quoteSummary": {"result": null, "error": null}}"#;
        let envelope: QuoteSummaryEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(parse_quote_summary(envelope), TickerMeta::default());
    }
}
