use common::{ForecastSeries, PricePoint};
use plotly::common::{DashType, Fill, Line, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Scatter};

use crate::schemas::FigureResponse;

/// Assemble the dashboard figure: four scatter traces in fixed order -
/// the two invisible band edges (the upper one fills down to the lower
/// one to shade the band), the dotted central forecast line, and the
/// solid historical price line.
pub fn forecast_figure(
    name: &str,
    currency: &str,
    history: &[PricePoint],
    forecast: &ForecastSeries,
) -> Result<FigureResponse, serde_json::Error> {
    let forecast_dates: Vec<String> = forecast
        .points
        .iter()
        .map(|p| p.date.to_string())
        .collect();
    let lower: Vec<f64> = forecast.points.iter().map(|p| p.yhat_lower).collect();
    let upper: Vec<f64> = forecast.points.iter().map(|p| p.yhat_upper).collect();
    let central: Vec<f64> = forecast.points.iter().map(|p| p.yhat).collect();
    let history_dates: Vec<String> = history.iter().map(|p| p.date.to_string()).collect();
    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();

    let lower_trace = Scatter::new(forecast_dates.clone(), lower)
        .mode(Mode::Lines)
        .name("Forecast (lower)")
        .line(Line::new().color("rgba(0,0,0,0)").dash(DashType::Dot))
        .show_legend(false);
    let upper_trace = Scatter::new(forecast_dates.clone(), upper)
        .mode(Mode::Lines)
        .name("Forecast (upper)")
        .line(Line::new().color("rgba(0,0,0,0)").dash(DashType::Dot))
        .fill(Fill::ToNextY)
        .fill_color("rgb(192,192,192)")
        .show_legend(false);
    let forecast_trace = Scatter::new(forecast_dates, central)
        .mode(Mode::Lines)
        .name("Forecast")
        .line(Line::new().color("black").dash(DashType::Dot));
    let history_trace = Scatter::new(history_dates, closes)
        .mode(Mode::Lines)
        .name("Stock Price")
        .line(Line::new().color("red"));

    let layout = Layout::new()
        .title(Title::with_text(format!("Stock Price Forecast for {name}")))
        .x_axis(Axis::new().title(Title::with_text("Date")))
        .y_axis(Axis::new().title(Title::with_text(currency)));

    Ok(FigureResponse {
        data: vec![
            serde_json::to_value(&lower_trace)?,
            serde_json::to_value(&upper_trace)?,
            serde_json::to_value(&forecast_trace)?,
            serde_json::to_value(&history_trace)?,
        ],
        layout: serde_json::to_value(&layout)?,
    })
}
