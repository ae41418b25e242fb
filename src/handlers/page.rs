use axum::response::Html;
use tracing::instrument;

/// The single dashboard page: ticker input, predict button, error label,
/// and the placeholder div the forecast figure renders into. The page's
/// script only calls the forecast endpoint on a click.
static DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

#[instrument]
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
