//! Admin and health HTTP Routes
//!
//! - `GET  /api/healthz`   - liveness probe
//! - `POST /api/reset`     - zero the fileserver hit counter
//! - `GET  /admin/metrics` - HTML page with the hit count
//! - `GET  /admin/stats`   - every service counter as JSON
//!
//! Also hosts the middleware that counts `/app` requests.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::observability::{MetricsRegistry, MetricsSnapshot};

/// Routes mounted under `/api`
pub fn health_routes(metrics: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/reset", post(reset_handler))
        .with_state(metrics)
}

/// Routes mounted under `/admin`
pub fn admin_routes(metrics: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        .with_state(metrics)
}

/// Counts every request passing through the static file server.
pub async fn count_hits(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    metrics.increment_fileserver_hits();
    next.run(request).await
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "OK",
    )
}

async fn reset_handler(State(metrics): State<Arc<MetricsRegistry>>) -> impl IntoResponse {
    metrics.reset_fileserver_hits();
    (StatusCode::OK, "Hits reset to 0")
}

async fn metrics_handler(State(metrics): State<Arc<MetricsRegistry>>) -> Html<String> {
    Html(render_metrics_page(metrics.fileserver_hits()))
}

async fn stats_handler(State(metrics): State<Arc<MetricsRegistry>>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}

fn render_metrics_page(hits: u64) -> String {
    format!(
        r#"<html>

<body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
</body>

</html>
"#,
        hits
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_page_contains_count() {
        let page = render_metrics_page(17);
        assert!(page.contains("Welcome, Chirpy Admin"));
        assert!(page.contains("Chirpy has been visited 17 times!"));
    }
}
