//! # HTTP Server
//!
//! Combines the chirp, user, admin and static-file routers behind CORS and
//! request tracing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::admin_routes::{admin_routes, count_hits, health_routes};
use super::chirp_routes::{chirp_routes, ChirpsState};
use super::config::HttpServerConfig;
use super::user_routes::{user_routes, UsersState};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::storage::ChirpDb;
use crate::validation::ChirpFilter;

/// HTTP server for chirpy
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with the default chirp filter
    pub fn new(config: HttpServerConfig, db: Arc<ChirpDb>) -> Self {
        Self::with_filter(config, db, ChirpFilter::default())
    }

    pub fn with_filter(config: HttpServerConfig, db: Arc<ChirpDb>, filter: ChirpFilter) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let router = Self::build_router(&config, db, metrics, filter);
        Self { config, router }
    }

    fn build_router(
        config: &HttpServerConfig,
        db: Arc<ChirpDb>,
        metrics: Arc<MetricsRegistry>,
        filter: ChirpFilter,
    ) -> Router {
        let chirps_state = Arc::new(ChirpsState::new(
            Arc::clone(&db),
            Arc::clone(&metrics),
            filter,
        ));
        let users_state = Arc::new(UsersState {
            db,
            metrics: Arc::clone(&metrics),
        });

        let allow_origin = if config.cors_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            AllowOrigin::list(origins)
        };
        let cors = CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::OPTIONS,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers(Any);

        // Only the file server counts towards the admin hit counter
        let files = Router::new()
            .nest_service("/app", ServeDir::new(&config.static_dir))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&metrics),
                count_hits,
            ));

        let api = Router::new()
            .merge(health_routes(Arc::clone(&metrics)))
            .merge(chirp_routes(chirps_state))
            .merge(user_routes(users_state));

        Router::new()
            .merge(files)
            .nest("/api", api)
            .nest("/admin", admin_routes(metrics))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::ServerListening, &[("addr", &addr.to_string())]);
        tracing::info!("chirpy listening on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db() -> (TempDir, Arc<ChirpDb>) {
        let tmp = TempDir::new().unwrap();
        let db = ChirpDb::open(tmp.path().join("database.json")).unwrap();
        (tmp, Arc::new(db))
    }

    #[test]
    fn test_server_creation() {
        let (_tmp, db) = test_db();
        let server = HttpServer::new(HttpServerConfig::default(), db);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_with_custom_port() {
        let (_tmp, db) = test_db();
        let server = HttpServer::new(HttpServerConfig::with_port(9000), db);
        assert_eq!(server.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_router_builds_with_cors_list() {
        let (_tmp, db) = test_db();
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, db).router();
    }
}
