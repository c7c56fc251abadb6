//! # HTTP Server
//!
//! Combines the health and user routers behind CORS, request tracing and
//! panic recovery.

use std::io;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::health_routes::{health_routes, HealthState};
use super::response::panic_response;
use super::user_routes::{user_routes, UserState};
use crate::directory::DirectoryEngine;

/// HTTP server for the user directory
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration and a freshly seeded engine
    pub fn with_config(config: HttpServerConfig) -> Self {
        Self::with_engine(config, Arc::new(DirectoryEngine::new()))
    }

    /// Create a new HTTP server serving an existing engine
    pub fn with_engine(config: HttpServerConfig, engine: Arc<DirectoryEngine>) -> Self {
        let router = Self::build_router(&config, engine);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, engine: Arc<DirectoryEngine>) -> Router {
        let user_state = Arc::new(UserState::new(engine));
        let health_state = Arc::new(HealthState {
            service_name: config.service_name.clone(),
        });

        Router::new()
            .merge(health_routes(health_state))
            .nest("/api/v1", user_routes(user_state))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http())
            .layer(Self::cors_layer(&config.cors_origins))
    }

    /// Permissive when no origins are configured, otherwise an allow-list
    fn cors_layer(origins: &[String]) -> CorsLayer {
        if origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|s| match s.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    warn!(origin = %s, "ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        info!(
            %addr,
            service = %self.config.service_name,
            "listening; API under /api/v1/users, health at /health"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
