//! Server Implementation
//!
//! HTTP server startup, router assembly and graceful shutdown.

use std::net::SocketAddr;

use axum::{Router, http::StatusCode, middleware, response::IntoResponse};
use tower_http::cors::CorsLayer;

use crate::core::error::{RelayError, RelayResult};
use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, ServerState};

/// HTTP request log middleware
async fn log_request(
    request: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Body printers receive for routes that do not exist
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Sorry, that route does not exist!")
}

/// Build the axum application
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .merge(crate::api::print::router())
        .merge(crate::api::health::router())
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> RelayResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        let mut tasks = BackgroundTasks::new();
        state.start_background_tasks(&mut tasks);
        tasks.log_summary();

        let app = build_app(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::Internal(e.into()))?;
        tracing::info!("Print relay listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RelayError::Internal(e.into()))?;

        tasks.shutdown().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
