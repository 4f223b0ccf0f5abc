// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the recovery API.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use cartrec_core::RecoveryStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::GatewayError;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide recovery store.
    pub store: Arc<RecoveryStore>,
    /// Process start time for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<RecoveryStore>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }
}

/// Listener configuration (mirrors `ServerConfig` from cartrec-config so the
/// gateway does not depend on the config crate).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build the application router.
///
/// Cross-origin requests are allowed from any origin because the dashboard
/// front end is served separately.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/abandoned-carts", get(handlers::list_abandoned_carts))
        .route("/customers", get(handlers::list_customers))
        .route("/dashboard-stats", get(handlers::dashboard_stats))
        .route("/send-whatsapp", post(handlers::send_whatsapp))
        .route("/notify-calling-team", post(handlers::notify_calling_team))
        .route("/recovery-attempts", post(handlers::create_recovery_attempt))
        .route("/simulate-recovery", post(handlers::simulate_recovery));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: AppState,
    shutdown: F,
) -> Result<(), GatewayError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| GatewayError::Bind {
            addr: addr.clone(),
            source,
        })?;

    serve(listener, state, shutdown).await
}

/// Serve the API on an already-bound listener until `shutdown` resolves.
///
/// In-flight requests, including any pending WhatsApp delay, are allowed to
/// finish before this returns.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), GatewayError>
where
    F: Future<Output = ()> + Send + 'static,
{
    match listener.local_addr() {
        Ok(addr) => tracing::info!(%addr, "recovery API listening"),
        Err(e) => tracing::warn!(error = %e, "recovery API listening on unknown address"),
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(GatewayError::Serve)?;

    tracing::info!("recovery API stopped");
    Ok(())
}
