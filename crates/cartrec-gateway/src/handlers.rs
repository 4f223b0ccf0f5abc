// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the recovery API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use cartrec_core::{
    AbandonedCart, CallingTeamNotification, CartStatus, Customer, DashboardStats,
    RecoveryAttempt, WhatsAppMessage,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::AppState;

/// Request body naming a cart.
#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub cart_id: u64,
}

/// Request body for POST /api/recovery-attempts and /api/simulate-recovery.
#[derive(Debug, Deserialize)]
pub struct AttemptRequest {
    pub cart_id: u64,
    /// Outreach channel; defaults to `whatsapp` in the store.
    #[serde(default, rename = "type")]
    pub attempt_type: Option<String>,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub abandoned_carts: &'static str,
    pub customers: &'static str,
    pub recovery_attempts: &'static str,
    pub send_whatsapp: &'static str,
    pub notify_calling_team: &'static str,
    pub simulate_recovery: &'static str,
    pub dashboard_stats: &'static str,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// `{success, data, count}` envelope for collection reads.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success, data}` envelope for single-object reads.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

/// `{success, message, data}` envelope for actions that create a record.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

impl<T> ActionResponse<T> {
    fn new(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Response body for POST /api/simulate-recovery.
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub success: bool,
    pub message: &'static str,
    pub recovery_success: bool,
    pub whatsapp_sent: bool,
    pub calling_team_notified: bool,
    pub cart_status: CartStatus,
}

/// GET /
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Cart Abandonment Recovery API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            abandoned_carts: "/api/abandoned-carts",
            customers: "/api/customers",
            recovery_attempts: "/api/recovery-attempts",
            send_whatsapp: "/api/send-whatsapp",
            notify_calling_team: "/api/notify-calling-team",
            simulate_recovery: "/api/simulate-recovery",
            dashboard_stats: "/api/dashboard-stats",
        },
    })
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// GET /api/abandoned-carts
pub async fn list_abandoned_carts(
    State(state): State<AppState>,
) -> Json<ListResponse<AbandonedCart>> {
    Json(ListResponse::new(state.store.list_abandoned_carts().await))
}

/// GET /api/customers
pub async fn list_customers(State(state): State<AppState>) -> Json<ListResponse<Customer>> {
    Json(ListResponse::new(state.store.list_customers().await))
}

/// GET /api/dashboard-stats
pub async fn dashboard_stats(State(state): State<AppState>) -> Json<DataResponse<DashboardStats>> {
    Json(DataResponse {
        success: true,
        data: state.store.dashboard_stats().await,
    })
}

/// POST /api/send-whatsapp
///
/// Responds only after the simulated provider delay has elapsed.
pub async fn send_whatsapp(
    State(state): State<AppState>,
    body: Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<WhatsAppMessage>>, ApiError> {
    let Json(req) = body?;
    let message = state.store.send_whatsapp(req.cart_id).await?;
    Ok(Json(ActionResponse::new(
        "WhatsApp message sent successfully",
        message,
    )))
}

/// POST /api/notify-calling-team
pub async fn notify_calling_team(
    State(state): State<AppState>,
    body: Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<CallingTeamNotification>>, ApiError> {
    let Json(req) = body?;
    let notification = state.store.notify_calling_team(req.cart_id).await?;
    Ok(Json(ActionResponse::new(
        "Calling team notified successfully",
        notification,
    )))
}

/// POST /api/recovery-attempts
pub async fn create_recovery_attempt(
    State(state): State<AppState>,
    body: Result<Json<AttemptRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<RecoveryAttempt>>, ApiError> {
    let Json(req) = body?;
    let attempt = state
        .store
        .create_recovery_attempt(req.cart_id, req.attempt_type.as_deref())
        .await?;
    Ok(Json(ActionResponse::new("Recovery attempt recorded", attempt)))
}

/// POST /api/simulate-recovery
pub async fn simulate_recovery(
    State(state): State<AppState>,
    body: Result<Json<AttemptRequest>, JsonRejection>,
) -> Result<Json<SimulationResponse>, ApiError> {
    let Json(req) = body?;
    let outcome = state
        .store
        .simulate_recovery(req.cart_id, req.attempt_type.as_deref())
        .await?;
    Ok(Json(SimulationResponse {
        success: true,
        message: "Recovery process completed",
        recovery_success: outcome.recovery_success,
        whatsapp_sent: true,
        calling_team_notified: true,
        cart_status: outcome.cart_status,
    }))
}
