// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the gateway.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cartrec_core::RecoveryError;
use serde::Serialize;
use thiserror::Error;

/// Failures starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Per-request failures, rendered as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The referenced cart does not exist.
    #[error("Cart not found")]
    NotFound(#[from] RecoveryError),

    /// The request body could not be decoded.
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound(inner) => tracing::debug!(error = %inner, "lookup failed"),
            ApiError::BadRequest(detail) => tracing::debug!(%detail, "rejected request body"),
        }
        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_fixed_message() {
        let err = ApiError::from(RecoveryError::CartNotFound { cart_id: 9999 });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Cart not found");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ApiError::BadRequest("missing field `cart_id`".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("cart_id"));
    }

    #[test]
    fn error_response_serializes() {
        let body = ErrorResponse {
            success: false,
            message: "Cart not found".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"Cart not found"}"#);
    }
}
