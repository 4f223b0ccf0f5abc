// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/JSON surface of the cart recovery demo.
//!
//! Every handler is a thin adapter over [`cartrec_core::RecoveryStore`]: it
//! decodes the request body, calls one store operation and wraps the result
//! in the `{success, ...}` envelope the dashboard front end expects.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, GatewayError};
pub use server::{AppState, ServerConfig, router, serve, start_server};
